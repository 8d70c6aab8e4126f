//! Checkpoint rings
//!
//! One position function feeds both the hit test and the renderer, so what
//! the player sees is what the player can fly through.

use glam::Vec3;

use crate::consts::RING_COUNT;
use crate::horizontal_distance;

/// Ring centres before complexity scaling, top to bottom
pub const BASE_RINGS: [Vec3; RING_COUNT] = [
    Vec3::new(0.0, 2200.0, 50.0),
    Vec3::new(80.0, 1700.0, 20.0),
    Vec3::new(-50.0, 1200.0, -60.0),
    Vec3::new(20.0, 700.0, 100.0),
];

/// Vertical half-thickness of the ring capture volume
pub const RING_HALF_HEIGHT: f32 = 15.0;
/// Horizontal capture radius
pub const RING_RADIUS: f32 = 30.0;

/// Ring centres for a level. Harder levels spread the rings further apart
/// horizontally; heights never change.
pub fn ring_positions(complexity: u32) -> [Vec3; RING_COUNT] {
    let k = complexity as f32;
    BASE_RINGS.map(|r| Vec3::new(r.x * k, r.y, r.z * k))
}

/// Whether `position` is inside the capture volume of the ring at `center`
#[inline]
pub fn in_ring(center: Vec3, position: Vec3) -> bool {
    (position.y - center.y).abs() < RING_HALF_HEIGHT
        && horizontal_distance(position, center) < RING_RADIUS
}

/// Rings passed during the current attempt
#[derive(Debug, Clone, Default)]
pub struct RingTracker {
    visited: [bool; RING_COUNT],
}

impl RingTracker {
    /// Mark every ring the player is inside and hasn't visited yet.
    ///
    /// Returns the newly visited indices; a ring is reported at most once
    /// until `clear`.
    pub fn collect(&mut self, position: Vec3, rings: &[Vec3; RING_COUNT]) -> Vec<usize> {
        let mut hits = Vec::new();
        for (i, &center) in rings.iter().enumerate() {
            if !self.visited[i] && in_ring(center, position) {
                self.visited[i] = true;
                hits.push(i);
            }
        }
        hits
    }

    pub fn is_visited(&self, index: usize) -> bool {
        self.visited.get(index).copied().unwrap_or(false)
    }

    pub fn visited_count(&self) -> usize {
        self.visited.iter().filter(|&&v| v).count()
    }

    pub fn clear(&mut self) {
        self.visited = [false; RING_COUNT];
    }
}
