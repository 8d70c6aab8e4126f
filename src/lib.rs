//! Skydrop - skydive, ring-run and ground combat simulation core
//!
//! Core modules:
//! - `levels`: Static level catalog (biome, palette, difficulty)
//! - `world`: Procedural world generation (structures, props, ambient motion)
//! - `sim`: Game state store, motion & phase controller, per-frame tick
//! - `combat`: Hit-scan resolution, target registry, projectile visuals
//! - `tuning`: Data-driven game balance

pub mod combat;
pub mod levels;
pub mod sim;
pub mod tuning;
pub mod world;

pub use levels::{Biome, LevelDescriptor, Rgb};
pub use sim::{GameContext, GamePhase, GameState, TickInput, tick};
pub use tuning::Tuning;

use glam::Vec3;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep used by the headless driver (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Drop altitude when a new attempt starts
    pub const DROP_ALTITUDE: f32 = 3000.0;
    /// Altitude the player hovers at in the menu
    pub const MENU_ALTITUDE: f32 = 2500.0;

    /// Number of checkpoint rings per level
    pub const RING_COUNT: usize = 4;
    /// Number of drones spawned when ground combat starts
    pub const ENEMY_COUNT: usize = 12;

    /// Horizontal radius of the procedural world
    pub const WORLD_RANGE: f32 = 4000.0;
    /// Ceiling used by atmospheric wrap-around
    pub const SKY_CEILING: f32 = 2500.0;
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// Horizontal (X/Z) distance between two points
#[inline]
pub fn horizontal_distance(a: Vec3, b: Vec3) -> f32 {
    let dx = a.x - b.x;
    let dz = a.z - b.z;
    (dx * dx + dz * dz).sqrt()
}

/// Frame-rate aware easing factor for exponential smoothing at `rate` per second.
///
/// Matches `lerp(current, target, rate * dt)`, clamped so a long frame
/// never overshoots the target.
#[inline]
pub fn ease_factor(rate: f32, dt: f32) -> f32 {
    (rate * dt).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_horizontal_distance_ignores_height() {
        let a = Vec3::new(3.0, 100.0, 0.0);
        let b = Vec3::new(0.0, -50.0, 4.0);
        assert!((horizontal_distance(a, b) - 5.0).abs() < 1e-5);
    }

    #[test]
    fn test_normalize_angle_range() {
        use std::f32::consts::PI;
        assert!((normalize_angle(2.5 * PI) - 0.5 * PI).abs() < 1e-5);
        assert!((normalize_angle(-2.5 * PI) + 0.5 * PI).abs() < 1e-5);
        assert!((normalize_angle(-0.5) + 0.5).abs() < 1e-6);
        // The wrap point itself may land on either side
        assert!((normalize_angle(3.0 * PI).abs() - PI).abs() < 1e-5);
    }

    #[test]
    fn test_ease_factor_clamps() {
        assert_eq!(ease_factor(5.0, 1.0), 1.0);
        assert!((ease_factor(3.0, 0.1) - 0.3).abs() < 1e-6);
        assert_eq!(ease_factor(3.0, -1.0), 0.0);
    }
}
