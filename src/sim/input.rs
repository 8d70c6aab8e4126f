//! Per-tick input
//!
//! The platform layer fills one `TickInput` per frame. Nothing is
//! registered or retained between ticks.

use glam::Vec2;

/// Held movement keys (ground combat)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MovementKeys {
    pub forward: bool,
    pub back: bool,
    pub left: bool,
    pub right: bool,
    pub sprint: bool,
    /// Held slide/crouch key
    pub slide: bool,
}

impl MovementKeys {
    /// Any directional key held
    pub fn any_direction(&self) -> bool {
        self.forward || self.back || self.left || self.right
    }

    /// (forward, right) axes in -1..=1
    pub fn axes(&self) -> (f32, f32) {
        let fwd = self.forward as i32 - self.back as i32;
        let side = self.right as i32 - self.left as i32;
        (fwd as f32, side as f32)
    }
}

/// Discrete phase change requested by the UI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseRequest {
    InitiateDrop,
    DeployParachute,
    Reset,
    NextLevel,
}

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Normalised pointer position, both axes in -1..=1 (skydive steering)
    pub pointer: Vec2,
    /// Look rotation this tick in radians (x = yaw right, y = pitch down)
    pub look_delta: Vec2,
    pub keys: MovementKeys,
    /// Trigger pressed this tick
    pub fire: bool,
    /// Scan key pressed this tick
    pub scan: bool,
    /// Reload key pressed this tick
    pub reload: bool,
    pub request: Option<PhaseRequest>,
}

impl TickInput {
    /// Pointer clamped to the unit square
    pub fn steering(&self) -> Vec2 {
        self.pointer.clamp(Vec2::NEG_ONE, Vec2::ONE)
    }

    /// Clear one-shot actions after they were consumed by a substep
    pub fn clear_one_shots(&mut self) {
        self.fire = false;
        self.scan = false;
        self.reload = false;
        self.request = None;
        self.look_delta = Vec2::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axes_cancel() {
        let keys = MovementKeys {
            forward: true,
            back: true,
            right: true,
            ..Default::default()
        };
        assert_eq!(keys.axes(), (0.0, 1.0));
        assert!(keys.any_direction());
        assert!(!MovementKeys::default().any_direction());
    }

    #[test]
    fn test_steering_clamped() {
        let input = TickInput {
            pointer: Vec2::new(3.0, -0.5),
            ..Default::default()
        };
        assert_eq!(input.steering(), Vec2::new(1.0, -0.5));
    }

    #[test]
    fn test_clear_one_shots_keeps_held_keys() {
        let mut input = TickInput {
            fire: true,
            request: Some(PhaseRequest::Reset),
            keys: MovementKeys {
                forward: true,
                ..Default::default()
            },
            ..Default::default()
        };
        input.clear_one_shots();
        assert!(!input.fire);
        assert!(input.request.is_none());
        assert!(input.keys.forward);
    }
}
