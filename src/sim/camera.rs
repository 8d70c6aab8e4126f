//! Camera rig shared by the skydive chase view and the first-person view
//!
//! Orientation is stored as yaw/pitch. Yaw 0 looks down -Z, positive yaw
//! turns left, positive pitch looks up.

use glam::{Quat, Vec3};

use crate::ease_factor;
use crate::tuning::{GroundTuning, SkydiveTuning};

/// Chase offset behind a freefalling player
pub const FREEFALL_OFFSET: Vec3 = Vec3::new(0.0, 3.5, 7.0);
/// Chase offset with the canopy open (wider view)
pub const PARACHUTE_OFFSET: Vec3 = Vec3::new(0.0, 8.0, 15.0);

#[derive(Debug, Clone, PartialEq)]
pub struct CameraRig {
    pub position: Vec3,
    pub look_target: Vec3,
    pub yaw: f32,
    pub pitch: f32,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            look_target: Vec3::NEG_Z,
            yaw: 0.0,
            pitch: 0.0,
        }
    }
}

impl CameraRig {
    pub fn orientation(&self) -> Quat {
        Quat::from_rotation_y(self.yaw) * Quat::from_rotation_x(self.pitch)
    }

    /// Unit look direction
    pub fn forward(&self) -> Vec3 {
        self.orientation() * Vec3::NEG_Z
    }

    /// Look direction projected on the ground plane
    pub fn flat_forward(&self) -> Vec3 {
        let (s, c) = self.yaw.sin_cos();
        Vec3::new(-s, 0.0, -c)
    }

    /// Right vector on the ground plane
    pub fn flat_right(&self) -> Vec3 {
        let f = self.flat_forward();
        Vec3::new(-f.z, 0.0, f.x)
    }

    /// Camera-space offset to world space
    pub fn to_world(&self, local: Vec3) -> Vec3 {
        self.position + self.orientation() * local
    }

    /// Point the camera at `target`, deriving yaw/pitch
    pub fn look_at(&mut self, target: Vec3) {
        self.look_target = target;
        let dir = target - self.position;
        let len = dir.length();
        if len <= f32::EPSILON {
            return;
        }
        self.yaw = (-dir.x).atan2(-dir.z);
        self.pitch = (dir.y / len).clamp(-1.0, 1.0).asin();
    }

    /// Desired chase position for the skydiver. Fast descent pulls the
    /// camera up and closer.
    pub fn chase_offset(parachute: bool, velocity: Vec3) -> Vec3 {
        let mut offset = if parachute {
            PARACHUTE_OFFSET
        } else {
            FREEFALL_OFFSET
        };
        offset.y += velocity.y * 0.02;
        offset.z -= velocity.y * 0.05;
        offset
    }

    /// Ease toward the chase position and look slightly ahead of the player
    pub fn follow_skydiver(
        &mut self,
        player: Vec3,
        velocity: Vec3,
        parachute: bool,
        tuning: &SkydiveTuning,
        dt: f32,
    ) {
        let desired = player + Self::chase_offset(parachute, velocity);
        self.position = self
            .position
            .lerp(desired, ease_factor(tuning.camera_rate, dt));
        let lead = Vec3::new(velocity.x, 0.0, velocity.z) * 0.5;
        self.look_at(player + lead);
    }

    /// Jump straight to the chase position (new attempt)
    pub fn snap_to_skydiver(&mut self, player: Vec3, parachute: bool) {
        self.position = player + Self::chase_offset(parachute, Vec3::ZERO);
        self.look_at(player);
    }

    /// Apply mouse look, pitch clamped to avoid flipping
    pub fn apply_look(&mut self, yaw_delta: f32, pitch_delta: f32, max_pitch: f32) {
        self.yaw = crate::normalize_angle(self.yaw - yaw_delta);
        self.pitch = (self.pitch - pitch_delta).clamp(-max_pitch, max_pitch);
    }

    /// First-person follow: X/Z locked to the player, height eased
    pub fn follow_ground(&mut self, player: Vec3, crouching: bool, tuning: &GroundTuning, dt: f32) {
        let height = if crouching {
            tuning.crouch_height
        } else {
            tuning.stand_height
        };
        let target_y = player.y + height;
        self.position.x = player.x;
        self.position.z = player.z;
        self.position.y += (target_y - self.position.y) * ease_factor(tuning.camera_rate, dt);
        self.look_target = self.position + self.forward();
    }
}
