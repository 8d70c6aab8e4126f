//! Data-driven game balance
//!
//! Every physics and combat constant lives here so designers can tweak a JSON
//! file instead of recompiling. Missing fields fall back to the defaults, so a
//! tuning file only needs the values it overrides.

use serde::{Deserialize, Serialize};

/// Skydiving (freefall + parachute) physics
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SkydiveTuning {
    /// Vertical acceleration (units/s², negative is down)
    pub gravity: f32,
    pub freefall_drag: f32,
    /// Parachute brakes the descent hard
    pub parachute_drag: f32,
    /// Horizontal target speed at full pointer deflection
    pub freefall_authority: f32,
    pub parachute_authority: f32,
    /// Exponential smoothing rate toward the steering target (1/s)
    pub steering_rate: f32,
    /// Downward kick applied when flying through a ring in freefall
    pub ring_kick: f32,
    /// Touchdown height
    pub landing_height: f32,
    /// Descent speed above which touchdown is a crash
    pub crash_speed: f32,
    /// Height the player snaps to after a soft landing
    pub ground_snap: f32,
    /// Parachute may only deploy below this altitude
    pub parachute_ceiling: f32,
    /// Camera follow smoothing rate (1/s)
    pub camera_rate: f32,
}

impl Default for SkydiveTuning {
    fn default() -> Self {
        Self {
            gravity: -9.81,
            freefall_drag: 0.02,
            parachute_drag: 1.5,
            freefall_authority: 40.0,
            parachute_authority: 15.0,
            steering_rate: 3.0,
            ring_kick: 20.0,
            landing_height: 10.0,
            crash_speed: 25.0,
            ground_snap: 2.0,
            parachute_ceiling: 1500.0,
            camera_rate: 5.0,
        }
    }
}

/// First-person ground movement
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GroundTuning {
    /// Horizontal velocity damping (1/s)
    pub damping: f32,
    /// Damping while sliding (momentum lasts longer)
    pub slide_damping: f32,
    pub walk_speed: f32,
    pub sprint_speed: f32,
    /// One-shot velocity multiplier when a slide starts
    pub slide_boost: f32,
    pub floor_height: f32,
    pub stand_height: f32,
    pub crouch_height: f32,
    /// Camera height smoothing rate (1/s)
    pub camera_rate: f32,
    /// Maximum look pitch (radians)
    pub max_pitch: f32,
}

impl Default for GroundTuning {
    fn default() -> Self {
        Self {
            damping: 10.0,
            slide_damping: 2.0,
            walk_speed: 40.0,
            sprint_speed: 80.0,
            slide_boost: 1.8,
            floor_height: 2.0,
            stand_height: 2.5,
            crouch_height: 1.0,
            camera_rate: 10.0,
            max_pitch: 1.55,
        }
    }
}

/// Weapon and hit-scan settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatTuning {
    pub magazine: u32,
    /// Visual projectile speed (units/s)
    pub projectile_speed: f32,
    /// Projectiles farther than this from the camera are dropped
    pub projectile_range: f32,
    /// World geometry only counts as a hit within this distance
    pub world_hit_range: f32,
    /// Drone hit sphere radius
    pub enemy_radius: f32,
    /// Impact marker lifetime (seconds)
    pub impact_lifetime: f32,
    pub max_impacts: usize,
    /// Muzzle flash duration (seconds)
    pub shoot_flash: f32,
}

impl Default for CombatTuning {
    fn default() -> Self {
        Self {
            magazine: 30,
            projectile_speed: 200.0,
            projectile_range: 300.0,
            world_hit_range: 100.0,
            enemy_radius: 1.5,
            impact_lifetime: 0.2,
            max_impacts: 10,
            shoot_flash: 0.1,
        }
    }
}

/// Session rules: scoring, timers, spawn field
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionTuning {
    pub start_health: u32,
    pub ring_score: u64,
    pub kill_score: u64,
    /// Scan pulse duration (seconds)
    pub scan_duration: f64,
    /// Side length of the square patch drones spawn in
    pub enemy_field: f32,
    pub enemy_min_height: f32,
    pub enemy_max_height: f32,
}

impl Default for SessionTuning {
    fn default() -> Self {
        Self {
            start_health: 100,
            ring_score: 500,
            kill_score: 500,
            scan_duration: 2.0,
            enemy_field: 400.0,
            enemy_min_height: 5.0,
            enemy_max_height: 20.0,
        }
    }
}

/// Complete balance table
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub skydive: SkydiveTuning,
    pub ground: GroundTuning,
    pub combat: CombatTuning,
    pub session: SessionTuning,
}

impl Tuning {
    /// Parse a tuning table from JSON
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize to pretty JSON (handy for dumping the defaults)
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load a tuning file, falling back to defaults if it is missing or invalid
    pub fn load(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning from {}", path.display());
                    tuning
                }
                Err(e) => {
                    log::warn!("Invalid tuning file {}: {} - using defaults", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Could not read {}: {} - using defaults", path.display(), e);
                Self::default()
            }
        }
    }
}
