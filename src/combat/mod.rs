//! Ground combat: hit-scan shots against the target registry
//!
//! Hits are decided instantly by a ray from the camera. Projectiles and
//! impact markers are visuals only and never affect the outcome.

pub mod effects;
pub mod ray;
pub mod targets;

pub use effects::{CombatEffects, Impact, Projectile};
pub use ray::{Aabb, Ray};
pub use targets::{HitKind, RayHit, TargetRegistry};

use glam::Vec3;

use crate::sim::camera::CameraRig;
use crate::sim::state::{GamePhase, GameState};
use crate::tuning::CombatTuning;

/// Muzzle position in camera space (right, down, forward)
pub const MUZZLE_OFFSET: Vec3 = Vec3::new(0.2, -0.2, -0.5);

/// Result of one trigger pull in ground combat
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shot {
    pub hit: Option<RayHit>,
    /// Whether a drone died from this shot
    pub killed: bool,
    /// Whether a round came out of the magazine
    pub spent: bool,
}

/// Fire the weapon from the camera.
///
/// Ammo bookkeeping goes through the store and never blocks the shot: the
/// ray test, kill and tracer happen on every trigger pull in ground combat.
/// Returns `None` outside ground combat.
pub fn fire(
    state: &mut GameState,
    camera: &CameraRig,
    targets: &mut TargetRegistry,
    effects: &mut CombatEffects,
    tuning: &CombatTuning,
) -> Option<Shot> {
    if state.phase != GamePhase::GroundCombat {
        return None;
    }
    let spent = state.fire_weapon();
    if !spent {
        log::debug!("Fired with an empty magazine");
    }

    targets.sync_enemies(&state.enemies);
    let ray = Ray::new(camera.position, camera.forward());
    let hit = targets.resolve_shot(&ray, tuning.world_hit_range);

    let mut killed = false;
    if let Some(hit) = hit {
        effects.spawn_impact(hit.point, state.time_secs, tuning.impact_lifetime, tuning.max_impacts);
        if let HitKind::Enemy(id) = hit.kind {
            killed = state.kill_enemy(id);
            if killed {
                log::info!("Drone {} down ({} total)", id, state.enemies_defeated);
            }
        }
    }

    effects.spawn_projectile(
        camera.to_world(MUZZLE_OFFSET),
        ray.direction * tuning.projectile_speed,
    );

    Some(Shot { hit, killed, spent })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn combat_state() -> GameState {
        let mut state = GameState::new(5);
        state.set_phase(GamePhase::GroundCombat);
        state
    }

    fn camera_at(position: Vec3) -> CameraRig {
        CameraRig {
            position,
            ..Default::default()
        }
    }

    #[test]
    fn test_fire_kills_drone_in_sight() {
        let mut state = combat_state();
        for e in &mut state.enemies {
            e.position.x += 1000.0;
        }
        state.enemies[2].position = Vec3::new(0.0, 4.5, -30.0);
        let tuning = CombatTuning::default();
        let mut targets = TargetRegistry::new(tuning.enemy_radius);
        let mut effects = CombatEffects::default();

        let shot = fire(&mut state, &camera_at(Vec3::new(0.0, 4.5, 0.0)), &mut targets, &mut effects, &tuning)
            .unwrap();
        assert!(shot.killed);
        assert!(shot.spent);
        assert_eq!(shot.hit.map(|h| h.kind), Some(HitKind::Enemy(2)));
        assert_eq!(state.enemies_defeated, 1);
        assert_eq!(state.score, 500);
        assert_eq!(state.ammo, 29);
        assert_eq!(effects.projectiles.len(), 1);
        assert_eq!(effects.impacts.len(), 1);

        // Same line again: the drone is gone, nothing else there
        let shot = fire(&mut state, &camera_at(Vec3::new(0.0, 4.5, 0.0)), &mut targets, &mut effects, &tuning)
            .unwrap();
        assert!(!shot.killed);
        assert!(shot.hit.is_none());
        assert_eq!(state.score, 500);
    }

    #[test]
    fn test_projectile_leaves_muzzle_along_view() {
        let mut state = combat_state();
        state.enemies.clear();
        let tuning = CombatTuning::default();
        let mut targets = TargetRegistry::new(tuning.enemy_radius);
        let mut effects = CombatEffects::default();
        let cam = camera_at(Vec3::new(0.0, 4.5, 0.0));
        fire(&mut state, &cam, &mut targets, &mut effects, &tuning);

        let p = effects.projectiles[0];
        assert!((p.position - Vec3::new(0.2, 4.3, -0.5)).length() < 1e-5);
        assert!((p.velocity - Vec3::new(0.0, 0.0, -200.0)).length() < 1e-3);
    }

    #[test]
    fn test_empty_magazine_still_resolves_shot() {
        let mut state = combat_state();
        for e in &mut state.enemies {
            e.position.x += 1000.0;
        }
        state.enemies[0].position = Vec3::new(0.0, 4.5, -30.0);
        state.ammo = 0;
        let tuning = CombatTuning::default();
        let mut targets = TargetRegistry::new(tuning.enemy_radius);
        let mut effects = CombatEffects::default();

        let shot = fire(&mut state, &camera_at(Vec3::new(0.0, 4.5, 0.0)), &mut targets, &mut effects, &tuning)
            .unwrap();
        assert!(!shot.spent);
        assert!(shot.killed);
        assert!(!state.enemies[0].alive);
        assert_eq!(state.ammo, 0);
        assert_eq!(effects.projectiles.len(), 1);
        assert!(state.drain_events().contains(&crate::sim::state::GameEvent::DryFire));
    }

    #[test]
    fn test_no_fire_outside_ground_combat() {
        let mut state = GameState::new(5);
        let tuning = CombatTuning::default();
        let mut targets = TargetRegistry::new(tuning.enemy_radius);
        let mut effects = CombatEffects::default();
        assert!(fire(&mut state, &CameraRig::default(), &mut targets, &mut effects, &tuning).is_none());
        assert_eq!(state.ammo, 30);
    }
}
