//! Target registry: everything a shot can hit
//!
//! Drones are spheres, the ground is the plane y = 0 and structures are
//! axis-aligned boxes taken from the generated layout.

use glam::Vec3;

use super::ray::{Aabb, Ray};
use crate::sim::state::Enemy;
use crate::world::WorldLayout;

/// Height of the ground plane shots can hit
pub const GROUND_HEIGHT: f32 = 0.0;

/// What a ray hit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitKind {
    /// Drone with the given id
    Enemy(u32),
    Ground,
    /// Index into the registry's structure boxes
    Structure(usize),
}

impl HitKind {
    pub fn is_world(self) -> bool {
        !matches!(self, HitKind::Enemy(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub kind: HitKind,
    /// Distance along the ray
    pub distance: f32,
    pub point: Vec3,
}

#[derive(Debug, Clone, Default)]
pub struct TargetRegistry {
    enemies: Vec<(u32, Vec3)>,
    structures: Vec<Aabb>,
    enemy_radius: f32,
}

impl TargetRegistry {
    pub fn new(enemy_radius: f32) -> Self {
        Self {
            enemies: Vec::new(),
            structures: Vec::new(),
            enemy_radius,
        }
    }

    /// Registry with the solid structures of a generated world
    pub fn from_layout(layout: &WorldLayout, enemy_radius: f32) -> Self {
        let mut registry = Self::new(enemy_radius);
        registry.set_structures(layout);
        registry
    }

    pub fn set_structures(&mut self, layout: &WorldLayout) {
        self.structures = layout.solid_bounds().into_iter().map(Aabb::from).collect();
        log::debug!("Target registry: {} structure boxes", self.structures.len());
    }

    /// Replace the drone spheres with the living drones
    pub fn sync_enemies(&mut self, enemies: &[Enemy]) {
        self.enemies.clear();
        self.enemies
            .extend(enemies.iter().filter(|e| e.alive).map(|e| (e.id, e.position)));
    }

    pub fn enemy_count(&self) -> usize {
        self.enemies.len()
    }

    pub fn structure_count(&self) -> usize {
        self.structures.len()
    }

    /// Every intersection along the ray, nearest first
    pub fn raycast_all(&self, ray: &Ray) -> Vec<RayHit> {
        let mut hits = Vec::new();
        let mut push = |kind, distance: f32| {
            hits.push(RayHit {
                kind,
                distance,
                point: ray.point_at(distance),
            })
        };

        for &(id, center) in &self.enemies {
            if let Some(t) = ray.sphere(center, self.enemy_radius) {
                push(HitKind::Enemy(id), t);
            }
        }
        if let Some(t) = ray.plane_y(GROUND_HEIGHT) {
            push(HitKind::Ground, t);
        }
        for (i, aabb) in self.structures.iter().enumerate() {
            if let Some(t) = ray.aabb(aabb) {
                push(HitKind::Structure(i), t);
            }
        }

        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        hits
    }

    /// Resolve a shot: the nearest hit that is either a drone (any distance)
    /// or world geometry within `world_range`. Far walls don't stop bullets.
    pub fn resolve_shot(&self, ray: &Ray, world_range: f32) -> Option<RayHit> {
        self.raycast_all(ray)
            .into_iter()
            .find(|hit| !hit.kind.is_world() || hit.distance < world_range)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enemy(id: u32, position: Vec3) -> Enemy {
        Enemy {
            id,
            position,
            alive: true,
        }
    }

    fn registry_with_wall(wall_z: f32) -> TargetRegistry {
        let mut r = TargetRegistry::new(1.5);
        r.structures
            .push(Aabb::new(Vec3::new(-5.0, 0.0, wall_z - 1.0), Vec3::new(5.0, 20.0, wall_z)));
        r
    }

    #[test]
    fn test_enemy_hit() {
        let mut r = TargetRegistry::new(1.5);
        r.sync_enemies(&[enemy(3, Vec3::new(0.0, 4.5, -40.0))]);
        let ray = Ray::new(Vec3::new(0.0, 4.5, 0.0), Vec3::NEG_Z);
        let hit = r.resolve_shot(&ray, 100.0).unwrap();
        assert_eq!(hit.kind, HitKind::Enemy(3));
        assert!((hit.distance - 38.5).abs() < 1e-4);
    }

    #[test]
    fn test_dead_enemies_not_registered() {
        let mut r = TargetRegistry::new(1.5);
        let mut dead = enemy(1, Vec3::new(0.0, 4.5, -40.0));
        dead.alive = false;
        r.sync_enemies(&[dead, enemy(2, Vec3::new(50.0, 4.5, 0.0))]);
        assert_eq!(r.enemy_count(), 1);
        let ray = Ray::new(Vec3::new(0.0, 4.5, 0.0), Vec3::NEG_Z);
        assert!(r.resolve_shot(&ray, 100.0).is_none());
    }

    #[test]
    fn test_near_wall_blocks_enemy() {
        let mut r = registry_with_wall(-20.0);
        r.sync_enemies(&[enemy(0, Vec3::new(0.0, 4.5, -40.0))]);
        let ray = Ray::new(Vec3::new(0.0, 4.5, 0.0), Vec3::NEG_Z);
        let hit = r.resolve_shot(&ray, 100.0).unwrap();
        assert_eq!(hit.kind, HitKind::Structure(0));
        assert!((hit.point.z + 20.0).abs() < 1e-4);
    }

    #[test]
    fn test_far_wall_ignored() {
        let mut r = registry_with_wall(-150.0);
        let ray = Ray::new(Vec3::new(0.0, 4.5, 0.0), Vec3::NEG_Z);
        assert!(r.resolve_shot(&ray, 100.0).is_none());

        // A drone behind a far wall is still hit
        r.sync_enemies(&[enemy(9, Vec3::new(0.0, 4.5, -200.0))]);
        assert_eq!(r.resolve_shot(&ray, 100.0).unwrap().kind, HitKind::Enemy(9));
    }

    #[test]
    fn test_ground_hit_when_aiming_down() {
        let r = TargetRegistry::new(1.5);
        let ray = Ray::new(Vec3::new(0.0, 4.5, 0.0), Vec3::new(0.0, -1.0, -2.0));
        let hit = r.resolve_shot(&ray, 100.0).unwrap();
        assert_eq!(hit.kind, HitKind::Ground);
        assert!(hit.point.y.abs() < 1e-4);
    }

    #[test]
    fn test_raycast_all_sorted() {
        let mut r = registry_with_wall(-150.0);
        r.sync_enemies(&[
            enemy(0, Vec3::new(0.0, 4.5, -60.0)),
            enemy(1, Vec3::new(0.0, 4.5, -30.0)),
        ]);
        let ray = Ray::new(Vec3::new(0.0, 4.5, 0.0), Vec3::NEG_Z);
        let kinds: Vec<_> = r.raycast_all(&ray).into_iter().map(|h| h.kind).collect();
        assert_eq!(kinds, vec![HitKind::Enemy(1), HitKind::Enemy(0), HitKind::Structure(0)]);
    }
}
