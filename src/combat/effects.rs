//! Visual-only shot effects: tracer projectiles and impact markers

use glam::Vec3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projectile {
    pub id: u32,
    pub position: Vec3,
    pub velocity: Vec3,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Impact {
    pub id: u32,
    pub position: Vec3,
    /// Session time the marker disappears
    pub expires_at: f64,
}

#[derive(Debug, Clone, Default)]
pub struct CombatEffects {
    pub projectiles: Vec<Projectile>,
    /// Oldest first
    pub impacts: Vec<Impact>,
    next_id: u32,
}

impl CombatEffects {
    fn next_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        id
    }

    pub fn spawn_projectile(&mut self, position: Vec3, velocity: Vec3) {
        let id = self.next_id();
        self.projectiles.push(Projectile {
            id,
            position,
            velocity,
        });
    }

    /// Add an impact marker, dropping the oldest beyond `max_impacts`
    pub fn spawn_impact(&mut self, position: Vec3, now: f64, lifetime: f32, max_impacts: usize) {
        let id = self.next_id();
        self.impacts.push(Impact {
            id,
            position,
            expires_at: now + lifetime as f64,
        });
        if self.impacts.len() > max_impacts {
            let excess = self.impacts.len() - max_impacts;
            self.impacts.drain(..excess);
        }
    }

    /// Move projectiles, cull those out of range of the camera and expire impacts
    pub fn update(&mut self, camera: Vec3, now: f64, dt: f32, range: f32) {
        for p in &mut self.projectiles {
            p.position += p.velocity * dt;
        }
        let range_sq = range * range;
        self.projectiles
            .retain(|p| p.position.distance_squared(camera) <= range_sq);
        self.impacts.retain(|i| i.expires_at > now);
    }

    pub fn clear(&mut self) {
        self.projectiles.clear();
        self.impacts.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_projectile_culled_past_range() {
        let mut fx = CombatEffects::default();
        fx.spawn_projectile(Vec3::ZERO, Vec3::new(0.0, 0.0, -200.0));
        fx.update(Vec3::ZERO, 0.0, 1.0, 300.0);
        assert_eq!(fx.projectiles.len(), 1);
        assert_eq!(fx.projectiles[0].position.z, -200.0);
        fx.update(Vec3::ZERO, 0.0, 1.0, 300.0);
        assert!(fx.projectiles.is_empty());
    }

    #[test]
    fn test_range_measured_from_camera() {
        let mut fx = CombatEffects::default();
        fx.spawn_projectile(Vec3::ZERO, Vec3::new(0.0, 0.0, -200.0));
        fx.update(Vec3::new(0.0, 0.0, -350.0), 0.0, 1.0, 300.0);
        assert_eq!(fx.projectiles.len(), 1);
    }

    #[test]
    fn test_impacts_expire() {
        let mut fx = CombatEffects::default();
        fx.spawn_impact(Vec3::ONE, 1.0, 0.2, 10);
        fx.update(Vec3::ZERO, 1.1, 0.1, 300.0);
        assert_eq!(fx.impacts.len(), 1);
        fx.update(Vec3::ZERO, 1.25, 0.1, 300.0);
        assert!(fx.impacts.is_empty());
    }

    #[test]
    fn test_impact_cap_drops_oldest() {
        let mut fx = CombatEffects::default();
        for i in 0..15 {
            fx.spawn_impact(Vec3::new(i as f32, 0.0, 0.0), 0.0, 0.2, 10);
        }
        assert_eq!(fx.impacts.len(), 10);
        assert_eq!(fx.impacts[0].position.x, 5.0);
        assert_eq!(fx.impacts[9].position.x, 14.0);
    }
}
