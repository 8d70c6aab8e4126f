//! Ray primitives for hit-scan queries

use glam::Vec3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    /// Unit direction
    pub direction: Vec3,
}

impl Ray {
    /// Build a ray; the direction is normalised (zero falls back to -Z)
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.try_normalize().unwrap_or(Vec3::NEG_Z),
        }
    }

    pub fn point_at(&self, distance: f32) -> Vec3 {
        self.origin + self.direction * distance
    }

    /// Distance to the nearest sphere intersection in front of the origin.
    /// An origin inside the sphere hits at distance 0.
    pub fn sphere(&self, center: Vec3, radius: f32) -> Option<f32> {
        let oc = self.origin - center;
        let b = oc.dot(self.direction);
        let c = oc.length_squared() - radius * radius;
        if c <= 0.0 {
            return Some(0.0);
        }
        if b > 0.0 {
            return None;
        }
        let disc = b * b - c;
        if disc < 0.0 {
            return None;
        }
        Some(-b - disc.sqrt())
    }

    /// Distance to the horizontal plane at `height`, hit from either side
    pub fn plane_y(&self, height: f32) -> Option<f32> {
        if self.direction.y.abs() < 1e-6 {
            return None;
        }
        let t = (height - self.origin.y) / self.direction.y;
        (t >= 0.0).then_some(t)
    }

    /// Slab test against an axis-aligned box
    pub fn aabb(&self, aabb: &Aabb) -> Option<f32> {
        if aabb.contains(self.origin) {
            return Some(0.0);
        }
        let inv = self.direction.recip();
        let t0 = (aabb.min - self.origin) * inv;
        let t1 = (aabb.max - self.origin) * inv;
        // NaN from 0 * inf on an axis-parallel ray is dropped by min/max
        let near = t0.min(t1).max_element();
        let far = t0.max(t1).min_element();
        if far < near.max(0.0) {
            return None;
        }
        Some(near.max(0.0))
    }
}

/// Axis-aligned box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self {
            min: min.min(max),
            max: min.max(max),
        }
    }

    pub fn contains(&self, p: Vec3) -> bool {
        p.cmpge(self.min).all() && p.cmple(self.max).all()
    }
}

impl From<(Vec3, Vec3)> for Aabb {
    fn from((min, max): (Vec3, Vec3)) -> Self {
        Self::new(min, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sphere_hit_and_miss() {
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        let t = ray.sphere(Vec3::new(0.0, 0.0, -10.0), 1.5).unwrap();
        assert!((t - 8.5).abs() < 1e-5);
        assert!(ray.sphere(Vec3::new(0.0, 2.0, -10.0), 1.5).is_none());
        // Behind the origin
        assert!(ray.sphere(Vec3::new(0.0, 0.0, 10.0), 1.5).is_none());
        assert_eq!(ray.sphere(Vec3::new(0.0, 0.0, -1.0), 1.5), Some(0.0));
    }

    #[test]
    fn test_plane_from_above_only_when_looking_down() {
        let down = Ray::new(Vec3::new(0.0, 3.0, 0.0), Vec3::new(0.0, -1.0, -1.0));
        let t = down.plane_y(0.0).unwrap();
        assert!((down.point_at(t).y).abs() < 1e-5);
        assert!((down.point_at(t).z + 3.0).abs() < 1e-4);

        let level = Ray::new(Vec3::new(0.0, 3.0, 0.0), Vec3::NEG_Z);
        assert!(level.plane_y(0.0).is_none());
        let up = Ray::new(Vec3::new(0.0, 3.0, 0.0), Vec3::Y);
        assert!(up.plane_y(0.0).is_none());
    }

    #[test]
    fn test_aabb_axis_parallel() {
        let b = Aabb::new(Vec3::new(-1.0, 0.0, -20.0), Vec3::new(1.0, 10.0, -10.0));
        let ray = Ray::new(Vec3::new(0.0, 5.0, 0.0), Vec3::NEG_Z);
        assert!((ray.aabb(&b).unwrap() - 10.0).abs() < 1e-5);

        let beside = Ray::new(Vec3::new(3.0, 5.0, 0.0), Vec3::NEG_Z);
        assert!(beside.aabb(&b).is_none());

        let away = Ray::new(Vec3::new(0.0, 5.0, 0.0), Vec3::Z);
        assert!(away.aabb(&b).is_none());
    }

    #[test]
    fn test_aabb_inside_hits_at_zero() {
        let b = Aabb::new(Vec3::splat(1.0), Vec3::splat(-1.0));
        assert!(b.contains(Vec3::ZERO));
        let ray = Ray::new(Vec3::ZERO, Vec3::new(1.0, 1.0, 0.0));
        assert_eq!(ray.aabb(&b), Some(0.0));
    }
}
