//! Ambient world props: floating islands, atmospheric particles, air traffic
//!
//! Particles and traffic keep moving after generation; `advance` is called
//! once per tick with the frame delta.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::layout::Placement;
use crate::consts::SKY_CEILING;
use crate::levels::Rgb;

/// Island mesh style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IslandShape {
    /// Flat platform (urban levels)
    Slab,
    /// Irregular rock
    Rock,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FloatingIsland {
    pub placement: Placement,
    pub shape: IslandShape,
    /// Draws a falling-water column under the island
    pub waterfall: bool,
}

/// Drifting dust/snow/ash mote
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AtmosphericParticle {
    pub position: Vec3,
    /// Units per second
    pub velocity: Vec3,
    /// Base size (0-1), multiplied by the field's scale factor
    pub scale: f32,
}

/// All atmospheric particles of a level
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AtmosphereField {
    pub particles: Vec<AtmosphericParticle>,
    /// Biome-dependent size multiplier (snow flakes are bigger)
    pub scale_factor: f32,
}

impl AtmosphereField {
    /// Drift particles, wrapping vertically between the ground and the sky ceiling
    pub fn advance(&mut self, dt: f32) {
        for p in &mut self.particles {
            p.position += p.velocity * dt;
            if p.position.y < 0.0 {
                p.position.y = SKY_CEILING;
            }
            if p.position.y > SKY_CEILING {
                p.position.y = 0.0;
            }
        }
    }
}

/// Number of altitude lanes air traffic is spread over
pub const TRAFFIC_LANES: u32 = 5;
/// Altitude of the lowest traffic lane
pub const TRAFFIC_BASE_ALTITUDE: f32 = 100.0;
/// Vertical spacing between lanes
pub const TRAFFIC_LANE_SPACING: f32 = 150.0;

/// One vehicle orbiting the city
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TrafficCar {
    pub lane: u32,
    pub radius: f32,
    /// Current orbit angle (radians)
    pub angle: f32,
    /// Angular speed factor
    pub speed: f32,
    /// Height jitter within the lane
    pub y_offset: f32,
}

impl TrafficCar {
    pub fn altitude(&self) -> f32 {
        TRAFFIC_BASE_ALTITUDE + self.lane as f32 * TRAFFIC_LANE_SPACING + self.y_offset
    }
}

/// A stream of cars sharing an orbit plane orientation and colour
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrafficStream {
    /// Stream rotation about the Y axis
    pub yaw: f32,
    pub color: Rgb,
    pub cars: Vec<TrafficCar>,
}

impl TrafficStream {
    pub fn advance(&mut self, dt: f32) {
        for car in &mut self.cars {
            car.angle = crate::normalize_angle(car.angle + car.speed * dt * 0.1);
        }
    }

    /// World-space placement of a car (stretched along its heading)
    pub fn car_placement(&self, car: &TrafficCar) -> Placement {
        let local = Vec3::new(car.angle.cos() * car.radius, car.altitude(), car.angle.sin() * car.radius);
        let (s, c) = self.yaw.sin_cos();
        let position = Vec3::new(local.x * c + local.z * s, local.y, -local.x * s + local.z * c);
        Placement::new(position, Vec3::new(4.0, 1.0, 1.0), Vec3::new(0.0, self.yaw - car.angle, 0.0))
    }

    pub fn placements(&self) -> Vec<Placement> {
        self.cars.iter().map(|c| self.car_placement(c)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_particles_wrap_vertically() {
        let mut field = AtmosphereField {
            particles: vec![
                AtmosphericParticle {
                    position: Vec3::new(0.0, 1.0, 0.0),
                    velocity: Vec3::new(0.0, -10.0, 0.0),
                    scale: 1.0,
                },
                AtmosphericParticle {
                    position: Vec3::new(0.0, SKY_CEILING - 1.0, 0.0),
                    velocity: Vec3::new(0.0, 10.0, 0.0),
                    scale: 1.0,
                },
            ],
            scale_factor: 0.3,
        };
        field.advance(0.5);
        assert_eq!(field.particles[0].position.y, SKY_CEILING);
        assert_eq!(field.particles[1].position.y, 0.0);
    }

    #[test]
    fn test_car_stays_on_orbit() {
        let car = TrafficCar {
            lane: 2,
            radius: 500.0,
            angle: 0.3,
            speed: 0.5,
            y_offset: 10.0,
        };
        let mut stream = TrafficStream {
            yaw: std::f32::consts::FRAC_PI_2,
            color: Rgb(0x3b82f6),
            cars: vec![car],
        };
        for _ in 0..100 {
            stream.advance(0.1);
        }
        let p = stream.car_placement(&stream.cars[0]);
        assert!((p.radial_distance() - 500.0).abs() < 1e-2);
        assert_eq!(p.position.y, 100.0 + 2.0 * 150.0 + 10.0);
        assert!(stream.cars[0].angle != 0.3);
    }
}
