//! Procedural world generation
//!
//! Maps a level descriptor to placement lists without any precomputed assets.
//! The random source is injected: `seeded` gives reproducible layouts for tests
//! and replays, `from_entropy` keeps the default "new city every visit" feel.

use std::f32::consts::{PI, TAU};

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::ambient::{
    AtmosphereField, AtmosphericParticle, FloatingIsland, IslandShape, TRAFFIC_LANES, TrafficCar,
    TrafficStream,
};
use super::layout::{Placement, StructureClass, Structures, WorldLayout};
use crate::consts::{SKY_CEILING, WORLD_RANGE};
use crate::levels::{Biome, LevelDescriptor, Rgb};
use crate::sim::rings::ring_positions;

/// Urban structures start outside this radius (landing clear-zone)
pub const URBAN_INNER_RADIUS: f32 = 300.0;
/// Urban structures spread over this fraction of the world range
pub const URBAN_SPREAD: f32 = 0.6;
/// No structure is ever placed closer to the origin than this
pub const CLEAR_ZONE_RADIUS: f32 = 250.0;

/// Size-class thresholds for the urban classifier draw
pub const TOWER_THRESHOLD: f32 = 0.7;
pub const BLOCK_THRESHOLD: f32 = 0.3;

pub const FLOATING_ISLAND_COUNT: usize = 30;
pub const PARTICLE_COUNT: usize = 2000;
pub const CARS_PER_STREAM: usize = 400;
pub const MEGA_STRUCTURE_COUNT: usize = 4;
pub const ANCIENT_MACHINE_COUNT: usize = 12;

/// Procedural world generator over an injected random source
pub struct WorldGenerator<R: Rng = Pcg32> {
    rng: R,
}

impl WorldGenerator<Pcg32> {
    /// Reproducible generator
    pub fn seeded(seed: u64) -> Self {
        Self::new(Pcg32::seed_from_u64(seed))
    }

    /// Nondeterministic generator seeded from the thread RNG
    pub fn from_entropy() -> Self {
        Self::new(Pcg32::from_rng(&mut rand::rng()))
    }
}

impl<R: Rng> WorldGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Uniform sample in [0, 1)
    #[inline]
    fn unit(&mut self) -> f32 {
        self.rng.random::<f32>()
    }

    /// Uniform sample in [lo, hi)
    #[inline]
    fn span(&mut self, lo: f32, hi: f32) -> f32 {
        lo + self.unit() * (hi - lo)
    }

    /// Uniform sample in [-half, half)
    #[inline]
    fn centered(&mut self, half: f32) -> f32 {
        (self.unit() - 0.5) * 2.0 * half
    }

    /// Generate the full world for a level entry.
    ///
    /// `scanning` only flips the wireframe flag; placement never depends on it.
    pub fn generate(&mut self, level: &LevelDescriptor, scanning: bool) -> WorldLayout {
        let structures = self.structures(level.biome, level.density);
        let islands = self.floating_islands(level.biome);
        let atmosphere = self.atmosphere(level.biome);
        let traffic = self.traffic(level.biome);
        let mega_structures = self.mega_structures(level.biome);
        let ancient_machines = self.ancient_machines();

        log::info!(
            "Generated {} ({}): {} structures, {} islands, {} traffic streams, {} mega structures",
            level.name,
            level.biome.as_str(),
            structures.len(),
            islands.len(),
            traffic.len(),
            mega_structures.len()
        );

        WorldLayout {
            level_id: level.id,
            biome: level.biome,
            wireframe: scanning,
            structures,
            islands,
            atmosphere,
            traffic,
            mega_structures,
            ancient_machines,
            rings: ring_positions(level.ring_complexity),
        }
    }

    /// City blocks or biome vegetation/rocks around the landing zone
    pub fn structures(&mut self, biome: Biome, density: u32) -> Structures {
        let mut out = Structures::default();

        for _ in 0..density {
            let angle = self.unit() * TAU;
            let r = if biome == Biome::Urban {
                self.unit() * WORLD_RANGE * URBAN_SPREAD + URBAN_INNER_RADIUS
            } else {
                // sqrt bias keeps the centre dense and the edges sparse
                self.unit().sqrt() * WORLD_RANGE
            };

            let x = angle.cos() * r;
            let z = angle.sin() * r;
            if (x * x + z * z).sqrt() < CLEAR_ZONE_RADIUS {
                continue;
            }

            let yaw = self.unit() * PI;

            if biome == Biome::Urban {
                let roll = self.unit();
                let (class, (h_lo, h_hi), (f_lo, f_hi)) = if roll > TOWER_THRESHOLD {
                    (StructureClass::Tower, (100.0, 500.0), (20.0, 40.0))
                } else if roll > BLOCK_THRESHOLD {
                    (StructureClass::Block, (50.0, 200.0), (30.0, 70.0))
                } else {
                    (StructureClass::Connector, (20.0, 70.0), (15.0, 30.0))
                };
                let height = self.span(h_lo, h_hi);
                let footprint = self.span(f_lo, f_hi);
                out.push(
                    class,
                    Placement::new(
                        Vec3::new(x, height / 2.0, z),
                        Vec3::new(footprint, height, footprint),
                        Vec3::new(0.0, yaw, 0.0),
                    ),
                );
            } else {
                let mut height = self.span(10.0, 110.0);
                let mut footprint = self.span(5.0, 25.0);
                match biome {
                    Biome::Snow => height *= 2.0,
                    Biome::Jungle => footprint *= 0.5,
                    _ => {}
                }
                let mut y = height / 2.0;
                let mut rotation = Vec3::new(0.0, yaw, 0.0);
                if biome == Biome::Alien {
                    y += self.span(50.0, 150.0);
                    rotation = Vec3::new(self.span(0.0, 3.0), self.span(0.0, 3.0), self.span(0.0, 3.0));
                }
                out.push(
                    StructureClass::Nature,
                    Placement::new(
                        Vec3::new(x, y, z),
                        Vec3::new(footprint, height, footprint),
                        rotation,
                    ),
                );
            }
        }

        out
    }

    /// Rock islands hanging in the drop corridor
    pub fn floating_islands(&mut self, biome: Biome) -> Vec<FloatingIsland> {
        let shape = if biome == Biome::Urban {
            IslandShape::Slab
        } else {
            IslandShape::Rock
        };

        (0..FLOATING_ISLAND_COUNT)
            .map(|_| {
                let position = Vec3::new(self.centered(1500.0), self.span(500.0, 2500.0), self.centered(1500.0));
                let scale = self.span(20.0, 100.0);
                let rotation = Vec3::new(self.unit() * PI, self.unit() * PI, self.unit() * PI);
                FloatingIsland {
                    placement: Placement::new(position, Vec3::splat(scale), rotation),
                    shape,
                    waterfall: self.unit() > 0.5,
                }
            })
            .collect()
    }

    /// Drifting motes filling the sky column
    pub fn atmosphere(&mut self, biome: Biome) -> AtmosphereField {
        let particles = (0..PARTICLE_COUNT)
            .map(|_| AtmosphericParticle {
                position: Vec3::new(self.centered(1000.0), self.unit() * SKY_CEILING, self.centered(1000.0)),
                velocity: Vec3::new(self.centered(15.0), self.centered(15.0), self.centered(15.0)),
                scale: self.unit(),
            })
            .collect();

        AtmosphereField {
            particles,
            scale_factor: if biome == Biome::Snow { 0.8 } else { 0.3 },
        }
    }

    /// Two crossing orbits of air traffic over cities, none elsewhere
    pub fn traffic(&mut self, biome: Biome) -> Vec<TrafficStream> {
        if biome != Biome::Urban {
            return Vec::new();
        }

        [(0.0, Rgb(0xef4444)), (std::f32::consts::FRAC_PI_2, Rgb(0x3b82f6))]
            .into_iter()
            .map(|(yaw, color)| {
                let cars = (0..CARS_PER_STREAM)
                    .map(|_| TrafficCar {
                        lane: self.rng.random_range(0..TRAFFIC_LANES),
                        radius: self.span(300.0, 1300.0),
                        angle: self.unit() * TAU,
                        speed: self.span(0.2, 0.7),
                        y_offset: self.unit() * 50.0,
                    })
                    .collect();
                TrafficStream { yaw, color, cars }
            })
            .collect()
    }

    /// Huge far-off monoliths on the horizon
    pub fn mega_structures(&mut self, biome: Biome) -> Vec<Placement> {
        if matches!(biome, Biome::Jungle | Biome::Snow) {
            return Vec::new();
        }

        (0..MEGA_STRUCTURE_COUNT)
            .map(|_| {
                let push_out = |v: f32| if v > 0.0 { v + 1500.0 } else { v - 1500.0 };
                let x = push_out(self.centered(2500.0));
                let z = push_out(self.centered(2500.0));
                let scale = Vec3::new(self.span(100.0, 300.0), self.span(400.0, 1000.0), self.span(100.0, 300.0));
                Placement::new(Vec3::new(x, scale.y / 2.0, z), scale, Vec3::ZERO)
            })
            .collect()
    }

    /// Ring of tripod landmarks facing the landing zone
    pub fn ancient_machines(&mut self) -> Vec<Placement> {
        (0..ANCIENT_MACHINE_COUNT)
            .map(|i| {
                let angle = i as f32 / ANCIENT_MACHINE_COUNT as f32 * TAU;
                let radius = self.span(800.0, 1200.0);
                let x = angle.cos() * radius;
                let z = angle.sin() * radius;
                let scale = self.span(25.0, 35.0);
                Placement::new(
                    Vec3::new(x, -20.0, z),
                    Vec3::splat(scale),
                    Vec3::new(0.0, x.atan2(z) + PI, 0.0),
                )
            })
            .collect()
    }
}
