//! Procedural world generation
//!
//! Runs once per level entry. Output is placement data for the renderer plus
//! the static geometry the simulation tests against:
//! - Seeded or entropy-backed RNG only (injected, never global)
//! - Scan mode never changes placement
//! - No rendering or platform dependencies

pub mod ambient;
pub mod generator;
pub mod instance;
pub mod layout;

pub use ambient::{AtmosphereField, AtmosphericParticle, FloatingIsland, IslandShape, TrafficCar, TrafficStream};
pub use generator::WorldGenerator;
pub use instance::InstanceRaw;
pub use layout::{Placement, StructureClass, Structures, WorldLayout};
