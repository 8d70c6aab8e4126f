//! Gameplay simulation
//!
//! All gameplay logic lives here:
//! - Frame-driven: one `tick` per frame with the frame delta
//! - Seeded RNG only, injected through `GameContext`
//! - Deferred effects are expiring timestamps, never callbacks
//! - No rendering or platform dependencies

pub mod camera;
pub mod context;
pub mod controller;
pub mod input;
pub mod rings;
pub mod state;
pub mod tick;

pub use camera::CameraRig;
pub use context::GameContext;
pub use controller::{MotionController, Touchdown};
pub use input::{MovementKeys, PhaseRequest, TickInput};
pub use rings::{RingTracker, ring_positions};
pub use state::{Enemy, GameEvent, GamePhase, GameState, Snapshot};
pub use tick::tick;
