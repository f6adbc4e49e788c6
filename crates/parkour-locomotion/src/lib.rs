//! Parkour Locomotion - First-person movement state machine
//!
//! Turns per-tick input, a camera basis, and physics queries into impulses,
//! velocity corrections, drag, and rotations for one rigid body. Covers
//! walking and strafing on slopes, held jumps with one air jump, a turbo
//! boost pool, and wall-running with wall jumps.
//!
//! The controller runs on the fixed simulation step; [`InputLatch`] bridges
//! frame-rate device sampling to it.

pub mod camera;
pub mod config;
pub mod controller;
mod error;
pub mod ground;
pub mod input;
pub mod state;
pub mod turbo;
pub mod wall;

#[cfg(test)]
mod testing;

pub use camera::{CameraFrame, FixedYawRate, ViewControl};
pub use config::{AdvancedSettings, MovementConfig};
pub use controller::LocomotionController;
pub use error::ConfigError;
pub use ground::{GroundDetector, GroundResult};
pub use input::{InputLatch, InputSnapshot, RawInput};
pub use state::{AirJump, JumpPhase, LocomotionEvent, LocomotionState, Support, TickReport};
pub use turbo::TurboMeter;
pub use wall::{WallContact, WallDetector, WallScan, WallSide};
