//! Parkour Core - Shared math and timing for the parkour controller
//!
//! This crate provides the foundational pieces used by the physics adapter
//! and the locomotion state machine:
//! - Mathematical primitives (re-exported from glam)
//! - Vector helpers (plane projection, signed angles, rate-capped turning)
//! - Keyframe curves for tunable response shapes
//! - A fixed-step clock for driving simulation ticks

pub mod curve;
pub mod math;
pub mod time;

pub use curve::{CurveError, Keyframe, KeyframeCurve};
pub use glam::{Quat, Vec2, Vec3};
pub use time::{FixedStepClock, TimeConfig};
