//! Keyframe curves for tunable response shapes
//!
//! A curve maps an input (for example a slope angle in degrees) to a factor by
//! linear interpolation between keys. Inputs outside the keyed range clamp to
//! the first or last value.

use serde::{Deserialize, Serialize};

/// A single curve key
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    /// Input value at this key
    pub time: f32,
    /// Output value at this key
    pub value: f32,
}

impl Keyframe {
    /// Create a key
    pub const fn new(time: f32, value: f32) -> Self {
        Self { time, value }
    }
}

/// Piecewise-linear curve over sorted keys
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyframeCurve {
    keys: Vec<Keyframe>,
}

impl KeyframeCurve {
    /// Build a curve, rejecting empty or unsorted key lists
    pub fn new(keys: Vec<Keyframe>) -> Result<Self, CurveError> {
        let curve = Self { keys };
        curve.validate()?;
        Ok(curve)
    }

    /// A flat curve returning `value` everywhere
    pub fn constant(value: f32) -> Self {
        Self {
            keys: vec![Keyframe::new(0.0, value)],
        }
    }

    /// Check the invariants a deserialized curve may have broken
    pub fn validate(&self) -> Result<(), CurveError> {
        if self.keys.is_empty() {
            return Err(CurveError::Empty);
        }
        if let Some(key) = self
            .keys
            .iter()
            .find(|k| !k.time.is_finite() || !k.value.is_finite())
        {
            return Err(CurveError::NonFinite(key.time));
        }
        for (index, pair) in self.keys.windows(2).enumerate() {
            if pair[1].time <= pair[0].time {
                return Err(CurveError::Unsorted(index + 1));
            }
        }
        Ok(())
    }

    /// Sample the curve
    pub fn evaluate(&self, t: f32) -> f32 {
        let (Some(first), Some(last)) = (self.keys.first(), self.keys.last()) else {
            return 0.0;
        };
        if t <= first.time {
            return first.value;
        }
        if t >= last.time {
            return last.value;
        }

        // First key strictly after t; t > first.time so idx >= 1
        let idx = self.keys.partition_point(|k| k.time <= t);
        let a = self.keys[idx - 1];
        let b = self.keys[idx];
        let span = b.time - a.time;
        let f = (t - a.time) / span;
        a.value + (b.value - a.value) * f
    }
}

/// Errors raised when building a curve
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CurveError {
    #[error("curve has no keys")]
    Empty,

    #[error("curve key {0} is not after the previous key")]
    Unsorted(usize),

    #[error("curve key at {0} is not finite")]
    NonFinite(f32),
}
