//! Fixed-step timing
//!
//! Frame deltas arrive at whatever rate the host loop runs; locomotion is
//! simulated in fixed steps. The clock accumulates frame time and hands out
//! the number of fixed steps to run this frame.

use serde::{Deserialize, Serialize};

/// Configuration for the simulation clock
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeConfig {
    /// How many simulated seconds pass per real second
    pub time_scale: f32,
    /// Fixed timestep for physics and locomotion (in seconds)
    pub fixed_timestep: f32,
    /// Maximum frame delta to prevent spiral of death
    pub max_delta_time: f32,
}

impl Default for TimeConfig {
    fn default() -> Self {
        Self {
            time_scale: 1.0,
            fixed_timestep: 1.0 / 50.0,
            max_delta_time: 0.25,
        }
    }
}

/// Frame clock feeding a fixed-step simulation
#[derive(Debug, Clone, Default)]
pub struct FixedStepClock {
    /// Configuration
    pub config: TimeConfig,
    /// Simulated time since start in seconds
    pub total_time: f64,
    /// Delta time for this frame (clamped and scaled)
    pub delta_time: f32,
    /// Frame counter
    pub frame_count: u64,
    /// Fixed steps run since start
    pub step_count: u64,
    accumulator: f32,
}

impl FixedStepClock {
    /// Create a clock with custom config
    pub fn new(config: TimeConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// The fixed step length in seconds
    pub fn fixed_dt(&self) -> f32 {
        self.config.fixed_timestep
    }

    /// Advance by the raw delta from the previous frame
    pub fn advance(&mut self, raw_delta: f32) {
        let clamped = raw_delta.clamp(0.0, self.config.max_delta_time);
        self.frame_count += 1;
        self.delta_time = clamped * self.config.time_scale;
        self.total_time += self.delta_time as f64;
        self.accumulator += self.delta_time;
    }

    /// Drain the accumulator and return how many fixed steps to run
    pub fn fixed_steps(&mut self) -> u32 {
        let step = self.config.fixed_timestep;
        if step <= 0.0 {
            return 0;
        }
        let mut steps = 0;
        while self.accumulator >= step {
            self.accumulator -= step;
            steps += 1;
        }
        self.step_count += steps as u64;
        steps
    }
}
