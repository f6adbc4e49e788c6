//! Movement configuration and constants

use glam::Vec2;
use parkour_core::{Keyframe, KeyframeCurve};
use parkour_physics::LayerMask;
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Movement tunables, fixed for a session
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    /// Speed when walking forward
    pub forward_speed: f32,
    /// Speed when walking backwards
    pub backward_speed: f32,
    /// Speed when strafing
    pub strafe_speed: f32,
    /// Ground speed multiplier while running
    pub run_multiplier: f32,
    /// Speed along a wall above which the wall-run boost stops
    pub wall_run_max_speed: f32,
    /// Impulse along the wall when a wall-run starts, tapered by current speed
    pub wall_run_force: f32,
    /// Scale of the braking impulse when steering against aerial velocity
    pub aerial_slow_down_multiplier: f32,
    /// Slow-down multiplier on wall-run entry (tuning parity, not read by the state machine)
    pub wall_run_slow_down_multiplier: f32,
    /// Upward impulse applied on every tick a jump is held
    pub jump_force: f32,
    /// Seconds a jump can be held before the ascent ends
    pub jump_threshold: f32,
    /// Minimum speed along a wall for a wall-run to start
    pub wall_run_threshold: f32,
    /// Degrees per second the body turns and banks while wall-running
    pub wall_run_rotation_speed: f32,
    /// Bank angle in degrees while wall-running
    pub wall_run_angle: f32,
    /// Upward impulse countering gravity while wall-running
    pub max_wall_run_compensation_force: f32,
    /// Linear drag while wall-running
    pub wall_run_drag: f32,
    /// Speed above which gravity compensation is applied on a wall
    pub wall_run_falling_threshold_speed: f32,
    /// Kept for tuning files; the wall-run never reads it
    pub wall_run_no_compensation_threshold_speed: f32,
    /// Push-off impulse along the wall normal on a wall jump
    pub wall_jump_horizontal_force: f32,
    /// Seconds after a wall jump before another wall-run may start
    pub wall_run_cooldown: f32,
    /// Size of the turbo pool
    pub max_turbo_points: f32,
    /// Turbo points regained per second while turbo is idle
    pub turbo_reload_rate: f32,
    /// Turbo points spent per second while boosting on the ground
    pub turbo_consumption_rate: f32,
    /// Ground speed multiplier while turbo is active
    pub turbo_speed_multiplier: f32,
    /// Ground force factor by slope angle in degrees
    pub slope_curve: KeyframeCurve,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            forward_speed: 8.0,
            backward_speed: 4.0,
            strafe_speed: 4.0,
            run_multiplier: 2.0,
            wall_run_max_speed: 24.0,
            wall_run_force: 100.0,
            aerial_slow_down_multiplier: 3.0,
            wall_run_slow_down_multiplier: 0.3,
            jump_force: 10.0,
            jump_threshold: 0.25,
            wall_run_threshold: 6.0,
            wall_run_rotation_speed: 30.0,
            wall_run_angle: 15.0,
            max_wall_run_compensation_force: 8.01,
            wall_run_drag: 0.15,
            wall_run_falling_threshold_speed: 15.0,
            wall_run_no_compensation_threshold_speed: 10.0,
            wall_jump_horizontal_force: 30.0,
            wall_run_cooldown: 0.4,
            max_turbo_points: 100.0,
            turbo_reload_rate: 10.0,
            turbo_consumption_rate: 20.0,
            turbo_speed_multiplier: 1.3,
            slope_curve: default_slope_curve(),
        }
    }
}

/// Full force on flat ground and downhill, none on a vertical face
fn default_slope_curve() -> KeyframeCurve {
    KeyframeCurve::new(vec![
        Keyframe::new(-90.0, 1.0),
        Keyframe::new(0.0, 1.0),
        Keyframe::new(90.0, 0.0),
    ])
    .unwrap_or_else(|_| KeyframeCurve::constant(1.0))
}

impl MovementConfig {
    /// Ground speed cap for a non-zero input
    ///
    /// Strafing, then backward, then forward take precedence in that order, so
    /// moving diagonally forward uses the forward speed. Zero input keeps the
    /// previous cap.
    pub fn target_speed(&self, input: Vec2, running: bool, previous: f32) -> f32 {
        if input == Vec2::ZERO {
            return previous;
        }
        let mut speed = previous;
        if input.x != 0.0 {
            speed = self.strafe_speed;
        }
        if input.y < 0.0 {
            speed = self.backward_speed;
        }
        if input.y > 0.0 {
            speed = self.forward_speed;
        }
        if running {
            speed *= self.run_multiplier;
        }
        speed
    }

    /// Force factor for a ground slope, in degrees from world up
    pub fn slope_multiplier(&self, slope_degrees: f32) -> f32 {
        self.slope_curve.evaluate(slope_degrees).clamp(0.0, 1.0)
    }

    /// Boost factor for a wall-run start at `speed` along the wall
    ///
    /// 1 at the trigger threshold, 0 at the max speed.
    pub fn wall_run_boost_scale(&self, speed: f32) -> f32 {
        let span = self.wall_run_max_speed - self.wall_run_threshold;
        if span <= f32::EPSILON {
            return 0.0;
        }
        (1.0 - (speed - self.wall_run_threshold) / span).clamp(0.0, 1.0)
    }

    /// Reject tunables the state machine cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("forward_speed", self.forward_speed)?;
        positive("backward_speed", self.backward_speed)?;
        positive("strafe_speed", self.strafe_speed)?;
        positive("run_multiplier", self.run_multiplier)?;
        positive("jump_threshold", self.jump_threshold)?;
        positive("turbo_speed_multiplier", self.turbo_speed_multiplier)?;

        non_negative("wall_run_force", self.wall_run_force)?;
        non_negative("aerial_slow_down_multiplier", self.aerial_slow_down_multiplier)?;
        non_negative("wall_run_slow_down_multiplier", self.wall_run_slow_down_multiplier)?;
        non_negative("jump_force", self.jump_force)?;
        non_negative("wall_run_threshold", self.wall_run_threshold)?;
        non_negative("wall_run_rotation_speed", self.wall_run_rotation_speed)?;
        non_negative("max_wall_run_compensation_force", self.max_wall_run_compensation_force)?;
        non_negative("wall_run_drag", self.wall_run_drag)?;
        non_negative("wall_jump_horizontal_force", self.wall_jump_horizontal_force)?;
        non_negative("wall_run_cooldown", self.wall_run_cooldown)?;
        non_negative("max_turbo_points", self.max_turbo_points)?;
        non_negative("turbo_reload_rate", self.turbo_reload_rate)?;
        non_negative("turbo_consumption_rate", self.turbo_consumption_rate)?;

        if self.wall_run_max_speed <= self.wall_run_threshold {
            return Err(ConfigError::WallRunSpeedRange {
                threshold: self.wall_run_threshold,
                max: self.wall_run_max_speed,
            });
        }
        self.slope_curve.validate()?;
        Ok(())
    }
}

/// Probe and drag settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvancedSettings {
    /// Extra distance below the capsule checked for ground
    pub ground_check_distance: f32,
    /// Fraction the probe radius is shrunk by to avoid snagging on walls
    pub shell_offset: f32,
    /// Whether the player can brake against aerial velocity
    pub air_control: bool,
    /// Linear drag while grounded
    pub ground_drag: f32,
    /// Wall probe length beyond the collider radius
    pub wall_probe_margin: f32,
    /// Length factor of the ray that reads the wall's axes
    pub wall_probe_extension: f32,
    /// Layer bits of runnable walls
    pub wall_layers: u32,
    /// Apply the run multiplier without the run input
    pub always_run: bool,
}

impl Default for AdvancedSettings {
    fn default() -> Self {
        Self {
            ground_check_distance: 0.01,
            shell_offset: 0.0,
            air_control: false,
            ground_drag: 5.0,
            wall_probe_margin: 0.5,
            wall_probe_extension: 10.0,
            wall_layers: LayerMask::WALLS.0,
            always_run: true,
        }
    }
}

impl AdvancedSettings {
    /// Wall layers as a query mask
    pub fn wall_mask(&self) -> LayerMask {
        LayerMask(self.wall_layers)
    }

    /// Reject settings the detectors cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..1.0).contains(&self.shell_offset) {
            return Err(ConfigError::ShellOffset(self.shell_offset));
        }
        non_negative("ground_check_distance", self.ground_check_distance)?;
        non_negative("ground_drag", self.ground_drag)?;
        non_negative("wall_probe_margin", self.wall_probe_margin)?;
        if self.wall_probe_extension < 1.0 {
            return Err(ConfigError::ProbeExtension(self.wall_probe_extension));
        }
        Ok(())
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::Negative { field, value })
    }
}
