//! Locomotion state owned by the controller
//!
//! Support is a single tagged value, so a body can never be grounded and
//! wall-running at once.

use glam::Vec3;
use parkour_core::math::UP;

use crate::wall::{WallContact, WallSide};

/// What holds the body up this tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Support {
    Grounded { normal: Vec3 },
    Airborne,
    WallRunning(WallContact),
}

/// Progress of the current jump
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum JumpPhase {
    Idle,
    /// Upward impulses are applied while the button is held, up to the jump threshold
    Ascending { elapsed: f32 },
}

/// The air jump budget within one ground-to-ground cycle
///
/// Tracks two facts: whether the first ascent of the cycle has ended and
/// whether an air jump is on offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AirJump {
    /// First ascent still running, no air jump on offer
    #[default]
    Pending,
    /// Granted by a wall jump before the first ascent ended
    Granted,
    /// First ascent over, air jump on offer
    Available,
    /// First ascent over, air jump used
    Spent,
}

impl AirJump {
    /// Check if a double jump is on offer
    pub fn can_double_jump(self) -> bool {
        matches!(self, AirJump::Granted | AirJump::Available)
    }

    /// Check if the first ascent of this airborne cycle has ended
    pub fn has_used_first_jump(self) -> bool {
        matches!(self, AirJump::Available | AirJump::Spent)
    }

    /// An ascent ended; returns true if it was the first of the cycle
    pub fn end_ascent(&mut self) -> bool {
        match self {
            AirJump::Pending | AirJump::Granted => {
                *self = AirJump::Available;
                true
            }
            AirJump::Available | AirJump::Spent => false,
        }
    }

    /// Use the air jump
    pub fn consume(&mut self) {
        match *self {
            AirJump::Granted => *self = AirJump::Pending,
            AirJump::Available => *self = AirJump::Spent,
            AirJump::Pending | AirJump::Spent => {}
        }
    }

    /// Offer an air jump after a wall jump
    pub fn grant(&mut self) {
        *self = if self.has_used_first_jump() {
            AirJump::Available
        } else {
            AirJump::Granted
        };
    }
}

/// Observable effects of one fixed tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LocomotionEvent {
    Landed,
    LeftGround,
    Jumped,
    DoubleJumped,
    WallJumped,
    AscentEnded,
    WallRunStarted(WallSide),
    WallRunEnded,
    /// Aerial velocity was braked to a vertical-only fall
    AerialBrake,
}

/// Events emitted by one fixed tick, in order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    pub events: Vec<LocomotionEvent>,
}

impl TickReport {
    /// Record an event
    pub fn push(&mut self, event: LocomotionEvent) {
        self.events.push(event);
    }

    /// Check if an event was recorded this tick
    pub fn contains(&self, event: LocomotionEvent) -> bool {
        self.events.contains(&event)
    }

    /// Check if the tick produced no events
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// Mutable locomotion state
#[derive(Debug, Clone, PartialEq)]
pub struct LocomotionState {
    pub support: Support,
    pub jump: JumpPhase,
    pub air_jump: AirJump,
    /// Jump button released since the last ascent, in a state that allows jumping
    pub jump_armed: bool,
    /// Jump requested this tick
    pub jump_requested: bool,
    /// Double jumps steer toward the input direction; set after the first
    /// completed ascent and kept for the controller's lifetime
    pub steering_unlocked: bool,
    /// One aerial brake per ground contact
    pub can_slow_down: bool,
    /// Seconds until wall-running is allowed again
    pub wall_run_cooldown: f32,
    /// Ground speed cap from the latest movement input
    pub current_target_speed: f32,
}

impl LocomotionState {
    /// Create the resting airborne state
    pub fn new(initial_target_speed: f32) -> Self {
        Self {
            support: Support::Airborne,
            jump: JumpPhase::Idle,
            air_jump: AirJump::Pending,
            jump_armed: false,
            jump_requested: false,
            steering_unlocked: false,
            can_slow_down: false,
            wall_run_cooldown: 0.0,
            current_target_speed: initial_target_speed,
        }
    }

    /// Check if standing on ground
    pub fn is_grounded(&self) -> bool {
        matches!(self.support, Support::Grounded { .. })
    }

    /// Check if running along a wall
    pub fn is_wall_running(&self) -> bool {
        matches!(self.support, Support::WallRunning(_))
    }

    /// Check if a jump ascent is in progress
    pub fn is_jumping(&self) -> bool {
        matches!(self.jump, JumpPhase::Ascending { .. })
    }

    /// Ground normal when grounded, world up otherwise
    pub fn ground_normal(&self) -> Vec3 {
        match self.support {
            Support::Grounded { normal } => normal,
            _ => UP,
        }
    }

    /// Get the wall being run on, if any
    pub fn wall_contact(&self) -> Option<WallContact> {
        match self.support {
            Support::WallRunning(contact) => Some(contact),
            _ => None,
        }
    }

    /// Whether a jump may start or continue this tick
    pub fn can_jump(&self) -> bool {
        self.is_grounded()
            || self.air_jump.can_double_jump()
            || self.is_jumping()
            || self.is_wall_running()
    }

    /// Whether releasing the button re-arms the jump
    pub fn can_arm_jump(&self) -> bool {
        self.is_grounded() || self.air_jump.can_double_jump() || self.is_wall_running()
    }
}
