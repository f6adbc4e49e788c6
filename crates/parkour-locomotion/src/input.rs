//! Input latching between the frame cadence and the fixed cadence
//!
//! Devices are sampled every rendered frame while the state machine runs on
//! the fixed step. A press that starts and ends between two fixed ticks must
//! still reach the next tick, so buttons are OR-ed until drained.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Raw device state for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RawInput {
    /// Strafe axis, right positive
    pub horizontal: f32,
    /// Forward axis, forward positive
    pub vertical: f32,
    pub jump: bool,
    pub turbo: bool,
    pub run: bool,
}

/// Input consumed by one fixed tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputSnapshot {
    /// Movement axes, each within [-1, 1]
    pub axes: Vec2,
    pub jump: bool,
    pub turbo: bool,
    pub run: bool,
}

impl InputSnapshot {
    /// Snapshot with movement axes only
    pub fn moving(horizontal: f32, vertical: f32) -> Self {
        Self {
            axes: clamp_axes(Vec2::new(horizontal, vertical)),
            ..Default::default()
        }
    }

    /// Builder-style jump button
    pub fn with_jump(mut self, jump: bool) -> Self {
        self.jump = jump;
        self
    }

    /// Builder-style turbo button
    pub fn with_turbo(mut self, turbo: bool) -> Self {
        self.turbo = turbo;
        self
    }

    /// Whether any movement axis is deflected
    pub fn wants_move(&self) -> bool {
        self.axes.x.abs() > f32::EPSILON || self.axes.y.abs() > f32::EPSILON
    }
}

/// A button that remembers presses until the next drain
#[derive(Debug, Clone, Copy, Default)]
struct ButtonLatch {
    held: bool,
    pressed_since_drain: bool,
}

impl ButtonLatch {
    fn sample(&mut self, down: bool) {
        self.held = down;
        self.pressed_since_drain |= down;
    }

    fn drain(&mut self) -> bool {
        let value = self.held || self.pressed_since_drain;
        self.pressed_since_drain = false;
        value
    }
}

/// Collects frame samples and hands one snapshot to each fixed tick
#[derive(Debug, Clone, Default)]
pub struct InputLatch {
    axes: Vec2,
    jump: ButtonLatch,
    turbo: ButtonLatch,
    run: ButtonLatch,
}

impl InputLatch {
    /// Create an empty latch
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one frame of device state
    ///
    /// Axes keep the latest value; buttons accumulate.
    pub fn sample(&mut self, raw: RawInput) {
        self.axes = clamp_axes(Vec2::new(raw.horizontal, raw.vertical));
        self.jump.sample(raw.jump);
        self.turbo.sample(raw.turbo);
        self.run.sample(raw.run);
    }

    /// Latest axes without draining
    pub fn axes(&self) -> Vec2 {
        self.axes
    }

    /// Take the snapshot for the next fixed tick
    pub fn drain(&mut self) -> InputSnapshot {
        InputSnapshot {
            axes: self.axes,
            jump: self.jump.drain(),
            turbo: self.turbo.drain(),
            run: self.run.drain(),
        }
    }
}

fn clamp_axes(axes: Vec2) -> Vec2 {
    let clean = |v: f32| if v.is_finite() { v.clamp(-1.0, 1.0) } else { 0.0 };
    Vec2::new(clean(axes.x), clean(axes.y))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axes_are_clamped() {
        let mut latch = InputLatch::new();
        latch.sample(RawInput {
            horizontal: 3.0,
            vertical: f32::NAN,
            ..Default::default()
        });
        assert_eq!(latch.axes(), Vec2::new(1.0, 0.0));
    }

    #[test]
    fn test_short_press_survives_until_drain() {
        let mut latch = InputLatch::new();
        latch.sample(RawInput {
            jump: true,
            ..Default::default()
        });
        latch.sample(RawInput::default());

        assert!(latch.drain().jump);
        // Released and drained: gone on the next tick
        assert!(!latch.drain().jump);
    }

    #[test]
    fn test_held_button_reports_every_drain() {
        let mut latch = InputLatch::new();
        latch.sample(RawInput {
            turbo: true,
            ..Default::default()
        });
        assert!(latch.drain().turbo);
        assert!(latch.drain().turbo);
    }

    #[test]
    fn test_snapshot_wants_move() {
        assert!(!InputSnapshot::default().wants_move());
        assert!(InputSnapshot::moving(0.0, -0.5).wants_move());
    }
}
