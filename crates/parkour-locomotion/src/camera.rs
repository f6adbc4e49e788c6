//! Camera basis and the view-control seam

use glam::{Quat, Vec3};
use parkour_core::math::{FORWARD, RIGHT};

/// The camera's world-space forward and right axes for one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraFrame {
    pub forward: Vec3,
    pub right: Vec3,
}

impl CameraFrame {
    /// Basis of a camera with the given world rotation
    pub fn from_rotation(rotation: Quat) -> Self {
        Self {
            forward: rotation * FORWARD,
            right: rotation * RIGHT,
        }
    }

    /// Basis from yaw and pitch in degrees
    pub fn from_yaw_pitch(yaw: f32, pitch: f32) -> Self {
        let rotation = Quat::from_rotation_y(yaw.to_radians()) * Quat::from_rotation_x(pitch.to_radians());
        Self::from_rotation(rotation)
    }
}

impl Default for CameraFrame {
    fn default() -> Self {
        Self {
            forward: FORWARD,
            right: RIGHT,
        }
    }
}

/// Mouse-look or scripted view rotation
pub trait ViewControl {
    /// Advance the view once and return the yaw change, in degrees about
    /// world up, to apply to the body
    fn look_rotation(&mut self) -> f32;
}

/// View control that turns at a constant rate per call
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedYawRate {
    pub degrees_per_call: f32,
}

impl ViewControl for FixedYawRate {
    fn look_rotation(&mut self) -> f32 {
        self.degrees_per_call
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yaw_turns_forward_left() {
        let frame = CameraFrame::from_yaw_pitch(90.0, 0.0);
        assert!((frame.forward - Vec3::NEG_X).length() < 1e-5);
        assert!((frame.right - Vec3::NEG_Z).length() < 1e-5);
    }

    #[test]
    fn test_pitch_keeps_right_horizontal() {
        let frame = CameraFrame::from_yaw_pitch(0.0, -30.0);
        assert!(frame.forward.y < 0.0);
        assert!(frame.right.y.abs() < 1e-5);
    }
}
