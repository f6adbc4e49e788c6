//! Wall detection and wall axes for wall-running
//!
//! Presence is checked with short side rays. Once a wall is found, one longer
//! ray on the same side reads the wall's authored axes: its forward axis
//! becomes the running tangent (turned to agree with the camera) and its
//! right axis becomes the push-off direction for wall jumps.

use glam::Vec3;
use parkour_core::math::opposed_on_horizontal;
use parkour_physics::{CapsuleDimensions, LayerMask, PhysicsPort};

use crate::AdvancedSettings;

/// Which side of the body a wall is on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WallSide {
    Left,
    Right,
}

impl WallSide {
    /// Probe direction for this side given the body's right axis
    pub fn direction(self, body_right: Vec3) -> Vec3 {
        match self {
            WallSide::Left => -body_right,
            WallSide::Right => body_right,
        }
    }

    /// Sign of the bank roll about the running tangent that tilts the head
    /// away from this wall
    pub fn bank_sign(self) -> f32 {
        match self {
            WallSide::Left => 1.0,
            WallSide::Right => -1.0,
        }
    }
}

/// Presence of walls on either side
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WallScan {
    pub left: bool,
    pub right: bool,
}

impl WallScan {
    pub fn any(&self) -> bool {
        self.left || self.right
    }

    /// The side to run on; right wins when both are present
    pub fn side(&self) -> Option<WallSide> {
        if self.right {
            Some(WallSide::Right)
        } else if self.left {
            Some(WallSide::Left)
        } else {
            None
        }
    }
}

/// A wall being run on
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallContact {
    /// Unit running direction along the wall, agreeing with the camera
    pub forward: Vec3,
    /// Unit push-off direction
    pub normal: Vec3,
    pub side: WallSide,
}

/// Side ray probes against the wall layers
#[derive(Debug, Clone, Copy)]
pub struct WallDetector {
    probe_length: f32,
    extended_length: f32,
    layers: LayerMask,
}

impl WallDetector {
    pub fn new(body: CapsuleDimensions, settings: &AdvancedSettings) -> Self {
        let probe_length = body.radius + settings.wall_probe_margin;
        Self {
            probe_length,
            extended_length: probe_length * settings.wall_probe_extension,
            layers: settings.wall_mask(),
        }
    }

    pub fn probe_length(&self) -> f32 {
        self.probe_length
    }

    /// Whether a runnable wall lies within reach along `direction`
    pub fn probe<P: PhysicsPort + ?Sized>(&self, port: &P, position: Vec3, direction: Vec3) -> bool {
        port.raycast(position, direction, self.probe_length, self.layers)
            .is_some()
    }

    /// Probe both sides of the body
    pub fn scan<P: PhysicsPort + ?Sized>(&self, port: &P, position: Vec3, body_right: Vec3) -> WallScan {
        WallScan {
            left: self.probe(port, position, WallSide::Left.direction(body_right)),
            right: self.probe(port, position, WallSide::Right.direction(body_right)),
        }
    }

    /// Read the wall axes on `side`
    ///
    /// Returns `None` when the extended ray misses or the wall reports no
    /// usable forward axis.
    pub fn resolve<P: PhysicsPort + ?Sized>(
        &self,
        port: &P,
        position: Vec3,
        body_right: Vec3,
        camera_forward: Vec3,
        side: WallSide,
    ) -> Option<WallContact> {
        let hit = port.raycast(
            position,
            side.direction(body_right),
            self.extended_length,
            self.layers,
        )?;

        let Some(mut forward) = hit.surface_forward.try_normalize() else {
            tracing::trace!(?side, "wall has no forward axis");
            return None;
        };
        if opposed_on_horizontal(forward, camera_forward) {
            forward = -forward;
        }
        let normal = hit
            .surface_right
            .try_normalize()
            .or_else(|| hit.normal.try_normalize())?;

        Some(WallContact {
            forward,
            normal,
            side,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedPort;
    use parkour_core::math::{FORWARD, RIGHT};

    fn detector() -> WallDetector {
        let body = CapsuleDimensions {
            radius: 0.5,
            height: 2.0,
        };
        WallDetector::new(body, &AdvancedSettings::default())
    }

    #[test]
    fn test_scan_prefers_right_wall() {
        let port = ScriptedPort::airborne().with_right_wall(0.8).with_left_wall(0.8);
        let scan = detector().scan(&port, Vec3::ZERO, RIGHT);
        assert!(scan.left && scan.right);
        assert_eq!(scan.side(), Some(WallSide::Right));
    }

    #[test]
    fn test_wall_out_of_reach_is_not_detected() {
        let port = ScriptedPort::airborne().with_right_wall(1.2);
        let detector = detector();
        assert!((detector.probe_length() - 1.0).abs() < 1e-6);
        assert!(!detector.scan(&port, Vec3::ZERO, RIGHT).any());
        // The longer axis ray still reaches it
        assert!(detector
            .resolve(&port, Vec3::ZERO, RIGHT, FORWARD, WallSide::Right)
            .is_some());
    }

    #[test]
    fn test_other_layers_are_ignored() {
        let mut port = ScriptedPort::airborne().with_right_wall(0.6);
        port.wall_layers = LayerMask::WORLD;
        assert!(!detector().scan(&port, Vec3::ZERO, RIGHT).any());
    }

    #[test]
    fn test_tangent_follows_camera() {
        let port = ScriptedPort::airborne().with_left_wall(0.6);
        let detector = detector();

        let contact = detector
            .resolve(&port, Vec3::ZERO, RIGHT, FORWARD, WallSide::Left)
            .unwrap();
        assert_eq!(contact.forward, FORWARD);
        assert_eq!(contact.normal, Vec3::X);

        let contact = detector
            .resolve(&port, Vec3::ZERO, RIGHT, Vec3::Z, WallSide::Left)
            .unwrap();
        assert_eq!(contact.forward, Vec3::Z);
    }

    #[test]
    fn test_perpendicular_camera_keeps_authored_tangent() {
        let port = ScriptedPort::airborne().with_right_wall(0.6);
        let contact = detector()
            .resolve(&port, Vec3::ZERO, RIGHT, Vec3::X, WallSide::Right)
            .unwrap();
        assert_eq!(contact.forward, FORWARD);
    }

    #[test]
    fn test_bank_sign_tilts_away_from_wall() {
        assert_eq!(WallSide::Right.bank_sign(), -1.0);
        assert_eq!(WallSide::Left.bank_sign(), 1.0);
        assert_eq!(WallSide::Left.direction(RIGHT), -RIGHT);
    }
}
