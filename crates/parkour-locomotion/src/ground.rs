//! Ground detection via a downward sphere cast

use glam::Vec3;
use parkour_core::math::{angle_between, UP};
use parkour_physics::{CapsuleDimensions, PhysicsPort};

use crate::AdvancedSettings;

/// Outcome of one ground probe
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundResult {
    pub grounded: bool,
    /// Surface normal on a hit, world up otherwise
    pub contact_normal: Vec3,
}

impl GroundResult {
    /// No ground below
    pub const AIRBORNE: GroundResult = GroundResult {
        grounded: false,
        contact_normal: UP,
    };

    /// Slope under the body in degrees from world up
    pub fn slope_angle(&self) -> f32 {
        angle_between(self.contact_normal, UP)
    }
}

/// Sphere-cast ground probe sized from the capsule
#[derive(Debug, Clone, Copy)]
pub struct GroundDetector {
    /// Cast sphere radius, shrunk by the shell offset
    probe_radius: f32,
    /// Cast length below the body center
    probe_distance: f32,
}

impl GroundDetector {
    pub fn new(body: CapsuleDimensions, settings: &AdvancedSettings) -> Self {
        Self {
            probe_radius: body.radius * (1.0 - settings.shell_offset),
            probe_distance: (body.half_height() - body.radius) + settings.ground_check_distance,
        }
    }

    pub fn probe_radius(&self) -> f32 {
        self.probe_radius
    }

    pub fn probe_distance(&self) -> f32 {
        self.probe_distance
    }

    /// Probe for ground below `position`
    pub fn probe<P: PhysicsPort + ?Sized>(&self, port: &P, position: Vec3) -> GroundResult {
        match port.sphere_cast_down(position, self.probe_radius, self.probe_distance) {
            Some(hit) => GroundResult {
                grounded: true,
                contact_normal: hit.normal.try_normalize().unwrap_or(UP),
            },
            None => GroundResult::AIRBORNE,
        }
    }
}
