//! The physics capability the locomotion controller depends on
//!
//! The controller never owns a physics engine. It queries and commands one
//! body through this trait, which lets the state machine run against a
//! scripted double in tests and against rapier in the demo.

use glam::{Quat, Vec3};

/// Bit mask selecting collision layers for a query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LayerMask(pub u32);

impl LayerMask {
    /// Every layer
    pub const ALL: LayerMask = LayerMask(u32::MAX);
    /// Default layer for static level geometry
    pub const WORLD: LayerMask = LayerMask(1 << 0);
    /// Default layer for wall-runnable surfaces
    pub const WALLS: LayerMask = LayerMask(1 << 1);

    /// Whether the two masks share a layer
    pub fn intersects(self, other: LayerMask) -> bool {
        self.0 & other.0 != 0
    }
}

impl Default for LayerMask {
    fn default() -> Self {
        Self::ALL
    }
}

/// Result of a downward sphere cast
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundHit {
    /// Surface normal at the contact
    pub normal: Vec3,
    /// Distance travelled by the sphere before contact
    pub distance: f32,
}

/// Result of a raycast against level geometry
///
/// Besides the geometric normal, the hit reports the hit object's own
/// forward and right axes. Wall-running reads its tangent and push-off
/// direction from those authored axes rather than from the ray normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceHit {
    /// Geometric surface normal at the hit point
    pub normal: Vec3,
    /// Distance along the ray
    pub distance: f32,
    /// World-space forward axis of the hit object
    pub surface_forward: Vec3,
    /// World-space right axis of the hit object
    pub surface_right: Vec3,
}

/// Queries and commands for one controlled rigid body
pub trait PhysicsPort {
    /// Cast a sphere straight down from `origin`
    fn sphere_cast_down(&self, origin: Vec3, radius: f32, max_distance: f32) -> Option<GroundHit>;

    /// Cast a ray against colliders on `layers`
    fn raycast(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        layers: LayerMask,
    ) -> Option<SurfaceHit>;

    /// Body position (center of the collider)
    fn position(&self) -> Vec3;

    /// Body orientation
    fn orientation(&self) -> Quat;

    /// Current linear velocity
    fn velocity(&self) -> Vec3;

    /// Overwrite the linear velocity
    fn set_velocity(&mut self, velocity: Vec3);

    /// Apply an instantaneous change in momentum
    ///
    /// Implementations must reflect the impulse in [`PhysicsPort::velocity`]
    /// immediately; the controller reads velocity back within the same tick.
    fn apply_impulse(&mut self, impulse: Vec3);

    /// Set linear drag (damping)
    fn set_drag(&mut self, drag: f32);

    /// Rotate the body about a world-space axis
    fn rotate(&mut self, axis: Vec3, degrees: f32);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_mask_intersects() {
        assert!(LayerMask::ALL.intersects(LayerMask::WALLS));
        assert!(!LayerMask::WORLD.intersects(LayerMask::WALLS));
        assert_eq!(LayerMask::default(), LayerMask::ALL);
    }
}
