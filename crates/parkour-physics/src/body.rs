//! Capsule character body and its physics port adapter

use glam::{Quat, Vec3};
use rapier3d::prelude::*;

use crate::convert::{from_na_quat, from_na_vec, to_na_quat, to_na_vec};
use crate::{GroundHit, LayerMask, PhysicsError, PhysicsPort, PhysicsWorld, SurfaceHit};

/// Character body configuration
#[derive(Debug, Clone)]
pub struct CharacterBodyConfig {
    /// Capsule height including both caps (default: 2.0m)
    pub height: f32,
    /// Capsule radius (default: 0.5m)
    pub radius: f32,
    /// Body mass in kilograms (default: 1); impulses are tuned against it
    pub mass: f32,
}

impl Default for CharacterBodyConfig {
    fn default() -> Self {
        Self {
            height: 2.0,
            radius: 0.5,
            mass: 1.0,
        }
    }
}

/// Radius and full height of a capsule collider
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CapsuleDimensions {
    pub radius: f32,
    pub height: f32,
}

impl CapsuleDimensions {
    /// Half of the full height, from center to the tip of a cap
    pub fn half_height(&self) -> f32 {
        self.height * 0.5
    }
}

/// A dynamic capsule driven by impulses and explicit rotations
///
/// Rotations are locked against contact torque; the locomotion controller
/// orients the body itself.
pub struct CharacterBody {
    /// Configuration
    pub config: CharacterBodyConfig,
    /// The rigid body handle once spawned
    pub body_handle: Option<RigidBodyHandle>,
    /// The collider handle once spawned
    pub collider_handle: Option<ColliderHandle>,
}

impl CharacterBody {
    /// Create a character body description with default config
    pub fn new() -> Self {
        Self::with_config(CharacterBodyConfig::default())
    }

    /// Create a character body description with custom config
    pub fn with_config(config: CharacterBodyConfig) -> Self {
        Self {
            config,
            body_handle: None,
            collider_handle: None,
        }
    }

    /// Spawn the body with its center at `position`
    pub fn spawn(&mut self, physics: &mut PhysicsWorld, position: Vec3) -> RigidBodyHandle {
        let half_segment = (self.config.height * 0.5 - self.config.radius).max(0.01);
        let rigid_body = RigidBodyBuilder::dynamic()
            .translation(to_na_vec(position))
            .lock_rotations()
            .ccd_enabled(true)
            .build();
        let collider = ColliderBuilder::capsule_y(half_segment, self.config.radius)
            .mass(self.config.mass)
            .friction(0.0)
            .restitution(0.0)
            .build();

        let (body, collider) = physics.add_dynamic_body(rigid_body, collider);
        self.body_handle = Some(body);
        self.collider_handle = Some(collider);
        body
    }

    /// Read the capsule dimensions back from the collider
    pub fn dimensions(&self, physics: &PhysicsWorld) -> Result<CapsuleDimensions, PhysicsError> {
        let Some(handle) = self.collider_handle else {
            return Err(PhysicsError::InvalidDimensions {
                radius: self.config.radius,
                height: self.config.height,
            });
        };
        let collider = physics
            .get_collider(handle)
            .ok_or(PhysicsError::MissingCollider(handle))?;
        let capsule = collider
            .shape()
            .as_capsule()
            .ok_or(PhysicsError::NotACapsule(handle))?;

        let dimensions = CapsuleDimensions {
            radius: capsule.radius,
            height: 2.0 * (capsule.half_height() + capsule.radius),
        };
        if dimensions.radius <= 0.0 || dimensions.height < 2.0 * dimensions.radius {
            return Err(PhysicsError::InvalidDimensions {
                radius: dimensions.radius,
                height: dimensions.height,
            });
        }
        Ok(dimensions)
    }

    /// Borrow the world as a port onto this body
    pub fn port<'w>(&self, physics: &'w mut PhysicsWorld) -> Result<BodyPort<'w>, PhysicsError> {
        let Some(handle) = self.body_handle else {
            return Err(PhysicsError::MissingBody(RigidBodyHandle::invalid()));
        };
        BodyPort::new(physics, handle)
    }
}

impl Default for CharacterBody {
    fn default() -> Self {
        Self::new()
    }
}

/// [`PhysicsPort`] over one rigid body of a [`PhysicsWorld`]
///
/// Queries exclude the body itself.
pub struct BodyPort<'w> {
    world: &'w mut PhysicsWorld,
    body: RigidBodyHandle,
}

impl<'w> BodyPort<'w> {
    /// Bind to `body`, failing if it does not exist
    pub fn new(world: &'w mut PhysicsWorld, body: RigidBodyHandle) -> Result<Self, PhysicsError> {
        if world.get_rigid_body(body).is_none() {
            return Err(PhysicsError::MissingBody(body));
        }
        Ok(Self { world, body })
    }

    fn rigid_body(&self) -> Option<&RigidBody> {
        self.world.get_rigid_body(self.body)
    }

    fn rigid_body_mut(&mut self) -> Option<&mut RigidBody> {
        self.world.get_rigid_body_mut(self.body)
    }
}

impl PhysicsPort for BodyPort<'_> {
    fn sphere_cast_down(&self, origin: Vec3, radius: f32, max_distance: f32) -> Option<GroundHit> {
        self.world
            .sphere_cast_down(origin, radius, max_distance, Some(self.body))
    }

    fn raycast(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        layers: LayerMask,
    ) -> Option<SurfaceHit> {
        self.world
            .raycast_surface(origin, direction, max_distance, layers, Some(self.body))
    }

    fn position(&self) -> Vec3 {
        self.rigid_body()
            .map_or(Vec3::ZERO, |rb| from_na_vec(rb.translation()))
    }

    fn orientation(&self) -> Quat {
        self.rigid_body()
            .map_or(Quat::IDENTITY, |rb| from_na_quat(rb.rotation()))
    }

    fn velocity(&self) -> Vec3 {
        self.rigid_body()
            .map_or(Vec3::ZERO, |rb| from_na_vec(rb.linvel()))
    }

    fn set_velocity(&mut self, velocity: Vec3) {
        if let Some(rb) = self.rigid_body_mut() {
            rb.set_linvel(to_na_vec(velocity), true);
        }
    }

    fn apply_impulse(&mut self, impulse: Vec3) {
        if let Some(rb) = self.rigid_body_mut() {
            rb.apply_impulse(to_na_vec(impulse), true);
        }
    }

    fn set_drag(&mut self, drag: f32) {
        if let Some(rb) = self.rigid_body_mut() {
            rb.set_linear_damping(drag.max(0.0));
        }
    }

    fn rotate(&mut self, axis: Vec3, degrees: f32) {
        let Some(axis) = axis.try_normalize() else {
            tracing::trace!("rotation about degenerate axis skipped");
            return;
        };
        if let Some(rb) = self.rigid_body_mut() {
            let current = from_na_quat(rb.rotation());
            let next = (Quat::from_axis_angle(axis, degrees.to_radians()) * current).normalize();
            rb.set_rotation(to_na_quat(next), true);
        }
    }
}
