use rapier3d::prelude::{ColliderHandle, RigidBodyHandle};

/// Errors raised when binding a controller to a physics body.
#[derive(Debug, Clone, thiserror::Error)]
pub enum PhysicsError {
    #[error("rigid body {0:?} does not exist in the physics world")]
    MissingBody(RigidBodyHandle),

    #[error("collider {0:?} does not exist in the physics world")]
    MissingCollider(ColliderHandle),

    #[error("collider {0:?} is not a capsule")]
    NotACapsule(ColliderHandle),

    #[error("invalid capsule dimensions: radius {radius}, height {height}")]
    InvalidDimensions { radius: f32, height: f32 },
}
