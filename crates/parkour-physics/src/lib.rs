//! Parkour Physics - Physics port and rapier3d world
//!
//! Provides the [`PhysicsPort`] capability consumed by the locomotion
//! controller, a rapier3d-backed world to host level geometry, and a capsule
//! character body with a port adapter.

mod body;
mod convert;
mod error;
mod port;

pub use body::{BodyPort, CapsuleDimensions, CharacterBody, CharacterBodyConfig};
pub use error::PhysicsError;
pub use port::{GroundHit, LayerMask, PhysicsPort, SurfaceHit};

use glam::Vec3;
use nalgebra::Unit;
use rapier3d::parry::query::{ShapeCastOptions, ShapeCastStatus};
use rapier3d::parry::shape::Ball;
use rapier3d::prelude::*;

use convert::{from_na_quat, from_na_vec, to_na_vec};

/// Physics world configuration
#[derive(Debug, Clone)]
pub struct PhysicsConfig {
    /// Gravity vector (default: -9.81 on Y axis)
    pub gravity: Vec3,
    /// Physics timestep (default: 1/50)
    pub timestep: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: Vec3::new(0.0, -9.81, 0.0),
            timestep: 1.0 / 50.0,
        }
    }
}

/// The main physics world containing all simulation state
pub struct PhysicsWorld {
    /// Configuration
    pub config: PhysicsConfig,

    /// Rigid body storage
    pub rigid_body_set: RigidBodySet,
    /// Collider storage
    pub collider_set: ColliderSet,
    /// Impulse joint storage
    pub impulse_joint_set: ImpulseJointSet,
    /// Multi-body joint storage
    pub multibody_joint_set: MultibodyJointSet,

    integration_parameters: IntegrationParameters,
    physics_pipeline: PhysicsPipeline,
    island_manager: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    ccd_solver: CCDSolver,
    query_pipeline: QueryPipeline,
}

impl PhysicsWorld {
    /// Create a new physics world with default configuration
    pub fn new() -> Self {
        Self::with_config(PhysicsConfig::default())
    }

    /// Create a new physics world with custom configuration
    pub fn with_config(config: PhysicsConfig) -> Self {
        let mut integration_parameters = IntegrationParameters::default();
        integration_parameters.dt = config.timestep;

        Self {
            config,
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            impulse_joint_set: ImpulseJointSet::new(),
            multibody_joint_set: MultibodyJointSet::new(),
            integration_parameters,
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
        }
    }

    /// Step the physics simulation
    pub fn step(&mut self) {
        let gravity = to_na_vec(self.config.gravity);

        self.physics_pipeline.step(
            &gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_body_set,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            None,
            &(),
            &(),
        );

        self.update_query_pipeline();
    }

    /// Refresh the query acceleration structure after adding or moving colliders
    pub fn update_query_pipeline(&mut self) {
        self.query_pipeline.update(&self.collider_set);
    }

    /// Add a static collider (ground, walls, etc.)
    pub fn add_static_collider(&mut self, collider: Collider) -> ColliderHandle {
        self.collider_set.insert(collider)
    }

    /// Add a dynamic rigid body with a collider
    pub fn add_dynamic_body(
        &mut self,
        rigid_body: RigidBody,
        collider: Collider,
    ) -> (RigidBodyHandle, ColliderHandle) {
        let rb_handle = self.rigid_body_set.insert(rigid_body);
        let col_handle =
            self.collider_set
                .insert_with_parent(collider, rb_handle, &mut self.rigid_body_set);
        (rb_handle, col_handle)
    }

    /// Get a rigid body by handle
    pub fn get_rigid_body(&self, handle: RigidBodyHandle) -> Option<&RigidBody> {
        self.rigid_body_set.get(handle)
    }

    /// Get a mutable rigid body by handle
    pub fn get_rigid_body_mut(&mut self, handle: RigidBodyHandle) -> Option<&mut RigidBody> {
        self.rigid_body_set.get_mut(handle)
    }

    /// Get a collider by handle
    pub fn get_collider(&self, handle: ColliderHandle) -> Option<&Collider> {
        self.collider_set.get(handle)
    }

    /// Cast a ray against colliders on `layers` and report the hit object's axes
    pub fn raycast_surface(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        layers: LayerMask,
        exclude: Option<RigidBodyHandle>,
    ) -> Option<SurfaceHit> {
        let Some(direction) = direction.try_normalize() else {
            tracing::trace!("raycast with degenerate direction skipped");
            return None;
        };
        let ray = Ray::new(
            point![origin.x, origin.y, origin.z],
            to_na_vec(direction),
        );

        let mut filter = QueryFilter::default().groups(InteractionGroups::new(
            Group::ALL,
            Group::from_bits_truncate(layers.0),
        ));
        if let Some(body) = exclude {
            filter = filter.exclude_rigid_body(body);
        }

        let (handle, intersection) = self.query_pipeline.cast_ray_and_get_normal(
            &self.rigid_body_set,
            &self.collider_set,
            &ray,
            max_distance,
            true,
            filter,
        )?;

        let rotation = from_na_quat(self.collider_set.get(handle)?.rotation());
        Some(SurfaceHit {
            normal: from_na_vec(&intersection.normal),
            distance: intersection.time_of_impact,
            surface_forward: rotation * parkour_core::math::FORWARD,
            surface_right: rotation * parkour_core::math::RIGHT,
        })
    }

    /// Sweep a ball straight down from `origin`
    pub fn sphere_cast_down(
        &self,
        origin: Vec3,
        radius: f32,
        max_distance: f32,
        exclude: Option<RigidBodyHandle>,
    ) -> Option<GroundHit> {
        if radius <= 0.0 || max_distance < 0.0 {
            return None;
        }
        let shape = Ball::new(radius);
        let shape_pos = Isometry::translation(origin.x, origin.y, origin.z);
        let shape_vel = vector![0.0, -1.0, 0.0];

        let mut filter = QueryFilter::default().exclude_sensors();
        if let Some(body) = exclude {
            filter = filter.exclude_rigid_body(body);
        }

        let (_, hit) = self.query_pipeline.cast_shape(
            &self.rigid_body_set,
            &self.collider_set,
            &shape_pos,
            &shape_vel,
            &shape,
            ShapeCastOptions {
                max_time_of_impact: max_distance,
                stop_at_penetration: false,
                ..ShapeCastOptions::default()
            },
            filter,
        )?;

        // Geometry already overlapping the sphere at its origin is not ground
        if hit.status == ShapeCastStatus::PenetratingOrWithinTargetDist {
            tracing::trace!("ground probe started inside geometry; ignored");
            return None;
        }

        let normal = from_na_vec(&hit.normal1);
        Some(GroundHit {
            normal: normal.try_normalize().unwrap_or(parkour_core::math::UP),
            distance: hit.time_of_impact,
        })
    }

    /// Create a ground plane collider on the world layer
    pub fn create_ground(&mut self, y: f32) -> ColliderHandle {
        let normal = Unit::new_normalize(vector![0.0, 1.0, 0.0]);
        let ground = ColliderBuilder::halfspace(normal)
            .translation(vector![0.0, y, 0.0])
            .collision_groups(layer_groups(LayerMask::WORLD))
            .friction(0.7)
            .restitution(0.0)
            .build();
        self.add_static_collider(ground)
    }

    /// Create a static box collider on the world layer
    pub fn create_static_box(&mut self, half_extents: Vec3, position: Vec3) -> ColliderHandle {
        let collider = ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z)
            .translation(to_na_vec(position))
            .collision_groups(layer_groups(LayerMask::WORLD))
            .friction(0.7)
            .build();
        self.add_static_collider(collider)
    }

    /// Create a runnable wall
    ///
    /// The wall is a box rotated by `yaw_degrees` about world up. Its local
    /// forward (-Z) is the running direction and its local right (+X) is the
    /// side runners push off toward, so level authors orient walls with the
    /// right axis facing the open side.
    pub fn create_wall(
        &mut self,
        half_extents: Vec3,
        position: Vec3,
        yaw_degrees: f32,
        layers: LayerMask,
    ) -> ColliderHandle {
        let collider = ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z)
            .translation(to_na_vec(position))
            .rotation(vector![0.0, yaw_degrees.to_radians(), 0.0])
            .collision_groups(layer_groups(layers))
            .friction(0.0)
            .build();
        self.add_static_collider(collider)
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Collision groups for a collider living on `layers` and colliding with everything
fn layer_groups(layers: LayerMask) -> InteractionGroups {
    InteractionGroups::new(Group::from_bits_truncate(layers.0), Group::ALL)
}
