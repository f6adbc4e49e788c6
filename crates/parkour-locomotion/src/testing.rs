//! Scripted physics double for unit tests
//!
//! Mass is 1, so an impulse changes velocity by exactly its own value. There
//! is no integration: position and velocity change only through commands.

use glam::{Quat, Vec3};
use parkour_core::math::{FORWARD, RIGHT};
use parkour_physics::{GroundHit, LayerMask, PhysicsPort, SurfaceHit};

pub(crate) struct ScriptedPort {
    pub position: Vec3,
    pub orientation: Quat,
    pub velocity: Vec3,
    pub drag: f32,
    pub ground_normal: Option<Vec3>,
    pub ground_distance: f32,
    pub right_wall: Option<SurfaceHit>,
    pub left_wall: Option<SurfaceHit>,
    pub wall_layers: LayerMask,
    pub impulses: Vec<Vec3>,
}

impl ScriptedPort {
    pub fn airborne() -> Self {
        Self {
            position: Vec3::new(0.0, 1.0, 0.0),
            orientation: Quat::IDENTITY,
            velocity: Vec3::ZERO,
            drag: 0.0,
            ground_normal: None,
            ground_distance: 0.0,
            right_wall: None,
            left_wall: None,
            wall_layers: LayerMask::WALLS,
            impulses: Vec::new(),
        }
    }

    pub fn on_ground(normal: Vec3) -> Self {
        Self {
            ground_normal: Some(normal),
            ..Self::airborne()
        }
    }

    /// Wall on the body's right, running along -Z, pushing off toward -X
    pub fn with_right_wall(mut self, distance: f32) -> Self {
        self.right_wall = Some(SurfaceHit {
            normal: Vec3::NEG_X,
            distance,
            surface_forward: FORWARD,
            surface_right: Vec3::NEG_X,
        });
        self
    }

    /// Wall on the body's left, authored facing +Z, pushing off toward +X
    pub fn with_left_wall(mut self, distance: f32) -> Self {
        self.left_wall = Some(SurfaceHit {
            normal: Vec3::X,
            distance,
            surface_forward: Vec3::Z,
            surface_right: Vec3::X,
        });
        self
    }

    pub fn forward(&self) -> Vec3 {
        self.orientation * FORWARD
    }

    pub fn up(&self) -> Vec3 {
        self.orientation * Vec3::Y
    }
}

impl PhysicsPort for ScriptedPort {
    fn sphere_cast_down(&self, _origin: Vec3, _radius: f32, max_distance: f32) -> Option<GroundHit> {
        let normal = self.ground_normal?;
        (self.ground_distance <= max_distance).then_some(GroundHit {
            normal,
            distance: self.ground_distance,
        })
    }

    fn raycast(
        &self,
        _origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        layers: LayerMask,
    ) -> Option<SurfaceHit> {
        if !layers.intersects(self.wall_layers) {
            return None;
        }
        let wall = if direction.dot(self.orientation * RIGHT) > 0.0 {
            self.right_wall
        } else {
            self.left_wall
        }?;
        (wall.distance <= max_distance).then_some(wall)
    }

    fn position(&self) -> Vec3 {
        self.position
    }

    fn orientation(&self) -> Quat {
        self.orientation
    }

    fn velocity(&self) -> Vec3 {
        self.velocity
    }

    fn set_velocity(&mut self, velocity: Vec3) {
        self.velocity = velocity;
    }

    fn apply_impulse(&mut self, impulse: Vec3) {
        self.velocity += impulse;
        self.impulses.push(impulse);
    }

    fn set_drag(&mut self, drag: f32) {
        self.drag = drag;
    }

    fn rotate(&mut self, axis: Vec3, degrees: f32) {
        if let Some(axis) = axis.try_normalize() {
            self.orientation =
                (Quat::from_axis_angle(axis, degrees.to_radians()) * self.orientation).normalize();
        }
    }
}
