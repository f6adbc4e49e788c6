//! Demo course: a floor and two staggered runnable walls
//!
//! The runner spawns at the origin facing -Z. The first wall runs along the
//! runner's right a few meters ahead; the second sits further left and
//! further on, in reach of a wall jump off the first.

use glam::Vec3;
use parkour_physics::{LayerMask, PhysicsWorld};
use rapier3d::prelude::ColliderHandle;

use crate::settings::BodySettings;

const WALL_HALF_THICKNESS: f32 = 0.25;
const WALL_HALF_HEIGHT: f32 = 4.0;

/// Handles and spawn point of a built course
pub struct Course {
    /// Body center at the start, resting on the floor
    pub spawn: Vec3,
    pub floor: ColliderHandle,
    pub right_wall: ColliderHandle,
    pub left_wall: ColliderHandle,
}

/// Build the course into `world`
///
/// `clearance` is the distance from the spawn line to the right wall's face.
pub fn build(world: &mut PhysicsWorld, body: &BodySettings, clearance: f32) -> Course {
    let floor = world.create_ground(0.0);

    // Right axis of a wall yawed 180 degrees faces -X, back toward the runner
    let right_wall = world.create_wall(
        Vec3::new(WALL_HALF_THICKNESS, WALL_HALF_HEIGHT, 25.0),
        Vec3::new(clearance + WALL_HALF_THICKNESS, WALL_HALF_HEIGHT, -30.0),
        180.0,
        LayerMask::WALLS,
    );
    let left_wall = world.create_wall(
        Vec3::new(WALL_HALF_THICKNESS, WALL_HALF_HEIGHT, 25.0),
        Vec3::new(-4.0 - WALL_HALF_THICKNESS, WALL_HALF_HEIGHT, -50.0),
        0.0,
        LayerMask::WALLS,
    );
    world.update_query_pipeline();

    Course {
        spawn: Vec3::new(0.0, body.height * 0.5, 0.0),
        floor,
        right_wall,
        left_wall,
    }
}
