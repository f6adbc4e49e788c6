//! Headless demo loop
//!
//! Drives one controller over the demo course from the input script. Input is
//! sampled every host frame; the controller and physics advance on the fixed
//! step.

use anyhow::{Context, Result};
use glam::Vec3;
use parkour_core::FixedStepClock;
use parkour_locomotion::{
    CameraFrame, FixedYawRate, InputLatch, LocomotionController, LocomotionEvent, TickReport,
};
use parkour_physics::{
    CharacterBody, CharacterBodyConfig, PhysicsConfig, PhysicsPort, PhysicsWorld,
};
use tracing::{debug, info};

use crate::course;
use crate::script::InputScript;
use crate::settings::GameSettings;

/// Counts of what happened during a run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DemoSummary {
    pub fixed_steps: u64,
    pub landings: u32,
    pub jumps: u32,
    pub double_jumps: u32,
    pub wall_runs: u32,
    pub wall_jumps: u32,
    pub aerial_brakes: u32,
    pub final_position: Vec3,
    pub turbo_points: f32,
}

impl DemoSummary {
    fn record(&mut self, report: &TickReport) {
        for event in &report.events {
            match event {
                LocomotionEvent::Landed => self.landings += 1,
                LocomotionEvent::Jumped => self.jumps += 1,
                LocomotionEvent::DoubleJumped => self.double_jumps += 1,
                LocomotionEvent::WallRunStarted(_) => self.wall_runs += 1,
                LocomotionEvent::WallJumped => self.wall_jumps += 1,
                LocomotionEvent::AerialBrake => self.aerial_brakes += 1,
                LocomotionEvent::LeftGround
                | LocomotionEvent::AscentEnded
                | LocomotionEvent::WallRunEnded => {}
            }
        }
    }
}

/// Run the scripted demo to completion
pub fn run(settings: &GameSettings) -> Result<DemoSummary> {
    let mut clock = FixedStepClock::new(settings.time.clone());
    let fixed_dt = clock.fixed_dt();

    let mut world = PhysicsWorld::with_config(PhysicsConfig {
        timestep: fixed_dt,
        ..Default::default()
    });
    let course = course::build(&mut world, &settings.body, settings.demo.wall_clearance);
    debug!(
        floor = ?course.floor,
        right_wall = ?course.right_wall,
        left_wall = ?course.left_wall,
        "course built"
    );

    let mut body = CharacterBody::with_config(CharacterBodyConfig {
        height: settings.body.height,
        radius: settings.body.radius,
        mass: settings.body.mass,
    });
    body.spawn(&mut world, course.spawn);
    world.update_query_pipeline();

    let dimensions = body
        .dimensions(&world)
        .context("Failed to read the character capsule")?;
    let mut controller = LocomotionController::new(
        settings.movement.clone(),
        settings.advanced.clone(),
        dimensions,
    )
    .context("Invalid locomotion settings")?;

    let script = InputScript::wall_run_course();
    debug!(last_step = script.last_start(), "input script loaded");
    let mut latch = InputLatch::new();
    let mut look = FixedYawRate::default();
    let frame_dt = settings.demo.frame_delta();
    let frames = (settings.demo.duration.max(0.0) / frame_dt).ceil() as u64;
    let mut summary = DemoSummary::default();

    info!(
        "Running demo: {:.1}s at {:.0} fps, fixed step {:.3}s",
        settings.demo.duration, settings.demo.frame_rate, fixed_dt
    );

    for _ in 0..frames {
        clock.advance(frame_dt);
        let (raw, yaw_rate) = script.sample(clock.total_time as f32);
        latch.sample(raw);
        controller.frame_update(clock.delta_time);
        look.degrees_per_call = yaw_rate * fixed_dt;

        for _ in 0..clock.fixed_steps() {
            let report = {
                let mut port = body.port(&mut world)?;
                controller.rotate_view(&mut port, &mut look);
                let camera = CameraFrame::from_rotation(port.orientation());
                controller.fixed_tick(&mut port, camera, latch.drain(), fixed_dt)
            };
            world.step();

            for event in &report.events {
                debug!(time = clock.total_time, ?event, "locomotion event");
            }
            summary.record(&report);
        }
    }

    let port = body.port(&mut world)?;
    summary.fixed_steps = clock.step_count;
    summary.final_position = port.position();
    summary.turbo_points = controller.turbo().points();
    Ok(summary)
}
