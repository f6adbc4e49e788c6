//! Fixed-step locomotion controller
//!
//! Each fixed tick runs the stages in a fixed order, each feeding the next:
//! ground check, turbo and target speed, movement forces, jump arbitration,
//! wall-run initiation, wall-run orientation, then drag. The body is driven
//! only through [`PhysicsPort`] commands.

use glam::Vec3;
use parkour_core::math::{
    angle_between, capped_step, horizontal, opposed_on_horizontal, project, project_on_plane,
    rotate_about, signed_angle, signed_angle_on_plane, FORWARD, RIGHT, UP,
};
use parkour_physics::{CapsuleDimensions, PhysicsPort};
use tracing::{debug, trace};

use crate::camera::{CameraFrame, ViewControl};
use crate::ground::GroundDetector;
use crate::input::InputSnapshot;
use crate::state::{JumpPhase, LocomotionEvent, LocomotionState, Support, TickReport};
use crate::turbo::TurboMeter;
use crate::wall::{WallDetector, WallScan};
use crate::{AdvancedSettings, ConfigError, MovementConfig};

/// First-person locomotion state machine for one body
pub struct LocomotionController {
    movement: MovementConfig,
    advanced: AdvancedSettings,
    ground: GroundDetector,
    walls: WallDetector,
    state: LocomotionState,
    turbo: TurboMeter,
    immobilized: bool,
}

impl LocomotionController {
    /// Build a controller for a capsule of the given size
    pub fn new(
        movement: MovementConfig,
        advanced: AdvancedSettings,
        body: CapsuleDimensions,
    ) -> Result<Self, ConfigError> {
        movement.validate()?;
        advanced.validate()?;
        if !(body.radius > 0.0 && body.height.is_finite()) || body.height < 2.0 * body.radius {
            return Err(ConfigError::InvalidBody {
                radius: body.radius,
                height: body.height,
            });
        }

        debug!(
            radius = body.radius,
            height = body.height,
            "locomotion controller created"
        );

        Ok(Self {
            ground: GroundDetector::new(body, &advanced),
            walls: WallDetector::new(body, &advanced),
            state: LocomotionState::new(movement.forward_speed),
            turbo: TurboMeter::new(
                movement.max_turbo_points,
                movement.turbo_reload_rate,
                movement.turbo_consumption_rate,
            ),
            movement,
            advanced,
            immobilized: false,
        })
    }

    /// Build a controller with default tunables
    pub fn with_defaults(body: CapsuleDimensions) -> Result<Self, ConfigError> {
        Self::new(MovementConfig::default(), AdvancedSettings::default(), body)
    }

    /// Get the current locomotion state
    pub fn state(&self) -> &LocomotionState {
        &self.state
    }

    /// Get the turbo meter
    pub fn turbo(&self) -> &TurboMeter {
        &self.turbo
    }

    /// Check if the body is grounded
    pub fn is_grounded(&self) -> bool {
        self.state.is_grounded()
    }

    /// Check if the body is running along a wall
    pub fn is_wall_running(&self) -> bool {
        self.state.is_wall_running()
    }

    /// Check if a jump ascent is in progress
    pub fn is_jumping(&self) -> bool {
        self.state.is_jumping()
    }

    /// Check if fixed ticks are currently suspended
    pub fn is_immobilized(&self) -> bool {
        self.immobilized
    }

    /// Frame-rate bookkeeping: counts the wall-run cooldown down to zero
    pub fn frame_update(&mut self, dt: f32) {
        if self.state.wall_run_cooldown > 0.0 {
            self.state.wall_run_cooldown = (self.state.wall_run_cooldown - dt.max(0.0)).max(0.0);
        }
    }

    /// Apply the view's yaw to the body, once per fixed step
    ///
    /// Skipped while wall-running, where the wall drives orientation. The
    /// velocity turns with the body when grounded or with air control.
    pub fn rotate_view<P, V>(&mut self, port: &mut P, view: &mut V)
    where
        P: PhysicsPort + ?Sized,
        V: ViewControl + ?Sized,
    {
        if self.immobilized || self.state.is_wall_running() {
            return;
        }
        let yaw = view.look_rotation();
        if !yaw.is_finite() || yaw.abs() <= f32::EPSILON {
            return;
        }
        port.rotate(UP, yaw);
        if self.state.is_grounded() || self.advanced.air_control {
            let velocity = port.velocity();
            port.set_velocity(rotate_about(velocity, UP, yaw));
        }
    }

    /// Run one fixed simulation step
    pub fn fixed_tick<P: PhysicsPort + ?Sized>(
        &mut self,
        port: &mut P,
        camera: CameraFrame,
        input: InputSnapshot,
        dt: f32,
    ) -> TickReport {
        let mut report = TickReport::default();
        if self.immobilized {
            return report;
        }
        let dt = dt.max(0.0);
        let position = port.position();

        self.check_ground(port, position, &mut report);
        self.latch_jump(input.jump);
        let jump_request = self.state.jump_requested;

        let wants_move = input.wants_move();
        if wants_move {
            let running = self.advanced.always_run || input.run;
            self.state.current_target_speed =
                self.movement
                    .target_speed(input.axes, running, self.state.current_target_speed);
        }
        let consuming = self.state.is_grounded() && wants_move && !jump_request;
        self.turbo.tick(input.turbo, consuming, dt);

        let desired = if wants_move {
            self.desired_move(camera, input)
        } else {
            Vec3::ZERO
        };
        if wants_move || self.state.is_wall_running() {
            self.apply_movement(port, desired, jump_request, &mut report);
        }

        if self.state.can_jump() {
            if jump_request {
                self.hold_jump(port, desired, wants_move, dt, &mut report);
            }
            if !self.state.is_grounded() {
                if let JumpPhase::Ascending { elapsed } = self.state.jump {
                    if !jump_request || elapsed >= self.movement.jump_threshold {
                        self.end_ascent(&mut report);
                    }
                }
            }
        }

        let body_right = port.orientation() * RIGHT;
        let scan = self.walls.scan(port, position, body_right);
        self.try_start_wall_run(port, position, body_right, camera, scan, &mut report);
        self.orient_on_wall(port, scan, dt);

        let drag = match self.state.support {
            Support::Grounded { .. } => self.advanced.ground_drag,
            Support::WallRunning(_) => self.movement.wall_run_drag,
            Support::Airborne => 0.0,
        };
        port.set_drag(drag);

        report
    }

    /// Freeze the body and discard all in-flight locomotion state
    ///
    /// Fixed ticks do nothing until [`release`](Self::release).
    pub fn immobilize<P: PhysicsPort + ?Sized>(&mut self, port: &mut P) {
        self.immobilized = true;
        self.state = LocomotionState::new(self.movement.forward_speed);
        self.turbo.deactivate();
        port.set_velocity(Vec3::ZERO);
        debug!("locomotion immobilized");
    }

    /// Resume ticking from a fresh airborne state
    pub fn release(&mut self) {
        if self.immobilized {
            self.immobilized = false;
            debug!("locomotion released");
        }
    }

    fn check_ground<P: PhysicsPort + ?Sized>(
        &mut self,
        port: &P,
        position: Vec3,
        report: &mut TickReport,
    ) {
        let ground = self.ground.probe(port, position);
        let was_grounded = self.state.is_grounded();

        if ground.grounded {
            if self.state.is_wall_running() {
                report.push(LocomotionEvent::WallRunEnded);
            }
            self.state.support = Support::Grounded {
                normal: ground.contact_normal,
            };
            self.state.can_slow_down = true;
            self.state.air_jump = Default::default();
            if !was_grounded {
                if self.state.is_jumping() {
                    self.state.jump = JumpPhase::Idle;
                }
                report.push(LocomotionEvent::Landed);
                trace!(slope = ground.slope_angle(), "landed");
            }
        } else if was_grounded {
            self.state.support = Support::Airborne;
            report.push(LocomotionEvent::LeftGround);
        }
    }

    /// A release in a jumpable state arms the next press
    fn latch_jump(&mut self, jump_held: bool) {
        if jump_held && self.state.jump_armed {
            self.state.jump_requested = true;
        } else if !jump_held && self.state.can_arm_jump() {
            self.state.jump_armed = true;
            self.state.jump_requested = false;
        } else {
            self.state.jump_requested = false;
        }
    }

    /// Camera-relative input flattened onto the ground plane
    fn desired_move(&self, camera: CameraFrame, input: InputSnapshot) -> Vec3 {
        let raw = camera.forward * input.axes.y + camera.right * input.axes.x;
        let on_ground = project_on_plane(raw, self.state.ground_normal());
        on_ground.try_normalize().unwrap_or_else(|| {
            trace!("desired move has no direction on the ground plane");
            Vec3::ZERO
        })
    }

    fn apply_movement<P: PhysicsPort + ?Sized>(
        &mut self,
        port: &mut P,
        desired: Vec3,
        jump_request: bool,
        report: &mut TickReport,
    ) {
        match self.state.support {
            Support::Grounded { normal } => {
                let target = self.state.current_target_speed;
                let boost = self.turbo.speed_multiplier(self.movement.turbo_speed_multiplier);
                if port.velocity().length_squared() < target * target {
                    let slope = self.movement.slope_multiplier(angle_between(normal, UP));
                    port.apply_impulse(desired * target * boost * slope);
                }
            }
            Support::Airborne => {
                if self.advanced.air_control && self.state.can_slow_down {
                    self.aerial_brake(port, desired, report);
                }
            }
            Support::WallRunning(_) => {
                if !jump_request {
                    self.compensate_gravity(port);
                }
            }
        }
    }

    /// Steering against aerial velocity brakes it, once per ground contact
    fn aerial_brake<P: PhysicsPort + ?Sized>(
        &mut self,
        port: &mut P,
        desired: Vec3,
        report: &mut TickReport,
    ) {
        let before = port.velocity();
        let aerial = project(desired, before);
        if !opposed_on_horizontal(aerial, before) {
            return;
        }
        port.apply_impulse(aerial * self.movement.aerial_slow_down_multiplier);

        let after = port.velocity();
        if opposed_on_horizontal(after, before) {
            port.set_velocity(Vec3::new(0.0, after.y, 0.0));
            self.state.can_slow_down = false;
            report.push(LocomotionEvent::AerialBrake);
        }
    }

    fn compensate_gravity<P: PhysicsPort + ?Sized>(&self, port: &mut P) {
        let velocity = port.velocity();
        if velocity.y >= 0.0 {
            return;
        }
        if velocity.length() > self.movement.wall_run_falling_threshold_speed {
            port.apply_impulse(UP * self.movement.max_wall_run_compensation_force);
        }
    }

    fn hold_jump<P: PhysicsPort + ?Sized>(
        &mut self,
        port: &mut P,
        desired: Vec3,
        wants_move: bool,
        dt: f32,
        report: &mut TickReport,
    ) {
        match self.state.jump {
            JumpPhase::Idle => {
                self.state.jump = JumpPhase::Ascending { elapsed: 0.0 };
                self.start_jump(port, desired, wants_move, report);
            }
            JumpPhase::Ascending { elapsed } => {
                self.state.jump = JumpPhase::Ascending {
                    elapsed: elapsed + dt,
                };
            }
        }
        port.apply_impulse(UP * self.movement.jump_force);
    }

    fn start_jump<P: PhysicsPort + ?Sized>(
        &mut self,
        port: &mut P,
        desired: Vec3,
        wants_move: bool,
        report: &mut TickReport,
    ) {
        if self.state.air_jump.can_double_jump() {
            self.state.air_jump.consume();
            let mut velocity = horizontal(port.velocity());
            if wants_move && self.state.steering_unlocked {
                velocity = rotate_about(velocity, UP, signed_angle(velocity, desired, UP));
            }
            port.set_velocity(velocity);
            report.push(LocomotionEvent::DoubleJumped);
            trace!("double jump");
        } else if let Some(contact) = self.state.wall_contact() {
            self.state.wall_run_cooldown = self.movement.wall_run_cooldown;
            self.state.support = Support::Airborne;
            self.state.air_jump.grant();
            port.apply_impulse(contact.normal * self.movement.wall_jump_horizontal_force);
            report.push(LocomotionEvent::WallRunEnded);
            report.push(LocomotionEvent::WallJumped);
            debug!(side = ?contact.side, "wall jump");
        } else {
            report.push(LocomotionEvent::Jumped);
        }
    }

    fn end_ascent(&mut self, report: &mut TickReport) {
        self.state.jump = JumpPhase::Idle;
        self.state.jump_armed = false;
        if self.state.air_jump.end_ascent() {
            self.state.steering_unlocked = true;
        }
        report.push(LocomotionEvent::AscentEnded);
    }

    fn try_start_wall_run<P: PhysicsPort + ?Sized>(
        &mut self,
        port: &mut P,
        position: Vec3,
        body_right: Vec3,
        camera: CameraFrame,
        scan: WallScan,
        report: &mut TickReport,
    ) {
        if self.state.is_grounded()
            || self.state.is_wall_running()
            || self.state.wall_run_cooldown > 0.0
        {
            return;
        }
        let Some(side) = scan.side() else {
            return;
        };
        let Some(contact) = self
            .walls
            .resolve(port, position, body_right, camera.forward, side)
        else {
            return;
        };

        let velocity = port.velocity();
        let along_wall = project(velocity, contact.forward).length();
        if along_wall <= self.movement.wall_run_threshold {
            return;
        }

        self.state.support = Support::WallRunning(contact);
        if velocity.y < 0.0 {
            port.set_velocity(Vec3::new(velocity.x, 0.0, velocity.z));
        }
        if along_wall < self.movement.wall_run_max_speed {
            let boost = self.movement.wall_run_boost_scale(along_wall);
            port.apply_impulse(contact.forward * self.movement.wall_run_force * boost);
        }
        report.push(LocomotionEvent::WallRunStarted(side));
        debug!(?side, speed = along_wall, "wall run started");
    }

    /// Turn toward the wall tangent and bank away from the wall
    fn orient_on_wall<P: PhysicsPort + ?Sized>(&self, port: &mut P, scan: WallScan, dt: f32) {
        let Some(contact) = self.state.wall_contact() else {
            return;
        };
        let max_step = self.movement.wall_run_rotation_speed * dt;

        let body_forward = port.orientation() * FORWARD;
        let yaw = capped_step(
            signed_angle_on_plane(body_forward, contact.forward, UP),
            max_step,
        );
        if yaw != 0.0 {
            port.rotate(UP, yaw);
        }

        let target_up = match scan.side() {
            Some(side) => rotate_about(
                UP,
                contact.forward,
                side.bank_sign() * self.movement.wall_run_angle,
            ),
            None => UP,
        };
        let body_up = port.orientation() * UP;
        let roll = capped_step(
            signed_angle_on_plane(body_up, target_up, contact.forward),
            max_step,
        );
        if roll != 0.0 {
            port.rotate(contact.forward, roll);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::FixedYawRate;
    use crate::state::AirJump;
    use crate::testing::ScriptedPort;
    use crate::wall::WallSide;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    const DT: f32 = 0.02;

    fn capsule() -> CapsuleDimensions {
        CapsuleDimensions {
            radius: 0.5,
            height: 2.0,
        }
    }

    fn controller() -> LocomotionController {
        LocomotionController::with_defaults(capsule()).unwrap()
    }

    fn tick(
        controller: &mut LocomotionController,
        port: &mut ScriptedPort,
        input: InputSnapshot,
    ) -> TickReport {
        controller.fixed_tick(port, CameraFrame::default(), input, DT)
    }

    fn idle() -> InputSnapshot {
        InputSnapshot::default()
    }

    fn jump() -> InputSnapshot {
        InputSnapshot::default().with_jump(true)
    }

    /// Airborne next to a right-hand wall, moving along it at `speed`
    fn beside_wall(speed: f32) -> ScriptedPort {
        let mut port = ScriptedPort::airborne().with_right_wall(0.6);
        port.velocity = FORWARD * speed;
        port
    }

    #[test]
    fn test_rejects_invalid_body() {
        let body = CapsuleDimensions {
            radius: 0.5,
            height: 0.5,
        };
        assert!(matches!(
            LocomotionController::with_defaults(body),
            Err(ConfigError::InvalidBody { .. })
        ));
    }

    #[test]
    fn test_landing_clears_jump() {
        let mut controller = controller();
        let mut port = ScriptedPort::on_ground(UP);
        tick(&mut controller, &mut port, idle());
        let report = tick(&mut controller, &mut port, jump());
        assert!(report.contains(LocomotionEvent::Jumped));
        assert!(controller.is_jumping());

        port.ground_normal = None;
        tick(&mut controller, &mut port, jump());
        assert!(controller.is_jumping());
        assert!(!controller.is_grounded());

        port.ground_normal = Some(UP);
        let report = tick(&mut controller, &mut port, idle());
        assert!(report.contains(LocomotionEvent::Landed));
        assert!(!controller.is_jumping());
        assert_eq!(controller.state().air_jump, AirJump::Pending);
    }

    #[test]
    fn test_jump_impulse_repeats_while_held() {
        let mut controller = controller();
        let mut port = ScriptedPort::on_ground(UP);
        tick(&mut controller, &mut port, idle());
        tick(&mut controller, &mut port, jump());
        port.ground_normal = None;
        tick(&mut controller, &mut port, jump());
        // Two held ticks, two impulses; no drag in the double
        assert!((port.velocity.y - 20.0).abs() < 1e-4);
    }

    #[test]
    fn test_ascent_ends_at_threshold() {
        let mut controller = controller();
        let mut port = ScriptedPort::on_ground(UP);
        tick(&mut controller, &mut port, idle());
        tick(&mut controller, &mut port, jump());
        port.ground_normal = None;

        let mut ended = false;
        for _ in 0..20 {
            if tick(&mut controller, &mut port, jump()).contains(LocomotionEvent::AscentEnded) {
                ended = true;
                break;
            }
        }
        assert!(ended);
        assert!(!controller.is_jumping());
        assert!(controller.state().air_jump.can_double_jump());
    }

    #[test]
    fn test_double_jump_once_per_cycle() {
        let mut controller = controller();
        let mut port = ScriptedPort::on_ground(UP);
        tick(&mut controller, &mut port, idle());
        assert!(tick(&mut controller, &mut port, jump()).contains(LocomotionEvent::Jumped));

        port.ground_normal = None;
        let report = tick(&mut controller, &mut port, idle());
        assert!(report.contains(LocomotionEvent::AscentEnded));
        assert!(controller.state().steering_unlocked);

        tick(&mut controller, &mut port, idle());
        port.velocity = Vec3::new(3.0, -4.0, 0.0);
        let report = tick(&mut controller, &mut port, jump());
        assert!(report.contains(LocomotionEvent::DoubleJumped));
        // Vertical velocity reset before the jump impulse
        assert!((port.velocity.y - 10.0).abs() < 1e-4);
        assert!(!controller.state().air_jump.can_double_jump());

        tick(&mut controller, &mut port, idle());
        tick(&mut controller, &mut port, idle());
        let before = port.velocity;
        let report = tick(&mut controller, &mut port, jump());
        assert!(report.is_empty());
        assert!(!controller.is_jumping());
        assert_eq!(port.velocity, before);
    }

    #[test]
    fn test_double_jump_steers_toward_input() {
        let mut controller = controller();
        let mut port = ScriptedPort::on_ground(UP);
        tick(&mut controller, &mut port, idle());
        tick(&mut controller, &mut port, jump());
        port.ground_normal = None;
        tick(&mut controller, &mut port, idle());
        tick(&mut controller, &mut port, idle());

        port.velocity = Vec3::new(0.0, -2.0, -5.0);
        let strafe_right = InputSnapshot::moving(1.0, 0.0).with_jump(true);
        let report = tick(&mut controller, &mut port, strafe_right);
        assert!(report.contains(LocomotionEvent::DoubleJumped));
        assert!((port.velocity.x - 5.0).abs() < 1e-3);
        assert!(port.velocity.z.abs() < 1e-3);
    }

    #[test]
    fn test_held_button_does_not_rearm() {
        let mut controller = controller();
        let mut port = ScriptedPort::on_ground(UP);
        // Pressed from the first tick: never released, never armed
        for _ in 0..5 {
            let report = tick(&mut controller, &mut port, jump());
            assert!(!report.contains(LocomotionEvent::Jumped));
        }
        assert!(!controller.is_jumping());
    }

    #[test]
    fn test_wall_run_threshold_boundary() {
        let threshold = MovementConfig::default().wall_run_threshold;

        let mut controller = controller();
        let mut port = beside_wall(threshold - 0.01);
        let report = tick(&mut controller, &mut port, idle());
        assert!(!report.contains(LocomotionEvent::WallRunStarted(WallSide::Right)));
        assert!(!controller.is_wall_running());

        let mut controller = self::controller();
        let mut port = beside_wall(threshold + 0.01);
        let report = tick(&mut controller, &mut port, idle());
        assert!(report.contains(LocomotionEvent::WallRunStarted(WallSide::Right)));
        assert!(controller.is_wall_running());
        // Boosted along the wall, almost the full force this close to the threshold
        assert!(port.velocity.z < -100.0);
        assert_eq!(port.drag, MovementConfig::default().wall_run_drag);
    }

    #[test]
    fn test_wall_run_start_cancels_fall() {
        let mut controller = controller();
        let mut port = beside_wall(30.0);
        port.velocity.y = -3.0;
        tick(&mut controller, &mut port, idle());
        assert!(controller.is_wall_running());
        assert_eq!(port.velocity.y, 0.0);
        // Above max speed: no boost
        assert_eq!(port.velocity.z, -30.0);
    }

    #[test]
    fn test_wall_jump_cooldown_blocks_wall_run() {
        let mut controller = controller();
        let mut port = beside_wall(8.0);
        tick(&mut controller, &mut port, idle());
        assert!(controller.is_wall_running());
        tick(&mut controller, &mut port, idle());
        assert!(controller.state().jump_armed);

        let report = tick(&mut controller, &mut port, jump());
        assert!(report.contains(LocomotionEvent::WallJumped));
        assert!(!controller.is_wall_running());
        assert_eq!(controller.state().wall_run_cooldown, 0.4);
        assert_eq!(controller.state().air_jump, AirJump::Granted);
        // Pushed off along the wall's right axis
        assert!(port.velocity.x < -29.0);

        for _ in 0..3 {
            controller.frame_update(0.1);
            tick(&mut controller, &mut port, jump());
            assert!(!controller.is_wall_running());
        }

        controller.frame_update(0.2);
        assert_eq!(controller.state().wall_run_cooldown, 0.0);
        let report = tick(&mut controller, &mut port, idle());
        assert!(report.contains(LocomotionEvent::WallRunStarted(WallSide::Right)));
    }

    #[test]
    fn test_wall_run_gravity_compensation() {
        let mut controller = controller();
        let mut port = beside_wall(30.0);
        tick(&mut controller, &mut port, idle());
        assert!(controller.is_wall_running());

        port.velocity = Vec3::new(0.0, -1.0, -30.0);
        port.impulses.clear();
        tick(&mut controller, &mut port, idle());
        assert_eq!(port.impulses, vec![UP * 8.01]);

        // Slow fall below the no-compensation speed: nothing
        port.velocity = Vec3::new(0.0, -1.0, -5.0);
        port.impulses.clear();
        tick(&mut controller, &mut port, idle());
        assert!(port.impulses.is_empty());
    }

    #[test]
    fn test_wall_run_no_compensation_up_to_falling_speed() {
        let mut controller = controller();
        let mut port = beside_wall(30.0);
        tick(&mut controller, &mut port, idle());
        assert!(controller.is_wall_running());

        // |v| = 12, between the no-compensation and falling speeds
        port.velocity = Vec3::new(0.0, -1.0, -143f32.sqrt());
        port.impulses.clear();
        tick(&mut controller, &mut port, idle());
        assert!(controller.is_wall_running());
        assert!(port.impulses.is_empty());

        // Exactly at the falling speed is still no lift
        port.velocity = Vec3::new(0.0, -9.0, -12.0);
        port.impulses.clear();
        tick(&mut controller, &mut port, idle());
        assert!(port.impulses.is_empty());
    }

    #[test]
    fn test_wall_run_orientation_is_rate_capped() {
        let mut controller = controller();
        let mut port = beside_wall(10.0);
        // Body yawed 10 degrees off the wall tangent
        port.orientation = glam::Quat::from_axis_angle(UP, 10f32.to_radians());
        tick(&mut controller, &mut port, idle());
        assert!(controller.is_wall_running());

        let max_step = 30.0 * DT;
        let off = signed_angle_on_plane(port.forward(), FORWARD, UP);
        assert!((off.abs() - (10.0 - max_step)).abs() < 1e-2);

        for _ in 0..200 {
            tick(&mut controller, &mut port, idle());
        }
        assert!(signed_angle_on_plane(port.forward(), FORWARD, UP).abs() < 1e-2);

        // Right wall: head banks away from it, toward -X
        let bank = signed_angle_on_plane(port.up(), UP, FORWARD);
        assert!((bank.abs() - 15.0).abs() < 0.05);
        assert!(port.up().x < 0.0);
    }

    #[test]
    fn test_support_is_exclusive_under_random_input() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut controller = controller();
        let mut port = ScriptedPort::airborne();

        for _ in 0..5_000 {
            port.ground_normal = rng.gen_bool(0.3).then_some(UP);
            port.right_wall = None;
            port.left_wall = None;
            if rng.gen_bool(0.5) {
                port = port.with_right_wall(rng.gen_range(0.4..1.2));
            }
            if rng.gen_bool(0.3) {
                port = port.with_left_wall(rng.gen_range(0.4..1.2));
            }
            port.velocity = Vec3::new(
                rng.gen_range(-20.0..20.0),
                rng.gen_range(-20.0..20.0),
                rng.gen_range(-20.0..20.0),
            );
            let input = InputSnapshot::moving(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0))
                .with_jump(rng.gen_bool(0.5))
                .with_turbo(rng.gen_bool(0.3));

            controller.frame_update(rng.gen_range(0.0..0.05));
            tick(&mut controller, &mut port, input);

            let state = controller.state();
            assert!(!(state.is_grounded() && state.is_wall_running()));
            assert!(state.wall_run_cooldown >= 0.0);
            let turbo = controller.turbo();
            assert!((0.0..=turbo.max_points()).contains(&turbo.points()));
        }
    }

    #[test]
    fn test_grounded_movement_respects_speed_cap() {
        let mut controller = controller();
        let mut port = ScriptedPort::on_ground(UP);
        let forward = InputSnapshot::moving(0.0, 1.0);

        tick(&mut controller, &mut port, forward);
        // always_run: forward speed 8 doubled
        assert_eq!(controller.state().current_target_speed, 16.0);
        assert!((port.velocity - FORWARD * 16.0).length() < 1e-4);
        assert_eq!(port.drag, 5.0);

        port.impulses.clear();
        tick(&mut controller, &mut port, forward);
        assert!(port.impulses.is_empty());
    }

    #[test]
    fn test_slope_reduces_ground_force() {
        let mut controller = controller();
        let steep = rotate_about(UP, RIGHT, 60.0);
        let mut port = ScriptedPort::on_ground(steep);
        tick(&mut controller, &mut port, InputSnapshot::moving(0.0, 1.0));

        let expected = 16.0 * MovementConfig::default().slope_multiplier(60.0);
        assert!((port.velocity.length() - expected).abs() < 1e-3);
    }

    #[test]
    fn test_aerial_brake_stops_once() {
        let advanced = AdvancedSettings {
            air_control: true,
            ..Default::default()
        };
        let mut controller =
            LocomotionController::new(MovementConfig::default(), advanced, capsule()).unwrap();
        let mut port = ScriptedPort::on_ground(UP);
        tick(&mut controller, &mut port, idle());

        port.ground_normal = None;
        port.velocity = Vec3::new(0.0, -1.0, -1.0);
        let back = InputSnapshot::moving(0.0, -1.0);
        let report = tick(&mut controller, &mut port, back);
        assert!(report.contains(LocomotionEvent::AerialBrake));
        // Horizontal motion gone, the brake's vertical share kept
        assert_eq!(port.velocity, Vec3::new(0.0, 0.5, 0.0));
        assert!(!controller.state().can_slow_down);

        port.velocity = Vec3::new(0.0, -1.0, -1.0);
        let report = tick(&mut controller, &mut port, back);
        assert!(!report.contains(LocomotionEvent::AerialBrake));
        assert_eq!(port.velocity, Vec3::new(0.0, -1.0, -1.0));
    }

    #[test]
    fn test_turbo_boosts_ground_force() {
        let mut controller = controller();
        let mut port = ScriptedPort::on_ground(UP);
        let input = InputSnapshot::moving(0.0, 1.0).with_turbo(true);
        tick(&mut controller, &mut port, input);
        assert!(controller.turbo().is_active());
        assert!((port.velocity.length() - 16.0 * 1.3).abs() < 1e-3);
        assert!(controller.turbo().points() < 100.0);
    }

    #[test]
    fn test_view_rotation_turns_grounded_velocity() {
        let mut controller = controller();
        let mut port = ScriptedPort::on_ground(UP);
        tick(&mut controller, &mut port, idle());
        port.velocity = FORWARD * 4.0;

        controller.rotate_view(&mut port, &mut FixedYawRate { degrees_per_call: 90.0 });
        assert!((port.forward() - Vec3::NEG_X).length() < 1e-4);
        assert!((port.velocity - Vec3::NEG_X * 4.0).length() < 1e-4);
    }

    #[test]
    fn test_view_rotation_skipped_on_wall() {
        let mut controller = controller();
        let mut port = beside_wall(10.0);
        tick(&mut controller, &mut port, idle());
        assert!(controller.is_wall_running());

        let before = port.orientation;
        controller.rotate_view(&mut port, &mut FixedYawRate { degrees_per_call: 45.0 });
        assert_eq!(port.orientation, before);
    }

    #[test]
    fn test_immobilize_discards_state() {
        let mut controller = controller();
        let mut port = beside_wall(10.0);
        tick(&mut controller, &mut port, idle());
        assert!(controller.is_wall_running());

        controller.immobilize(&mut port);
        assert!(controller.is_immobilized());
        assert!(!controller.is_wall_running());
        assert_eq!(port.velocity, Vec3::ZERO);

        port.velocity = FORWARD * 10.0;
        let report = tick(&mut controller, &mut port, jump());
        assert!(report.is_empty());
        assert!(!controller.is_wall_running());

        controller.release();
        tick(&mut controller, &mut port, idle());
        assert!(controller.is_wall_running());
    }
}
