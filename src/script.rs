//! Scripted input track for the headless demo

use parkour_locomotion::RawInput;

/// Input held from `start` until the next step begins
#[derive(Debug, Clone, Copy)]
pub struct ScriptStep {
    /// Simulated time in seconds
    pub start: f32,
    pub input: RawInput,
    /// View yaw rate in degrees per second
    pub yaw_rate: f32,
}

impl ScriptStep {
    fn new(start: f32, input: RawInput) -> Self {
        Self {
            start,
            input,
            yaw_rate: 0.0,
        }
    }

    fn turning(mut self, yaw_rate: f32) -> Self {
        self.yaw_rate = yaw_rate;
        self
    }
}

/// A timeline of input steps
#[derive(Debug, Clone)]
pub struct InputScript {
    steps: Vec<ScriptStep>,
}

impl InputScript {
    /// Build a script; steps are ordered by start time
    pub fn new(mut steps: Vec<ScriptStep>) -> Self {
        steps.sort_by(|a, b| a.start.total_cmp(&b.start));
        Self { steps }
    }

    /// Run up, jump onto the right wall, wall jump, air jump, then turbo and look around
    pub fn wall_run_course() -> Self {
        let forward = RawInput {
            vertical: 1.0,
            ..Default::default()
        };
        let jump = RawInput {
            jump: true,
            ..forward
        };
        let turbo = RawInput {
            turbo: true,
            ..forward
        };

        Self::new(vec![
            ScriptStep::new(0.0, RawInput::default()),
            ScriptStep::new(0.3, forward),
            ScriptStep::new(0.8, jump),
            ScriptStep::new(1.0, forward),
            ScriptStep::new(2.2, jump),
            ScriptStep::new(2.4, forward),
            ScriptStep::new(2.7, jump),
            ScriptStep::new(2.9, forward),
            ScriptStep::new(4.0, turbo),
            ScriptStep::new(5.0, RawInput::default()).turning(90.0),
        ])
    }

    /// Input and yaw rate in effect at `time`
    pub fn sample(&self, time: f32) -> (RawInput, f32) {
        let idx = self.steps.partition_point(|step| step.start <= time);
        match idx.checked_sub(1).and_then(|i| self.steps.get(i)) {
            Some(step) => (step.input, step.yaw_rate),
            None => (RawInput::default(), 0.0),
        }
    }

    /// Start time of the last step
    pub fn last_start(&self) -> f32 {
        self.steps.last().map_or(0.0, |step| step.start)
    }
}
