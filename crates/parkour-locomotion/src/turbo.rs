//! Turbo point pool

/// Drains while boosting on the ground, refills while idle
#[derive(Debug, Clone)]
pub struct TurboMeter {
    points: f32,
    max_points: f32,
    reload_rate: f32,
    consumption_rate: f32,
    active: bool,
}

impl TurboMeter {
    /// A full meter
    pub fn new(max_points: f32, reload_rate: f32, consumption_rate: f32) -> Self {
        Self {
            points: max_points,
            max_points,
            reload_rate,
            consumption_rate,
            active: false,
        }
    }

    pub fn points(&self) -> f32 {
        self.points
    }

    pub fn max_points(&self) -> f32 {
        self.max_points
    }

    /// Fill level in [0, 1]
    pub fn fraction(&self) -> f32 {
        if self.max_points > 0.0 {
            self.points / self.max_points
        } else {
            0.0
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Speed factor for this tick
    pub fn speed_multiplier(&self, boost: f32) -> f32 {
        if self.active {
            boost
        } else {
            1.0
        }
    }

    /// Advance one fixed tick
    ///
    /// Activation toggles: a press only activates a meter that was inactive on
    /// the previous tick and still has points, so holding the button pulses
    /// on alternate ticks. Points drain only while active and `consuming`
    /// (grounded, moving, not jumping) and refill whenever inactive.
    pub fn tick(&mut self, pressed: bool, consuming: bool, dt: f32) {
        self.active = pressed && !self.active && self.points > 0.0;

        if !self.active {
            self.points += self.reload_rate * dt;
        } else if consuming {
            self.points -= self.consumption_rate * dt;
        }
        self.points = self.points.clamp(0.0, self.max_points);
    }

    /// Drop an in-flight activation, keeping the balance
    pub fn deactivate(&mut self) {
        self.active = false;
    }
}
