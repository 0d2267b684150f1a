use std::time::Duration;

/// Velocity and acceleration limited setpoint generator.
///
/// Every call moves the setpoint toward the goal by one step of a trapezoidal
/// velocity profile, braking early enough to land on the goal.
#[derive(Debug, Clone, PartialEq)]
pub struct TrapezoidProfile {
    pub max_velocity: f64,
    pub max_acceleration: f64,
    pub allowed_error: f64,
    position: f64,
    velocity: f64,
}

impl TrapezoidProfile {
    pub fn new(max_velocity: f64, max_acceleration: f64, allowed_error: f64) -> Self {
        Self {
            max_velocity,
            max_acceleration,
            allowed_error,
            position: 0.,
            velocity: 0.,
        }
    }

    /// Restart the profile at rest from a measured position.
    pub fn reset(&mut self, position: f64) {
        self.position = position;
        self.velocity = 0.;
    }

    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    pub fn calculate(&mut self, goal: f64, dt: Duration) -> f64 {
        let dt = dt.as_secs_f64();
        let error = goal - self.position;

        if error.abs() <= self.allowed_error {
            self.position = goal;
            self.velocity = 0.;
            return goal;
        }

        // fastest speed we can still brake from before the goal
        let braking = (2. * self.max_acceleration * error.abs()).sqrt();
        let cruise = error.signum() * braking.min(self.max_velocity);

        let max_dv = self.max_acceleration * dt;
        self.velocity += (cruise - self.velocity).clamp(-max_dv, max_dv);
        self.position += self.velocity * dt;

        if (goal - self.position).signum() != error.signum() {
            self.position = goal;
            self.velocity = 0.;
        }

        self.position
    }
}
