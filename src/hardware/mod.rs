mod estimator;
mod profile;

#[cfg(feature = "hardware")]
pub mod frc;
#[cfg(test)]
pub mod mock;

pub use estimator::*;
pub use profile::*;

/// One motor-driven climber axis with its closed-loop controller and encoder.
///
/// Commands are fire and forget. Faults on the bus are the implementor's problem.
pub trait Actuator {
    /// Plain closed-loop position control.
    fn set_position_target(&mut self, position: f64);

    /// Position control limited by the configured profile velocity and acceleration.
    fn set_profiled_position_target(&mut self, position: f64);

    /// Open-loop output in [-1, 1].
    fn set_raw_output(&mut self, output: f64);

    fn get_position(&self) -> f64;
    fn get_velocity(&self) -> f64;
    fn get_current(&self) -> f64;

    fn zero_position(&mut self);

    fn set_profile_max_velocity(&mut self, velocity: f64);
}
