use std::time::{Duration, Instant};

use frcrs::ctre::{ControlMode, Talon};

use super::{Actuator, TrapezoidProfile, VelocityEstimator};
use crate::config::ClimberConfig;
use crate::constants::climber::{EXTEND_UNITS_PER_ROTATION, ROTATE_DEGREES_PER_ROTATION};
use crate::subsystems::climber::ClimberAxes;

// Longest step the profile is allowed to take after a missed cycle
const MAX_PROFILE_DT: Duration = Duration::from_millis(100);

/// A climber Talon, scaled to arm units.
///
/// Profiled targets run on the Talon's Motion Magic. The goal handed to it is
/// rate limited by `profile` so the max velocity can change between modes at runtime.
pub struct ClimberMotor {
    talon: Talon,
    units_per_rotation: f64,
    offset: f64,
    profile: TrapezoidProfile,
    profiling: bool,
    last_profile_step: Instant,
    velocity: VelocityEstimator,
}

impl ClimberMotor {
    pub fn new(id: i32, units_per_rotation: f64, config: &ClimberConfig) -> Self {
        Self {
            talon: Talon::new(id, Some("can0".to_owned())),
            units_per_rotation,
            offset: 0.,
            profile: TrapezoidProfile::new(
                config.max_velocity,
                config.max_acceleration,
                config.allowed_error,
            ),
            profiling: false,
            last_profile_step: Instant::now(),
            velocity: VelocityEstimator::default(),
        }
    }

    pub fn rotation(id: i32, config: &ClimberConfig) -> Self {
        Self::new(id, ROTATE_DEGREES_PER_ROTATION, config)
    }

    pub fn extension(id: i32, config: &ClimberConfig) -> Self {
        Self::new(id, EXTEND_UNITS_PER_ROTATION, config)
    }

    fn to_rotations(&self, position: f64) -> f64 {
        position / self.units_per_rotation + self.offset
    }

    // Every cycle sends exactly one command per axis, so this runs once per cycle
    fn sample(&mut self) {
        let position = self.get_position();
        self.velocity.update(position, Instant::now());
    }
}

impl Actuator for ClimberMotor {
    fn set_position_target(&mut self, position: f64) {
        self.sample();
        self.profiling = false;
        self.talon.set(ControlMode::Position, self.to_rotations(position));
    }

    fn set_profiled_position_target(&mut self, position: f64) {
        self.sample();
        if !self.profiling {
            self.profile.reset(self.get_position());
            self.last_profile_step = Instant::now();
            self.profiling = true;
        }

        let dt = self.last_profile_step.elapsed().min(MAX_PROFILE_DT);
        self.last_profile_step = Instant::now();

        let goal = self.profile.calculate(position, dt);
        self.talon.set(ControlMode::MotionMagic, self.to_rotations(goal));
    }

    fn set_raw_output(&mut self, output: f64) {
        self.sample();
        self.profiling = false;
        self.talon.set(ControlMode::Percent, output);
    }

    fn get_position(&self) -> f64 {
        (self.talon.get_position() - self.offset) * self.units_per_rotation
    }

    fn get_velocity(&self) -> f64 {
        self.velocity.velocity()
    }

    fn get_current(&self) -> f64 {
        self.talon.get_current()
    }

    fn zero_position(&mut self) {
        self.offset = self.talon.get_position();
        self.profile.reset(0.);
        self.velocity.reset();
    }

    fn set_profile_max_velocity(&mut self, velocity: f64) {
        self.profile.max_velocity = velocity;
    }
}

pub fn climber_motors(config: &ClimberConfig) -> ClimberAxes<ClimberMotor> {
    use crate::constants::robotmap::climber::*;

    ClimberAxes {
        rotate_left: ClimberMotor::rotation(ROTATE_LEFT, config),
        rotate_right: ClimberMotor::rotation(ROTATE_RIGHT, config),
        extend_left: ClimberMotor::extension(EXTEND_LEFT, config),
        extend_right: ClimberMotor::extension(EXTEND_RIGHT, config),
    }
}
