//! Bus-free stand-ins used by the unit tests.

use std::cell::RefCell;
use std::rc::Rc;

use super::Actuator;
use crate::telemetry::TelemetrySink;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Position(f64),
    Profiled(f64),
    Raw(f64),
    Zero,
    MaxVelocity(f64),
}

#[derive(Debug, Default, Clone)]
pub struct FakeActuator {
    pub position: f64,
    pub velocity: f64,
    pub current: f64,
    pub commands: Vec<Command>,
}

impl FakeActuator {
    pub fn with_readings(position: f64, velocity: f64, current: f64) -> Self {
        Self {
            position,
            velocity,
            current,
            commands: Vec::new(),
        }
    }

    pub fn last(&self) -> Option<&Command> {
        self.commands.last()
    }

    pub fn velocity_writes(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, Command::MaxVelocity(_)))
            .count()
    }
}

impl Actuator for FakeActuator {
    fn set_position_target(&mut self, position: f64) {
        self.commands.push(Command::Position(position));
    }

    fn set_profiled_position_target(&mut self, position: f64) {
        self.commands.push(Command::Profiled(position));
    }

    fn set_raw_output(&mut self, output: f64) {
        self.commands.push(Command::Raw(output));
    }

    fn get_position(&self) -> f64 {
        self.position
    }

    fn get_velocity(&self) -> f64 {
        self.velocity
    }

    fn get_current(&self) -> f64 {
        self.current
    }

    fn zero_position(&mut self) {
        self.position = 0.;
        self.commands.push(Command::Zero);
    }

    fn set_profile_max_velocity(&mut self, velocity: f64) {
        self.commands.push(Command::MaxVelocity(velocity));
    }
}

/// Sink that shares its samples so the test can inspect them after the climber owns it.
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    pub samples: Rc<RefCell<Vec<f64>>>,
}

impl TelemetrySink for RecordingSink {
    fn append(&mut self, value: f64) {
        self.samples.borrow_mut().push(value);
    }
}
