use super::AxisTargets;
use crate::config::ConfigError;

/// Ordered climb presets. Never empty, so row 0 always exists.
#[derive(Debug, Clone, PartialEq)]
pub struct ClimbStepTable {
    rows: Vec<AxisTargets>,
}

impl ClimbStepTable {
    pub fn new(rows: Vec<AxisTargets>) -> Result<Self, ConfigError> {
        if rows.is_empty() {
            return Err(ConfigError::EmptyStepTable);
        }
        Ok(Self { rows })
    }

    /// Index of the last step.
    pub fn num_steps(&self) -> usize {
        self.rows.len() - 1
    }

    pub fn row(&self, step: usize) -> AxisTargets {
        self.rows[step.min(self.num_steps())]
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct StepSequencer {
    current_step: usize,
    step_just_changed: bool,
}

impl StepSequencer {
    pub fn current_step(&self) -> usize {
        self.current_step
    }

    pub fn pending(&self) -> bool {
        self.step_just_changed
    }

    pub fn advance(&mut self, num_steps: usize) {
        if self.current_step < num_steps {
            self.current_step += 1;
            self.step_just_changed = true;
        }
    }

    pub fn retreat(&mut self) {
        if self.current_step > 0 {
            self.current_step -= 1;
            self.step_just_changed = true;
        }
    }

    pub fn reset(&mut self) {
        self.current_step = 0;
        self.step_just_changed = true;
    }

    /// Step to reload targets from, once per transition.
    pub fn take_changed(&mut self) -> Option<usize> {
        if self.step_just_changed {
            self.step_just_changed = false;
            Some(self.current_step)
        } else {
            None
        }
    }

    pub(super) fn clear(&mut self) {
        self.current_step = 0;
        self.step_just_changed = false;
    }
}
