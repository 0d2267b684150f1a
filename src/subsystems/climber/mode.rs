use serde::Serialize;

use crate::input::ClimberInput;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub enum ClimberMode {
    Idle,
    Fast,
    Slow,
}

impl ClimberMode {
    /// Bumper wins over trigger, anything else is idle.
    pub fn select(input: &ClimberInput, slow_threshold: f64) -> Self {
        if input.fast {
            ClimberMode::Fast
        } else if input.slow_trigger > slow_threshold {
            ClimberMode::Slow
        } else {
            ClimberMode::Idle
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ClimberMode::Idle => "Idle",
            ClimberMode::Fast => "Fast",
            ClimberMode::Slow => "Slow",
        }
    }
}

/// Which mode the profile velocity is currently programmed for.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ModeState {
    fast_active: bool,
    slow_active: bool,
}

impl ModeState {
    pub fn fast_active(&self) -> bool {
        self.fast_active
    }

    pub fn slow_active(&self) -> bool {
        self.slow_active
    }

    /// Records the mode for this cycle. Returns true only on the cycle a fast or
    /// slow mode is entered, which is when velocity limits need writing.
    pub fn enter(&mut self, mode: ClimberMode) -> bool {
        match mode {
            ClimberMode::Fast if !self.fast_active => {
                self.fast_active = true;
                self.slow_active = false;
                true
            }
            ClimberMode::Slow if !self.slow_active => {
                self.slow_active = true;
                self.fast_active = false;
                true
            }
            ClimberMode::Fast | ClimberMode::Slow => false,
            ClimberMode::Idle => {
                self.fast_active = false;
                self.slow_active = false;
                false
            }
        }
    }
}
