#[cfg(feature = "hardware")]
use crate::constants::joystick_map::*;
#[cfg(feature = "hardware")]
use frcrs::input::Joystick;

/// One cycle's worth of operator controller state.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct ClimberInput {
    /// Right bumper.
    pub fast: bool,
    /// Right trigger, 0 to 1.
    pub slow_trigger: f64,
    /// Left trigger, 0 to 1. Held past the threshold, limits are ignored.
    pub override_trigger: f64,
    pub reset_step: bool,

    pub left_rotate_up: bool,
    pub left_rotate_down: bool,
    pub right_rotate_up: bool,
    pub right_rotate_down: bool,

    /// Stick axes, -1 to 1.
    pub left_stick_y: f64,
    pub right_stick_y: f64,

    pub step_advance: bool,
    pub step_retreat: bool,
    pub zero: bool,
}

#[cfg(feature = "hardware")]
impl ClimberInput {
    pub fn read(operator: &Joystick) -> Self {
        Self {
            fast: operator.get(FAST_MODE),
            slow_trigger: operator.get_axis(SLOW_TRIGGER),
            override_trigger: operator.get_axis(OVERRIDE_TRIGGER),
            reset_step: operator.get(STEP_RESET),

            left_rotate_up: operator.get(LEFT_ROTATE_UP),
            left_rotate_down: operator.get(LEFT_ROTATE_DOWN),
            right_rotate_up: operator.get(RIGHT_ROTATE_UP),
            right_rotate_down: operator.get(RIGHT_ROTATE_DOWN),

            left_stick_y: operator.get_axis(LEFT_Y),
            right_stick_y: operator.get_axis(RIGHT_Y),

            step_advance: operator.get(STEP_ADVANCE),
            step_retreat: operator.get(STEP_RETREAT),
            zero: operator.get(ZERO_CLIMBER),
        }
    }
}
