use serde::{Deserialize, Serialize};

use super::AxisTargets;
use crate::config::ClimberConfig;
use crate::constants::climber::*;
use crate::input::ClimberInput;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn clamp(&self, value: f64) -> f64 {
        value.max(self.min).min(self.max)
    }
}

/// Mechanical range of each axis class. Both extensions share one range.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct AxisLimits {
    pub rotate_right: Bounds,
    pub rotate_left: Bounds,
    pub extend: Bounds,
}

impl Default for AxisLimits {
    fn default() -> Self {
        Self {
            rotate_right: Bounds::new(ROTATE_RIGHT_MIN, ROTATE_RIGHT_MAX),
            rotate_left: Bounds::new(ROTATE_LEFT_MIN, ROTATE_LEFT_MAX),
            extend: Bounds::new(EXTEND_MIN, EXTEND_MAX),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClampPolicy {
    /// Each axis clamped to its own range.
    Independent,
    /// The two arms share one range: rotation pushed past zero on one side is
    /// handed to the other arm before clamping.
    LinkedRedistribute,
}

impl ClampPolicy {
    pub fn apply(&self, targets: &mut AxisTargets, limits: &AxisLimits) {
        if *self == ClampPolicy::LinkedRedistribute {
            if targets.right_rotate > limits.rotate_right.max
                && targets.left_rotate < limits.rotate_left.max
            {
                targets.left_rotate += targets.right_rotate;
                targets.right_rotate = limits.rotate_right.max;
            }
            if targets.left_rotate < limits.rotate_left.min
                && targets.right_rotate > limits.rotate_right.min
            {
                targets.right_rotate += targets.left_rotate;
                targets.left_rotate = limits.rotate_left.min;
            }
        }

        targets.right_rotate = limits.rotate_right.clamp(targets.right_rotate);
        targets.left_rotate = limits.rotate_left.clamp(targets.left_rotate);
        targets.right_extend = limits.extend.clamp(targets.right_extend);
        targets.left_extend = limits.extend.clamp(targets.left_extend);
    }
}

/// Nudges targets from the face buttons and sticks. Stick forward (positive)
/// pulls the extension in.
pub fn apply_trim(targets: &mut AxisTargets, input: &ClimberInput, config: &ClimberConfig) {
    let rotate = config.rotate_trim;
    let extend = config.extend_trim;
    let threshold = config.stick_threshold;

    if input.left_rotate_up {
        targets.left_rotate += rotate;
    }
    if input.left_rotate_down {
        targets.left_rotate -= rotate;
    }

    if input.right_rotate_up {
        targets.right_rotate += rotate;
    }
    if input.right_rotate_down {
        targets.right_rotate -= rotate;
    }

    if input.left_stick_y > threshold {
        targets.left_extend -= extend;
    }
    if input.left_stick_y < -threshold {
        targets.left_extend += extend;
    }

    if input.right_stick_y > threshold {
        targets.right_extend -= extend;
    }
    if input.right_stick_y < -threshold {
        targets.right_extend += extend;
    }
}
