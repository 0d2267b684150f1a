mod mode;
mod sequencer;
mod trim;

pub use mode::*;
pub use sequencer::*;
pub use trim::*;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::{ClimberConfig, ConfigError};
use crate::hardware::Actuator;
use crate::input::ClimberInput;
use crate::telemetry::{ClimberTelemetry, TelemetrySink};

/// Position setpoints, degrees for the arms and extension units for the hooks.
#[derive(Serialize, Deserialize, Debug, Default, Clone, Copy, PartialEq)]
#[serde(from = "[f64; 4]", into = "[f64; 4]")]
pub struct AxisTargets {
    pub left_rotate: f64,
    pub right_rotate: f64,
    pub left_extend: f64,
    pub right_extend: f64,
}

impl From<[f64; 4]> for AxisTargets {
    fn from([left_rotate, right_rotate, left_extend, right_extend]: [f64; 4]) -> Self {
        Self {
            left_rotate,
            right_rotate,
            left_extend,
            right_extend,
        }
    }
}

impl From<AxisTargets> for [f64; 4] {
    fn from(targets: AxisTargets) -> Self {
        [
            targets.left_rotate,
            targets.right_rotate,
            targets.left_extend,
            targets.right_extend,
        ]
    }
}

/// One of something per climber axis.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ClimberAxes<T> {
    pub rotate_left: T,
    pub rotate_right: T,
    pub extend_left: T,
    pub extend_right: T,
}

impl<T> ClimberAxes<T> {
    pub fn splat(value: T) -> Self
    where
        T: Clone,
    {
        Self {
            rotate_left: value.clone(),
            rotate_right: value.clone(),
            extend_left: value.clone(),
            extend_right: value,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        [
            &self.rotate_left,
            &self.rotate_right,
            &self.extend_left,
            &self.extend_right,
        ]
        .into_iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        [
            &mut self.rotate_left,
            &mut self.rotate_right,
            &mut self.extend_left,
            &mut self.extend_right,
        ]
        .into_iter()
    }
}

/// What the climber did this cycle, for the dashboard.
#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct CycleReport {
    pub mode: ClimberMode,
    pub step: usize,
    pub targets: AxisTargets,
}

pub struct Climber<A, S> {
    axes: ClimberAxes<A>,
    telemetry: ClimberTelemetry<S>,
    config: ClimberConfig,
    table: ClimbStepTable,
    sequencer: StepSequencer,
    mode_state: ModeState,
    targets: AxisTargets,
}

impl<A: Actuator, S: TelemetrySink> Climber<A, S> {
    pub fn new(
        axes: ClimberAxes<A>,
        telemetry: ClimberTelemetry<S>,
        config: ClimberConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let table = config.step_table()?;
        let targets = table.row(0);

        Ok(Self {
            axes,
            telemetry,
            config,
            table,
            sequencer: StepSequencer::default(),
            mode_state: ModeState::default(),
            targets,
        })
    }

    pub fn axes(&self) -> &ClimberAxes<A> {
        &self.axes
    }

    pub fn targets(&self) -> AxisTargets {
        self.targets
    }

    #[cfg(test)]
    fn set_targets(&mut self, targets: AxisTargets) {
        self.targets = targets;
    }

    pub fn step(&self) -> usize {
        self.sequencer.current_step()
    }

    pub fn num_steps(&self) -> usize {
        self.table.num_steps()
    }

    pub fn step_pending(&self) -> bool {
        self.sequencer.pending()
    }

    pub fn mode_state(&self) -> ModeState {
        self.mode_state
    }

    pub fn advance(&mut self) {
        self.sequencer.advance(self.table.num_steps());
        debug!("Climber step -> {}", self.sequencer.current_step());
    }

    pub fn retreat(&mut self) {
        self.sequencer.retreat();
        debug!("Climber step -> {}", self.sequencer.current_step());
    }

    pub fn reset(&mut self) {
        self.sequencer.reset();
    }

    /// Treat the current pose as encoder zero and go back to the first step.
    pub fn zero(&mut self) {
        for axis in self.axes.iter_mut() {
            axis.zero_position();
        }

        self.sequencer.clear();
        self.targets = self.table.row(0);
        debug!("Climber zeroed");
    }

    pub fn periodic(&mut self, input: &ClimberInput) -> CycleReport {
        let mode = ClimberMode::select(input, self.config.slow_trigger_threshold);

        match mode {
            ClimberMode::Fast => self.run_active(mode, 1., ClampPolicy::Independent, input),
            ClimberMode::Slow => self.run_active(
                mode,
                self.config.slow_velocity_scale,
                ClampPolicy::LinkedRedistribute,
                input,
            ),
            ClimberMode::Idle => {
                for axis in self.axes.iter_mut() {
                    axis.set_raw_output(0.);
                }
                self.mode_state.enter(mode);
            }
        }

        self.telemetry.capture(&self.axes);

        CycleReport {
            mode,
            step: self.sequencer.current_step(),
            targets: self.targets,
        }
    }

    fn run_active(
        &mut self,
        mode: ClimberMode,
        velocity_scale: f64,
        policy: ClampPolicy,
        input: &ClimberInput,
    ) {
        if self.mode_state.enter(mode) {
            let velocity = self.config.max_velocity * velocity_scale;
            for axis in self.axes.iter_mut() {
                axis.set_profile_max_velocity(velocity);
            }
            info!("Climber entering {} mode, max velocity {velocity}", mode.name());
        }

        if input.reset_step {
            self.sequencer.reset();
        }
        if let Some(step) = self.sequencer.take_changed() {
            self.targets = self.table.row(step);
        }

        apply_trim(&mut self.targets, input, &self.config);

        if input.override_trigger < self.config.override_threshold {
            policy.apply(&mut self.targets, &self.config.limits);
        }

        self.dispatch();
    }

    fn dispatch(&mut self) {
        let AxisTargets {
            left_rotate,
            right_rotate,
            left_extend,
            right_extend,
        } = self.targets;

        self.axes.rotate_left.set_position_target(left_rotate);
        self.axes.rotate_right.set_position_target(right_rotate);
        self.axes.extend_left.set_profiled_position_target(left_extend);
        self.axes.extend_right.set_profiled_position_target(right_extend);
    }
}
