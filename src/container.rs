use crate::hardware::Actuator;
use crate::input::{ClimberInput, EdgeTrigger};
use crate::subsystems::climber::CycleReport;
use crate::subsystems::Climber;
use crate::telemetry::TelemetrySink;

#[derive(Default)]
pub struct ClimberControlState {
    advance: EdgeTrigger,
    retreat: EdgeTrigger,
    zero: EdgeTrigger,
}

/// Teleop climber handling: step buttons fire on press, then the climber runs its cycle.
pub fn control_climber<A: Actuator, S: TelemetrySink>(
    climber: &mut Climber<A, S>,
    input: &ClimberInput,
    state: &mut ClimberControlState,
) -> CycleReport {
    let zero = state.zero.rising(input.zero);
    let advance = state.advance.rising(input.step_advance);
    let retreat = state.retreat.rising(input.step_retreat);

    if zero {
        climber.zero();
    } else {
        if advance {
            climber.advance();
        }
        if retreat {
            climber.retreat();
        }
    }

    climber.periodic(input)
}
