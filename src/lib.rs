pub mod config;
pub mod constants;
pub mod container;
pub mod hardware;
pub mod input;
pub mod subsystems;
pub mod telemetry;

#[cfg(feature = "hardware")]
mod robot {
    use std::cell::RefCell;
    use std::io;
    use std::rc::Rc;

    use frcrs::input::Joystick;
    use tracing::warn;

    use crate::config::{ClimberConfig, ConfigError};
    use crate::constants::{climber, joystick_map};
    use crate::container::ClimberControlState;
    use crate::hardware::frc::{climber_motors, ClimberMotor};
    use crate::subsystems::Climber;
    use crate::telemetry::{ClimberTelemetry, DataLog, LogEntry};

    pub struct Controllers {
        pub operator: Joystick,
    }

    pub struct Ferris {
        pub controllers: Controllers,
        pub climber: Climber<ClimberMotor, LogEntry>,
        pub climber_state: ClimberControlState,
        pub data_log: Rc<RefCell<DataLog>>,
    }

    impl Ferris {
        pub fn new() -> Result<Self, ConfigError> {
            let config = ClimberConfig::load_or_default(climber::CONFIG_PATH);

            let data_log = DataLog::open(climber::DATA_LOG_PATH)
                .unwrap_or_else(|e| {
                    warn!("Climber data log disabled: {e}");
                    DataLog::from_writer(io::sink())
                })
                .shared();

            let climber = Climber::new(
                climber_motors(&config),
                ClimberTelemetry::data_log(&data_log),
                config,
            )?;

            Ok(Ferris {
                controllers: Controllers {
                    operator: Joystick::new(joystick_map::OPERATOR),
                },
                climber,
                climber_state: ClimberControlState::default(),
                data_log,
            })
        }
    }
}

#[cfg(feature = "hardware")]
pub use robot::*;
