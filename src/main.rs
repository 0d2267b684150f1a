#![warn(non_snake_case)]

use frcrs::input::RobotState;
use frcrs::networktables::NetworkTable;
use frcrs::telemetry::Telemetry;
use frcrs::{init_hal, observe_user_program_starting, refresh_data};
use tokio::task;
use tokio::time::{sleep, Duration, Instant};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use RobotCode2022::constants::FPS_LIMIT;
use RobotCode2022::container::control_climber;
use RobotCode2022::input::ClimberInput;
use RobotCode2022::subsystems::climber::CycleReport;
use RobotCode2022::Ferris;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .compact()
        .init();

    let runtime = tokio::runtime::Runtime::new().unwrap();
    let local = task::LocalSet::new();

    let mut ferris = match Ferris::new() {
        Ok(ferris) => ferris,
        Err(e) => {
            error!("Failed to build climber: {e}");
            panic!("Failed to build climber: {e}");
        }
    };

    runtime.block_on(local.run_until(async {
        if !init_hal() {
            panic!("Failed to initialize HAL");
        }

        observe_user_program_starting();

        Telemetry::init(5807);

        NetworkTable::init();

        info!("Climber ready, {} steps", ferris.climber.num_steps() + 1);

        let mut last_loop = Instant::now();

        loop {
            refresh_data();

            let state = RobotState::get();

            // disabled still samples telemetry, with no buttons held
            let input = if state.enabled() && state.teleop() {
                ClimberInput::read(&ferris.controllers.operator)
            } else {
                ClimberInput::default()
            };

            let report = control_climber(&mut ferris.climber, &input, &mut ferris.climber_state);
            post_report(&report).await;

            Telemetry::put_number("Loop Rate", 1. / last_loop.elapsed().as_secs_f64()).await;

            if !state.enabled() {
                ferris.data_log.borrow_mut().flush();
            }

            let elapsed = last_loop.elapsed().as_secs_f64();
            let left = (1. / FPS_LIMIT - elapsed).max(0.);
            sleep(Duration::from_secs_f64(left)).await;
            last_loop = Instant::now();
        }
    }));
}

async fn post_report(report: &CycleReport) {
    Telemetry::put_number("climber step", report.step as f64).await;
    Telemetry::put_string("climber mode", report.mode.name().to_string()).await;
    Telemetry::put_number("climber left rotate", report.targets.left_rotate).await;
    Telemetry::put_number("climber right rotate", report.targets.right_rotate).await;
    Telemetry::put_number("climber left extend", report.targets.left_extend).await;
    Telemetry::put_number("climber right extend", report.targets.right_extend).await;
}
