//! Colliding Copters entry point
//!
//! Runs the simulation on the headless backend and prints a JSON run summary.

use std::path::Path;
use std::process::ExitCode;

use colliding_copters::game::{RunStats, run_headless};
use colliding_copters::Settings;

/// Settings file looked up in the working directory
const SETTINGS_PATH: &str = "colliding-copters.json";

fn run() -> colliding_copters::Result<RunStats> {
    let settings = Settings::load_or_default(Path::new(SETTINGS_PATH))?;
    run_headless(settings)
}

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Colliding Copters (headless) starting...");

    match run() {
        Ok(stats) => match serde_json::to_string_pretty(&stats) {
            Ok(json) => {
                println!("{json}");
                ExitCode::SUCCESS
            }
            Err(e) => {
                log::error!("Failed to encode run summary: {e}");
                ExitCode::FAILURE
            }
        },
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
