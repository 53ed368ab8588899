use std::process::ExitCode;

use hashbench::cs::hashing::workload::run_workload_with;
use hashbench::cs::hashing::NUM_KEYS;
use hashbench::logger::initialize_logger;
use log::{error, info};

fn main() -> ExitCode {
    initialize_logger();

    match run_workload_with(NUM_KEYS, |line| println!("{}", line)) {
        Ok(report) => {
            info!("released {} entries at teardown", report.released);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("hash lookup workload failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
