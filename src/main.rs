//! StarCitizenMonitor bundler - clean the workspace and package the monitor
//! into a single windowed executable with PyInstaller.
//!
//! Exit code 0 means every requested artifact exists under `dist/`.

use sc_monitor_bundler::cli;
use std::process;

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::init();

    // Run CLI and get exit code
    let exit_code = match cli::run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            for suggestion in e.recovery_suggestions() {
                eprintln!("  hint: {}", suggestion);
            }
            1
        }
    };

    process::exit(exit_code);
}
