// readme-pulse entry point.
// Parses arguments, sets up logging, and runs a single refresh pass.

use std::process::ExitCode;

use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use readme_pulse::App;
use readme_pulse::config::{CliArgs, Settings};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    init_tracing();

    let settings = Settings::resolve(CliArgs::parse());
    match App::new(settings).run().await {
        Ok(report) if report.readme_changed => {
            println!("README updated.");
            ExitCode::SUCCESS
        }
        Ok(_) => {
            println!("No updates to README.");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(error = %err, "refresh failed");
            ExitCode::FAILURE
        }
    }
}

/// Log to stderr, filtered by RUST_LOG (default: info).
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
