mod commands;
mod export;
mod terminal;

use std::process::ExitCode;

use commands::{CommandLine, discover};
use terminal::{logging, print};
use tracing::error;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = CommandLine::parse_args();

    if let Err(e) = logging::init(cli.verbose) {
        eprintln!("failed to initialize logging: {e:#}");
        return ExitCode::FAILURE;
    }
    print::banner();

    match discover::discover(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Scan failed: {e:#}");
            ExitCode::FAILURE
        }
    }
}
