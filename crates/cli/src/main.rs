use clap::Parser;
use std::process::ExitCode;

use ledgerize::{logging, Cli};

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing::subscriber::with_default(logging::subscriber(cli.verbose), || match cli.run() {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "conversion failed");
            ExitCode::FAILURE
        }
    })
}
