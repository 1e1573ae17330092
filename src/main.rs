use std::process::ExitCode;

use clap::Parser;
use riskwarden::cli::{self, output, Cli};

fn main() -> ExitCode {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    match cli::execute(cli) {
        Ok(code) => code,
        Err(e) => {
            output::error(&e.to_string());
            ExitCode::FAILURE
        }
    }
}
