#![forbid(unsafe_code)]

use clap::Parser;
use std::io;
use std::process::ExitCode;
use teamtime::cli::{self, Cli, CommandError};

fn main() -> ExitCode {
    let cli = Cli::parse();
    teamtime::logging::init(cli.verbose);

    let result = match dirs::home_dir() {
        Some(home) => cli::run(cli, &home, &mut io::stdout().lock()),
        None => Err(CommandError::NoHomeDir),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
