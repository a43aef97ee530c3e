//! Trolley CLI

use std::{io::Write, process::ExitCode};

mod cli;

fn main() -> ExitCode {
    let cli = match cli::Cli::load() {
        Ok(cli) => cli,
        Err(error) => {
            _ = error.print();
            return ExitCode::from(u8::try_from(error.exit_code()).unwrap_or(1));
        }
    };

    if let Err(error) = cli::logging::init(&cli.logging) {
        _ = writeln!(std::io::stderr(), "failed to initialise logging: {error}");
        return ExitCode::FAILURE;
    }

    match cli.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            _ = writeln!(std::io::stderr(), "{error}");
            ExitCode::FAILURE
        }
    }
}
