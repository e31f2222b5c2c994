use git_ticket::{cli, logger, ui};
use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = logger::init() {
        eprintln!("Warning: Failed to initialize logging: {e}");
    }

    match cli::main() {
        Ok(code) => code,
        Err(e) => {
            ui::print_error(&format!("git-ticket: {e:#}"));
            ExitCode::FAILURE
        }
    }
}
