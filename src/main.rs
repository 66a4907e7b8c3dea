use contactbook::{logging, prelude::run_app};
use std::process::ExitCode;

fn main() -> ExitCode {
    logging::init();

    if let Err(e) = run_app() {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
