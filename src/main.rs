// src/main.rs

use std::process::ExitCode;

use exechook::{cli, logging};

#[tokio::main]
async fn main() -> ExitCode {
    let args = cli::parse();
    if let Err(err) = logging::init_logging(args.log_level) {
        eprintln!("exechook: {err:#}");
        return ExitCode::FAILURE;
    }

    match exechook::run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("exechook: {err:#}");
            ExitCode::FAILURE
        }
    }
}
