//! `taco` binary entry point

use std::process::ExitCode;
use taco_tools::{cli, logging};

fn main() -> ExitCode {
    // Usage errors exit 2 and --help exits 0 inside clap
    let matches = cli::command().get_matches();

    let verbosity = matches
        .subcommand()
        .map_or(0, |(_, sub)| sub.get_count("verbose"));
    logging::init(verbosity);

    match taco_tools::run(&matches) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
