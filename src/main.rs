use clap::Parser;
use delay_preprocessor::cli::{args::Args, commands};
use delay_preprocessor::constants::exit_codes;
use delay_preprocessor::Error;
use std::process;

fn main() {
    let args = Args::parse();

    match commands::run(args) {
        Ok(_report) => {
            // Success - the report has already been printed by the command
            process::exit(exit_codes::SUCCESS);
        }
        Err(error) => {
            eprintln!("Error: {error}");
            process::exit(exit_code_for(&error));
        }
    }
}

/// Map the error taxonomy to distinct process exit codes
fn exit_code_for(error: &Error) -> i32 {
    match error {
        Error::BasePathMissing { .. } => exit_codes::BASE_PATH_MISSING,
        Error::LookupLoad { .. } => exit_codes::LOOKUP_LOAD_FAILED,
        _ => exit_codes::FAILURE,
    }
}
