//! `aroc ast`

use std::path::Path;
use std::process::ExitCode;

use super::common::read_program;

/// Prints the program in ARO surface syntax.
pub fn print_ast(file: &Path) -> ExitCode {
    match read_program(file) {
        Ok(program) => {
            print!("{program}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
