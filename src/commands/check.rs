//! `aroc check`

use std::io;
use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use aro_compiler::analyze;

use super::common::read_program;

/// Analyzes `file` and prints its diagnostics. Fails when there are errors.
pub fn check_file(file: &Path) -> ExitCode {
    match try_check(file) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn try_check(file: &Path) -> Result<ExitCode> {
    let program = read_program(file)?;
    let analyzed = analyze(&program);
    let diagnostics = &analyzed.diagnostics;

    diagnostics
        .emit(&mut io::stderr())
        .context("could not write diagnostics")?;
    eprintln!(
        "{}: {} feature set(s), {} error(s), {} warning(s)",
        file.display(),
        analyzed.feature_sets.len(),
        diagnostics.error_count(),
        diagnostics.warning_count()
    );

    Ok(if analyzed.has_errors() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}
