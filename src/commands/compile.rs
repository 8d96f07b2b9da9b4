//! `aroc compile`

use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use aro_compiler::{AroError, Compiler};

use super::common::{codegen_options, read_program};
use crate::cli::CodegenArgs;

/// Compiles `file` and writes the IR to `output` or stdout.
pub fn compile_file(file: &Path, output: Option<&Path>, args: &CodegenArgs) -> ExitCode {
    match try_compile(file, output, args) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn try_compile(file: &Path, output: Option<&Path>, args: &CodegenArgs) -> Result<ExitCode> {
    let program = read_program(file)?;
    let options = codegen_options(file, args)?;

    let result = Compiler::compile(&program, &options);
    result
        .diagnostics
        .emit(&mut io::stderr())
        .context("could not write diagnostics")?;

    let ir = match result.output {
        Ok(ir) => ir,
        Err(AroError::Codegen(err)) if err.is_internal() => {
            eprintln!("internal compiler error: {err}");
            return Ok(ExitCode::FAILURE);
        }
        Err(err) => {
            eprintln!("error: {err}");
            return Ok(ExitCode::FAILURE);
        }
    };

    match output {
        Some(path) => fs::write(path, &ir)
            .with_context(|| format!("could not write {}", path.display()))?,
        None => io::stdout()
            .lock()
            .write_all(ir.as_bytes())
            .context("could not write IR to stdout")?,
    }
    Ok(ExitCode::SUCCESS)
}
