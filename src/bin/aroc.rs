// src/bin/aroc.rs

use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use aro::cli::{Cli, Commands};
use aro::commands::ast::print_ast;
use aro::commands::check::check_file;
use aro::commands::compile::compile_file;

/// `ARO_LOG` wins; otherwise `-v` flags pick the level.
fn init_tracing(verbose: u8) {
    let filter = EnvFilter::try_from_env("ARO_LOG").unwrap_or_else(|_| {
        EnvFilter::new(match verbose {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        })
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Compile {
            file,
            output,
            codegen,
        } => compile_file(&file, output.as_deref(), &codegen),
        Commands::Check { file } => check_file(&file),
        Commands::Ast { file } => print_ast(&file),
    }
}
