// src/cli/args.rs

use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

/// ARO compiler: semantic analysis and LLVM IR generation
#[derive(Parser, Debug)]
#[command(name = "aroc")]
#[command(version)]
#[command(about = "Compile ARO programs to LLVM IR", long_about = None)]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace); ARO_LOG overrides
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze a program and generate LLVM IR
    Compile {
        /// Program syntax tree as JSON
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Write IR here instead of stdout
        #[arg(short, long, value_name = "OUT")]
        output: Option<PathBuf>,

        #[command(flatten)]
        codegen: CodegenArgs,
    },
    /// Analyze a program and report diagnostics only
    Check {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
    /// Print a program in ARO surface syntax
    Ast {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

/// Code generation flags.
#[derive(Args, Debug, Default)]
pub struct CodegenArgs {
    /// Module name used for ModuleID and source_filename
    #[arg(long, value_name = "NAME")]
    pub module_name: Option<String>,

    /// Target triple recorded in the module
    #[arg(long, value_name = "TRIPLE")]
    pub target_triple: Option<String>,

    /// OpenAPI document to embed
    #[arg(long, value_name = "FILE")]
    pub openapi: Option<PathBuf>,

    /// Name of the feature set that starts the program
    #[arg(long, value_name = "NAME")]
    pub entry: Option<String>,
}
