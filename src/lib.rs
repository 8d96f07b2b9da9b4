//! ARO compiler core.
//!
//! Turns the syntax tree of an ARO program (a set of feature sets made of
//! action statements) into a semantically checked program and then into a
//! textual LLVM IR module that links against the ARO runtime.
//!
//! ```
//! use aro::prelude::*;
//!
//! let program = Program::new(vec![
//!     FeatureSet::new("Application-Start", "Hello World")
//!         .with_statement(
//!             ActionStatement::new("Create", "greeting", Preposition::With, "_literal_")
//!                 .with_literal("Hello, World!"),
//!         )
//!         .with_statement(ActionStatement::new("Log", "greeting", Preposition::To, "console")),
//! ]);
//!
//! let result = Compiler::compile(&program, &CodegenOptions::default());
//! let ir = result.output.unwrap();
//! assert!(ir.contains("define ptr @aro_fs_application_start(ptr %ctx)"));
//! ```
//!
//! The workspace crates are re-exported as [`core`], [`syntax`], [`registry`]
//! and [`compiler`].

pub mod cli;
pub mod commands;

pub use aro_compiler as compiler;
pub use aro_core as core;
pub use aro_registry as registry;
pub use aro_syntax as syntax;

// Re-export main types
pub mod prelude {
    pub use aro_compiler::{
        AnalyzedFeatureSet, AnalyzedProgram, CodegenOptions, CompilationResult, Compiler,
        SemanticAnalyzer, analyze, generate, generate_with,
    };
    pub use aro_core::{
        AroError, CodegenError, Diagnostic, DiagnosticCode, Diagnostics, Severity, Span,
    };
    pub use aro_registry::{DataType, GlobalSymbolRegistry, Symbol, SymbolTable, Visibility};
    pub use aro_syntax::ast::*;
}
