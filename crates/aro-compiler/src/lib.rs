//! ARO Compiler
//!
//! Semantic analysis and LLVM IR generation for ARO programs.
//!
//! ## Architecture
//!
//! - **Analysis**: one forward pass per feature set builds symbol tables and
//!   data-flow records, then cross-feature-set dependencies are verified
//!   against the published names. Findings become diagnostics.
//! - **Generation**: strings are collected into a frozen pool, then the
//!   module is emitted as textual LLVM IR against the runtime ABI.
//!
//! ## Modules
//!
//! - [`analysis`]: semantic analyzer, data flow, type inference
//! - [`codegen`]: string pool, lowering, IR emission

pub mod analysis;
pub mod codegen;

pub use analysis::{
    AnalyzedFeatureSet, AnalyzedProgram, DataFlowInfo, SemanticAnalyzer, analyze,
    analyze_with_registry,
};
pub use codegen::{CodegenOptions, generate, generate_with};

pub use aro_core::{AroError, CodegenError, Diagnostics};

use aro_syntax::Program;
use tracing::info;

/// Result of a full compile.
#[derive(Debug)]
pub struct CompilationResult {
    /// Everything the analyzer reported, errors and warnings alike.
    pub diagnostics: Diagnostics,
    /// The generated module, or why none was produced.
    pub output: Result<String, AroError>,
}

impl CompilationResult {
    /// Check if compilation produced a module.
    pub fn is_success(&self) -> bool {
        self.output.is_ok()
    }
}

/// The main compiler entry point: analysis followed by generation.
pub struct Compiler;

impl Compiler {
    /// Compile a program. Analysis diagnostics never stop generation; only a
    /// generator failure leaves the result without a module.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn compile(program: &Program, options: &CodegenOptions) -> CompilationResult {
        let analyzed = analyze(program);

        let output = generate_with(&analyzed, options).map_err(AroError::from);

        info!(
            feature_sets = program.feature_sets.len(),
            errors = analyzed.diagnostics.error_count(),
            warnings = analyzed.diagnostics.warning_count(),
            success = output.is_ok(),
            "compilation finished"
        );

        CompilationResult {
            diagnostics: analyzed.diagnostics,
            output,
        }
    }
}
