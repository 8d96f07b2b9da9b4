//! Semantic analysis.
//!
//! - [`analyzer`]: the per-feature-set forward pass and the program driver
//! - [`dataflow`]: per-statement input/output/side-effect records
//! - [`infer`]: expression and literal type inference
//! - [`known`]: runtime-provided names
//! - `verify`: cross-feature-set dependency verification

pub mod analyzer;
pub mod dataflow;
pub mod infer;
pub mod known;
mod verify;

pub use analyzer::{AnalyzedFeatureSet, AnalyzedProgram, Dependencies, SemanticAnalyzer};
pub use dataflow::DataFlowInfo;
pub use known::{EXPRESSION_SLOT, KNOWN_EXTERNALS, LITERAL_SLOT, is_known_external};

use aro_registry::GlobalSymbolRegistry;
use aro_syntax::Program;

/// Analyze a program with a fresh registry.
pub fn analyze(program: &Program) -> AnalyzedProgram<'_> {
    SemanticAnalyzer::analyze(program)
}

/// Analyze a program on top of an existing registry.
pub fn analyze_with_registry(
    program: &Program,
    registry: GlobalSymbolRegistry,
) -> AnalyzedProgram<'_> {
    SemanticAnalyzer::analyze_with_registry(program, registry)
}
