//! LLVM textual IR generation.
//!
//! Generation runs in two passes over an analyzed program:
//!
//! 1. **Collection** walks every feature set and registers each string the
//!    module will reference, then freezes the pool.
//! 2. **Emission** writes the module in a fixed order: header, descriptor
//!    types, runtime declarations, string constants, one function per
//!    feature set, and `main`.
//!
//! Entry-point validation happens before either pass, so a program without a
//! unique entry feature set produces no output at all. Identical input always
//! produces byte-identical output.
//!
//! ## Module Structure
//!
//! - [`abi`]: runtime declarations and descriptor layouts
//! - [`eval`]: JSON protocol for run-time evaluated expressions
//! - [`pool`]: the deduplicating string constant pool
//! - [`verbs`]: canonical verb table
//! - `lowering`: decisions shared by collection and emission
//! - `function` / `matching`: feature-set function bodies
//! - `entry`: entry-point lookup and `main`

pub mod abi;
mod collect;
mod entry;
mod escape;
pub mod eval;
mod function;
mod lowering;
mod mangle;
mod matching;
mod options;
pub mod pool;
pub mod verbs;

use std::fmt::Write;

use aro_core::CodegenError;
use aro_syntax::FeatureSet;
use tracing::debug;

use crate::analysis::AnalyzedProgram;

pub use collect::collect_strings;
pub use entry::find_entry_point;
pub use escape::escape_ir_bytes;
pub use mangle::{FUNCTION_PREFIX, FunctionNames, mangle};
pub use options::{CodegenOptions, DEFAULT_ENTRY_MARKER};
pub use pool::{FrozenStringPool, StringConstantPool, StringId};
pub use verbs::canonical_verb;

use entry::write_main;
use escape::comment_text;
use function::FunctionEmitter;

/// Generates a module with default options.
pub fn generate(analyzed: &AnalyzedProgram<'_>) -> Result<String, CodegenError> {
    generate_with(analyzed, &CodegenOptions::default())
}

/// Generates the textual IR module for an analyzed program.
#[tracing::instrument(skip_all, fields(module = %options.module_name))]
#[cfg_attr(feature = "profiling", profiling::function)]
pub fn generate_with(
    analyzed: &AnalyzedProgram<'_>,
    options: &CodegenOptions,
) -> Result<String, CodegenError> {
    let program = analyzed.program;
    let entry = find_entry_point(program, &options.entry_marker)?;
    let names = FunctionNames::assign(program);
    let pool = {
        #[cfg(feature = "profiling")]
        profiling::scope!("collect_strings");

        collect_strings(program, options)?.freeze()
    };
    debug!(
        strings = pool.len(),
        feature_sets = program.feature_sets.len(),
        "collected string constants"
    );

    let functions: Vec<(&FeatureSet, &str)> =
        program.feature_sets.iter().zip(names.iter()).collect();

    let mut out = String::new();
    write_header(&mut out, options)?;

    abi::write_descriptor_types(&mut out)?;
    writeln!(out)?;
    abi::write_declarations(&mut out)?;
    writeln!(out)?;

    writeln!(out, "; String constants")?;
    pool.write_globals(&mut out)?;
    writeln!(out)?;

    {
        #[cfg(feature = "profiling")]
        profiling::scope!("emit_functions");

        for (feature_set, symbol) in &functions {
            debug!(feature_set = %feature_set.name, symbol = %symbol, "emitting feature set");
            out.push_str(&FunctionEmitter::new(&pool).emit(feature_set, symbol)?);
            writeln!(out)?;
        }
    }

    let (_, entry_symbol) = functions[entry];
    write_main(&mut out, &pool, options, &functions, entry_symbol)?;
    Ok(out)
}

fn write_header(out: &mut String, options: &CodegenOptions) -> Result<(), CodegenError> {
    writeln!(out, "; ModuleID = '{}'", comment_text(&options.module_name))?;
    writeln!(
        out,
        "source_filename = \"{}\"",
        escape_ir_bytes(options.module_name.as_bytes())
    )?;
    if let Some(triple) = &options.target_triple {
        writeln!(out, "target triple = \"{}\"", escape_ir_bytes(triple.as_bytes()))?;
    }
    writeln!(out)?;
    Ok(())
}
