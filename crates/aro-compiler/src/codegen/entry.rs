//! Program entry point and `main`.

use std::fmt::Write;

use aro_core::CodegenError;
use aro_syntax::{FeatureSet, Program};

use super::abi::*;
use super::options::CodegenOptions;
use super::pool::FrozenStringPool;

/// Index of the single feature set named `marker`.
pub fn find_entry_point(program: &Program, marker: &str) -> Result<usize, CodegenError> {
    let mut matches = program
        .feature_sets
        .iter()
        .enumerate()
        .filter(|(_, fs)| fs.name == marker)
        .map(|(index, _)| index);

    let Some(first) = matches.next() else {
        return Err(CodegenError::MissingEntryPoint {
            marker: marker.to_string(),
        });
    };
    let others = matches.count();
    if others > 0 {
        return Err(CodegenError::DuplicateEntryPoint {
            marker: marker.to_string(),
            count: others + 1,
        });
    }
    Ok(first)
}

/// Writes `main`: runtime setup, handler registration, the entry feature set
/// run, and teardown. Exits with 1 when the runtime or context cannot be
/// created, 0 otherwise.
pub(super) fn write_main(
    out: &mut String,
    pool: &FrozenStringPool,
    options: &CodegenOptions,
    functions: &[(&FeatureSet, &str)],
    entry: &str,
) -> Result<(), CodegenError> {
    writeln!(out, "define i32 @main(i32 %argc, ptr %argv) {{")?;
    writeln!(out, "entry:")?;
    writeln!(out, "  %runtime = call ptr @{RUNTIME_INIT}()")?;
    writeln!(out, "  %runtime_ok = icmp ne ptr %runtime, null")?;
    writeln!(out, "  br i1 %runtime_ok, label %init_ok, label %init_failed")?;
    writeln!(out)?;
    writeln!(out, "init_failed:")?;
    writeln!(out, "  ret i32 1")?;
    writeln!(out)?;
    writeln!(out, "init_ok:")?;

    if let Some(openapi) = &options.openapi_spec {
        writeln!(out, "  call void @{SET_OPENAPI}(ptr {})", pool.id(openapi)?)?;
    }
    writeln!(out, "  call void @{LOAD_PLUGINS}(ptr %runtime)")?;

    for (feature_set, symbol) in functions {
        if let Some(event) = feature_set.handled_event() {
            writeln!(
                out,
                "  call void @{REGISTER_EVENT_HANDLER}(ptr %runtime, ptr {}, ptr @{symbol})",
                pool.id(event)?
            )?;
        }
    }

    let marker = pool.id(&options.entry_marker)?;
    writeln!(out, "  %ctx = call ptr @{CONTEXT_CREATE_NAMED}(ptr %runtime, ptr {marker})")?;
    writeln!(out, "  %ctx_ok = icmp ne ptr %ctx, null")?;
    writeln!(out, "  br i1 %ctx_ok, label %run, label %context_failed")?;
    writeln!(out)?;
    writeln!(out, "context_failed:")?;
    writeln!(out, "  call void @{RUNTIME_SHUTDOWN}(ptr %runtime)")?;
    writeln!(out, "  ret i32 1")?;
    writeln!(out)?;
    writeln!(out, "run:")?;
    writeln!(out, "  %result = call ptr @{entry}(ptr %ctx)")?;
    writeln!(out, "  %has_result = icmp ne ptr %result, null")?;
    writeln!(out, "  br i1 %has_result, label %free_result, label %cleanup")?;
    writeln!(out)?;
    writeln!(out, "free_result:")?;
    writeln!(out, "  call void @{VALUE_FREE}(ptr %result)")?;
    writeln!(out, "  br label %cleanup")?;
    writeln!(out)?;
    writeln!(out, "cleanup:")?;
    writeln!(out, "  call void @{CONTEXT_DESTROY}(ptr %ctx)")?;
    writeln!(out, "  call void @{RUNTIME_SHUTDOWN}(ptr %runtime)")?;
    writeln!(out, "  ret i32 0")?;
    writeln!(out, "}}")?;
    Ok(())
}
