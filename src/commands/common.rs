//! Shared helpers for the `aroc` commands.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use aro_compiler::CodegenOptions;
use aro_syntax::Program;

use crate::cli::CodegenArgs;

/// Parses a program from its JSON syntax tree.
pub fn parse_program(json: &str) -> serde_json::Result<Program> {
    serde_json::from_str(json)
}

/// Reads and parses a program file.
pub fn read_program(path: &Path) -> Result<Program> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("could not read {}", path.display()))?;
    let program = parse_program(&text)
        .with_context(|| format!("{} is not a valid ARO syntax tree", path.display()))?;
    tracing::debug!(
        path = %path.display(),
        feature_sets = program.feature_sets.len(),
        statements = program.statement_count(),
        "loaded program"
    );
    Ok(program)
}

/// Builds generator options from flags. The module is named after the input
/// file unless `--module-name` is given.
pub fn codegen_options(input: &Path, args: &CodegenArgs) -> Result<CodegenOptions> {
    let mut options = CodegenOptions::default();

    if let Some(name) = &args.module_name {
        options = options.with_module_name(name);
    } else if let Some(stem) = input.file_stem().and_then(|s| s.to_str()) {
        options = options.with_module_name(stem);
    }
    if let Some(triple) = &args.target_triple {
        options = options.with_target_triple(triple);
    }
    if let Some(path) = &args.openapi {
        let document = fs::read_to_string(path)
            .with_context(|| format!("could not read OpenAPI document {}", path.display()))?;
        options = options.with_openapi_spec(document);
    }
    if let Some(entry) = &args.entry {
        options = options.with_entry_marker(entry);
    }
    Ok(options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn module_name_defaults_to_file_stem() {
        let options = codegen_options(&PathBuf::from("dir/orders.json"), &CodegenArgs::default())
            .unwrap();
        assert_eq!(options.module_name, "orders");
        assert_eq!(options.entry_marker, "Application-Start");
    }

    #[test]
    fn flags_override_defaults() {
        let args = CodegenArgs {
            module_name: Some("shop".into()),
            target_triple: Some("x86_64-unknown-linux-gnu".into()),
            openapi: None,
            entry: Some("Boot".into()),
        };
        let options = codegen_options(&PathBuf::from("orders.json"), &args).unwrap();
        assert_eq!(options.module_name, "shop");
        assert_eq!(options.target_triple.as_deref(), Some("x86_64-unknown-linux-gnu"));
        assert_eq!(options.entry_marker, "Boot");
    }

    #[test]
    fn missing_openapi_file_has_context() {
        let args = CodegenArgs {
            openapi: Some(PathBuf::from("/nonexistent/openapi.yaml")),
            ..CodegenArgs::default()
        };
        let err = codegen_options(&PathBuf::from("a.json"), &args).unwrap_err();
        assert!(err.to_string().contains("could not read OpenAPI document"));
    }

    #[test]
    fn parse_error_is_reported() {
        assert!(parse_program("{\"feature_sets\": 3}").is_err());
        assert!(parse_program("{\"feature_sets\": []}").unwrap().feature_sets.is_empty());
    }
}
