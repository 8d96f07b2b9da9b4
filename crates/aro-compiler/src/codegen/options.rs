//! Code generation options.

/// Name of the feature set `main` runs.
pub const DEFAULT_ENTRY_MARKER: &str = "Application-Start";

/// Settings for one code generation run.
///
/// ```
/// use aro_compiler::CodegenOptions;
///
/// let options = CodegenOptions::default()
///     .with_module_name("orders")
///     .with_target_triple("x86_64-unknown-linux-gnu");
/// assert_eq!(options.entry_marker, "Application-Start");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodegenOptions {
    /// `ModuleID` and `source_filename` of the emitted module.
    pub module_name: String,
    /// Emitted as `target triple` when set.
    pub target_triple: Option<String>,
    /// OpenAPI document embedded into the binary and handed to the runtime.
    pub openapi_spec: Option<String>,
    /// Feature set name that marks the program entry point.
    pub entry_marker: String,
}

impl Default for CodegenOptions {
    fn default() -> Self {
        Self {
            module_name: "aro_program".to_string(),
            target_triple: None,
            openapi_spec: None,
            entry_marker: DEFAULT_ENTRY_MARKER.to_string(),
        }
    }
}

impl CodegenOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_module_name(mut self, name: impl Into<String>) -> Self {
        self.module_name = name.into();
        self
    }

    pub fn with_target_triple(mut self, triple: impl Into<String>) -> Self {
        self.target_triple = Some(triple.into());
        self
    }

    pub fn with_openapi_spec(mut self, spec: impl Into<String>) -> Self {
        self.openapi_spec = Some(spec.into());
        self
    }

    pub fn with_entry_marker(mut self, marker: impl Into<String>) -> Self {
        self.entry_marker = marker.into();
        self
    }
}
