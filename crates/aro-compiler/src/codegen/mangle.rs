//! Feature-set function naming.

use aro_syntax::Program;
use rustc_hash::FxHashSet;

/// Prefix of every generated feature-set function.
pub const FUNCTION_PREFIX: &str = "aro_fs_";

/// Lowercases ASCII letters and replaces every non-alphanumeric byte with `_`.
pub fn mangle(name: &str) -> String {
    name.bytes()
        .map(|b| {
            if b.is_ascii_alphanumeric() {
                b.to_ascii_lowercase() as char
            } else {
                '_'
            }
        })
        .collect()
}

/// Function names for every feature set, indexed like `program.feature_sets`.
///
/// Names that mangle identically are disambiguated in program order: the
/// first keeps the plain name, later ones get `_2`, `_3`, ...
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionNames {
    names: Vec<String>,
}

impl FunctionNames {
    pub fn assign(program: &Program) -> Self {
        let mut taken = FxHashSet::default();
        let names = program
            .feature_sets
            .iter()
            .map(|fs| {
                let base = format!("{FUNCTION_PREFIX}{}", mangle(&fs.name));
                let mut candidate = base.clone();
                let mut suffix = 2;
                while !taken.insert(candidate.clone()) {
                    candidate = format!("{base}_{suffix}");
                    suffix += 1;
                }
                candidate
            })
            .collect();
        Self { names }
    }

    /// Symbol name (without `@`) of the feature set at `index`.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    /// Names in program order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
