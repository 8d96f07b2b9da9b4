//! Inferred data types.
//!
//! A deliberately small lattice: primitives, the two containers, a named
//! domain type taken from a capitalized specifier, and `Any` for everything
//! the analyzer cannot decide statically.

use std::fmt;

/// The inferred type of a symbol or expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum DataType {
    String,
    Integer,
    Float,
    Boolean,
    Null,
    /// Result of arithmetic; integer or float decided at run time.
    Number,
    List,
    Map,
    /// A domain type named by a specifier, e.g. `<user: User>`.
    Named(String),
    #[default]
    Any,
}

impl DataType {
    /// Maps a builtin type name (case-insensitive) to its type.
    pub fn builtin(name: &str) -> Option<DataType> {
        let ty = match name.to_ascii_lowercase().as_str() {
            "string" => DataType::String,
            "int" | "integer" => DataType::Integer,
            "float" | "double" => DataType::Float,
            "number" => DataType::Number,
            "bool" | "boolean" => DataType::Boolean,
            "list" | "array" => DataType::List,
            "map" | "dictionary" | "object" => DataType::Map,
            _ => return None,
        };
        Some(ty)
    }

    /// Infers a type from qualified-noun specifiers.
    ///
    /// The first builtin type name wins; failing that, the first capitalized
    /// specifier names a domain type; otherwise `Any`.
    pub fn from_specifiers<S: AsRef<str>>(specifiers: &[S]) -> DataType {
        if let Some(ty) = specifiers.iter().find_map(|s| Self::builtin(s.as_ref())) {
            return ty;
        }
        specifiers
            .iter()
            .map(AsRef::as_ref)
            .find(|s| s.chars().next().is_some_and(char::is_uppercase))
            .map_or(DataType::Any, |s| DataType::Named(s.to_string()))
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataType::String => f.write_str("String"),
            DataType::Integer => f.write_str("Integer"),
            DataType::Float => f.write_str("Float"),
            DataType::Boolean => f.write_str("Boolean"),
            DataType::Null => f.write_str("Null"),
            DataType::Number => f.write_str("Number"),
            DataType::List => f.write_str("List"),
            DataType::Map => f.write_str("Map"),
            DataType::Named(name) => f.write_str(name),
            DataType::Any => f.write_str("Any"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_names_are_case_insensitive() {
        assert_eq!(DataType::builtin("Integer"), Some(DataType::Integer));
        assert_eq!(DataType::builtin("DOUBLE"), Some(DataType::Float));
        assert_eq!(DataType::builtin("dictionary"), Some(DataType::Map));
        assert_eq!(DataType::builtin("id"), None);
    }

    #[test]
    fn specifier_inference() {
        assert_eq!(DataType::from_specifiers(&["id", "string"]), DataType::String);
        assert_eq!(
            DataType::from_specifiers(&["User", "list"]),
            DataType::List,
            "builtin beats an earlier capitalized specifier"
        );
        assert_eq!(
            DataType::from_specifiers(&["body", "Order"]),
            DataType::Named("Order".to_string())
        );
        assert_eq!(DataType::from_specifiers(&["id"]), DataType::Any);
        assert_eq!(DataType::from_specifiers::<&str>(&[]), DataType::Any);
    }

    #[test]
    fn display() {
        assert_eq!(DataType::Named("Order".into()).to_string(), "Order");
        assert_eq!(DataType::default().to_string(), "Any");
    }
}
