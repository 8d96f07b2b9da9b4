//! Symbols bound inside a feature set.

use std::fmt;

use aro_core::Span;

use crate::DataType;

/// Who can see a symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Visibility {
    /// Local to the feature set.
    Internal,
    /// Exported through `Publish`.
    Published,
    /// Provided from outside (via `Require`).
    External,
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Visibility::Internal => "internal",
            Visibility::Published => "published",
            Visibility::External => "external",
        })
    }
}

/// How a symbol came to exist.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Provenance {
    /// Pulled in from the named source.
    ExtractedFrom(String),
    /// Produced by a computation inside the feature set.
    Computed,
    /// Another name for the named symbol.
    AliasOf(String),
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provenance::ExtractedFrom(source) => write!(f, "extracted from '{source}'"),
            Provenance::Computed => f.write_str("computed"),
            Provenance::AliasOf(name) => write!(f, "alias of '{name}'"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Symbol {
    pub name: String,
    pub visibility: Visibility,
    pub provenance: Provenance,
    pub data_type: DataType,
    pub span: Span,
}

impl Symbol {
    /// An internal binding.
    pub fn internal(
        name: impl Into<String>,
        provenance: Provenance,
        data_type: DataType,
        span: Span,
    ) -> Self {
        Self {
            name: name.into(),
            visibility: Visibility::Internal,
            provenance,
            data_type,
            span,
        }
    }

    /// A name required from `source`.
    pub fn external(name: impl Into<String>, source: impl Into<String>, span: Span) -> Self {
        Self {
            name: name.into(),
            visibility: Visibility::External,
            provenance: Provenance::ExtractedFrom(source.into()),
            data_type: DataType::Any,
            span,
        }
    }

    /// A published alias of `target`.
    pub fn alias(
        name: impl Into<String>,
        target: impl Into<String>,
        data_type: DataType,
        span: Span,
    ) -> Self {
        Self {
            name: name.into(),
            visibility: Visibility::Published,
            provenance: Provenance::AliasOf(target.into()),
            data_type,
            span,
        }
    }

    pub fn is_alias(&self) -> bool {
        matches!(self.provenance, Provenance::AliasOf(_))
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}: {} ({})",
            self.visibility, self.name, self.data_type, self.provenance
        )
    }
}
