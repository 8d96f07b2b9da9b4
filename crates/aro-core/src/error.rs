//! Error types for the ARO compiler.
//!
//! ## Error Hierarchy
//!
//! ```text
//! AroError (top-level wrapper)
//! └── CodegenError  - fatal code generation failures
//!
//! RegistrationError - rejected global registry updates (reported by the
//!                     analyzer as warnings)
//! ```
//!
//! Analyzer findings are not errors in this sense: they are collected as
//! [`Diagnostics`](crate::Diagnostics) and never abort a run. Only the code
//! generator fails fatally, and it does so before producing any output.

use thiserror::Error;

// ============================================================================
// Registration Errors
// ============================================================================

/// Errors from registering exported names in the global registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    /// The external name already belongs to another feature set.
    #[error("'{name}' is already published by '{existing_owner}'; ignoring publication from '{owner}'")]
    DuplicatePublish {
        name: String,
        owner: String,
        existing_owner: String,
    },
}

// ============================================================================
// Code Generation Errors
// ============================================================================

/// Fatal code generation failures. Generation is all-or-nothing: when any of
/// these is returned, no artifact was produced.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CodegenError {
    /// No feature set carries the start marker name.
    #[error("no feature set named '{marker}': the program has no entry point")]
    MissingEntryPoint { marker: String },

    /// More than one feature set carries the start marker name.
    #[error("{count} feature sets are named '{marker}': the entry point must be unique")]
    DuplicateEntryPoint { marker: String, count: usize },

    /// Emission referenced a string the collection pass never registered.
    ///
    /// This is an internal invariant violation, not a user error.
    #[error("internal error: string {value:?} was not registered before emission")]
    UnregisteredString { value: String },

    /// A composite literal or expression could not be serialized.
    #[error("cannot serialize {what}: {detail}")]
    Serialization { what: &'static str, detail: String },

    /// Writing the textual IR failed.
    #[error("failed to write IR: {0}")]
    Format(#[from] std::fmt::Error),
}

impl CodegenError {
    /// Whether this error signals a compiler bug rather than bad input.
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            CodegenError::UnregisteredString { .. } | CodegenError::Format(_)
        )
    }
}

// ============================================================================
// Top-level Error
// ============================================================================

/// Unified error for a full compile. Analysis findings live in the
/// diagnostics, so only generation can fail here.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AroError {
    #[error(transparent)]
    Codegen(#[from] CodegenError),
}
