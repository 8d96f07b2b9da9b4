//! ARO Core crate.
//!
//! Shared building blocks for the ARO compiler crates:
//! - [`Span`] source locations
//! - [`Diagnostics`] collected by the semantic analyzer
//! - The error hierarchy ([`CodegenError`], [`RegistrationError`], [`AroError`])

pub mod diagnostics;
pub mod error;
pub mod span;

pub use diagnostics::{Diagnostic, DiagnosticCode, Diagnostics, Severity};
pub use error::{AroError, CodegenError, RegistrationError};
pub use span::Span;
