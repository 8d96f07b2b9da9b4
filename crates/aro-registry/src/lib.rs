//! ARO Registry crate.
//!
//! Storage for what the analyzer learns about names:
//! - [`Symbol`]s with visibility, provenance and an inferred [`DataType`]
//! - per-feature-set tables ([`SymbolTableBuilder`] → [`SymbolTable`])
//! - the cross-feature-set [`GlobalSymbolRegistry`] of published names

mod data_type;
mod global;
mod symbol;
mod symbol_table;

pub use data_type::DataType;
pub use global::GlobalSymbolRegistry;
pub use symbol::{Provenance, Symbol, Visibility};
pub use symbol_table::{SymbolTable, SymbolTableBuilder};

pub use aro_core::RegistrationError;
