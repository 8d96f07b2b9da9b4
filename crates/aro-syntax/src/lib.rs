//! Syntax model for the ARO business-process language.
//!
//! This crate defines the tree an ARO parser produces: programs made of
//! feature sets, feature sets made of statements, and the expressions those
//! statements carry. It also provides traversal ([`ast::visitor`]) and a
//! pretty printer (`Display` on every node).
//!
//! No validation happens here. Scope, data flow and cross-feature-set
//! dependencies are checked by the analyzer in `aro-compiler`.
//!
//! # Example
//!
//! ```
//! use aro_syntax::ast::*;
//!
//! let program = Program::new(vec![
//!     FeatureSet::new("Application-Start", "Hello World").with_statement(
//!         ActionStatement::new("Log", "greeting", Preposition::To, "console")
//!             .with_literal("Hello, World!"),
//!     ),
//! ]);
//!
//! assert_eq!(program.feature_sets.len(), 1);
//! ```

pub mod ast;

pub use ast::{
    Action, ActionRole, ActionStatement, Expr, FeatureSet, LiteralValue, MatchStatement,
    Pattern, Preposition, Program, PublishStatement, QualifiedNoun, RequireSource,
    RequireStatement, Statement,
};
pub use aro_core::Span;
