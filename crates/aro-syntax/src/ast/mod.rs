//! Syntax tree for ARO programs.
//!
//! The tree is produced by an external parser (or deserialized from its JSON
//! form) and never mutated afterwards. A [`Program`] owns its feature sets,
//! which own their statements, which own their expressions.
//!
//! # Organization
//!
//! - [`action`] - verbs, roles, prepositions and qualified nouns
//! - [`stmt`] - statements
//! - [`expr`] - expressions and literal values
//! - [`ops`] - operators
//! - [`visitor`] - traversal
//! - [`printer`] - `Display` impls rendering ARO surface syntax

pub mod action;
pub mod expr;
pub mod ops;
pub mod printer;
pub mod stmt;
pub mod visitor;

pub use action::*;
pub use expr::*;
pub use ops::*;
pub use stmt::*;

use aro_core::Span;
use serde::{Deserialize, Serialize};

/// A complete program: an ordered sequence of feature sets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Program {
    pub feature_sets: Vec<FeatureSet>,
}

impl Program {
    pub fn new(feature_sets: Vec<FeatureSet>) -> Self {
        Self { feature_sets }
    }

    /// Total number of statements, including nested match bodies.
    pub fn statement_count(&self) -> usize {
        fn count(stmts: &[Statement]) -> usize {
            stmts
                .iter()
                .map(|stmt| match stmt {
                    Statement::Match(m) => {
                        1 + m.cases.iter().map(|c| count(&c.body)).sum::<usize>()
                            + m.otherwise.as_deref().map_or(0, count)
                    }
                    _ => 1,
                })
                .sum()
        }
        self.feature_sets.iter().map(|fs| count(&fs.statements)).sum()
    }
}

/// A named unit of sequential statements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureSet {
    pub name: String,
    pub business_activity: String,
    #[serde(default)]
    pub statements: Vec<Statement>,
    #[serde(default)]
    pub span: Span,
}

impl FeatureSet {
    pub fn new(name: impl Into<String>, business_activity: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            business_activity: business_activity.into(),
            statements: Vec::new(),
            span: Span::default(),
        }
    }

    pub fn with_statement(mut self, statement: impl Into<Statement>) -> Self {
        self.statements.push(statement.into());
        self
    }

    pub fn with_statements<I>(mut self, statements: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Statement>,
    {
        self.statements.extend(statements.into_iter().map(Into::into));
        self
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// The event type this feature set handles, if its business activity
    /// follows the `"<EventType> Handler"` convention.
    pub fn handled_event(&self) -> Option<&str> {
        let event = self.business_activity.strip_suffix(" Handler")?.trim();
        (!event.is_empty()).then_some(event)
    }
}
