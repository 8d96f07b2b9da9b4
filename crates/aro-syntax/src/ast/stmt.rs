//! Statement nodes.

use std::fmt;

use aro_core::Span;
use serde::{Deserialize, Serialize};

use crate::ast::action::{Action, ObjectClause, Preposition, QualifiedNoun};
use crate::ast::expr::{Expr, LiteralValue};

/// A statement inside a feature set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Statement {
    /// `<Verb> the <result> prep the <object>.`
    Action(ActionStatement),
    /// `<Publish> as <external> <internal>.`
    Publish(PublishStatement),
    /// `<Require> the <name> from the <source>.`
    Require(RequireStatement),
    /// `match <subject> { case ... otherwise ... }`
    Match(MatchStatement),
}

impl Statement {
    pub fn span(&self) -> Span {
        match self {
            Statement::Action(s) => s.span,
            Statement::Publish(s) => s.span,
            Statement::Require(s) => s.span,
            Statement::Match(s) => s.span,
        }
    }
}

impl From<ActionStatement> for Statement {
    fn from(stmt: ActionStatement) -> Self {
        Statement::Action(stmt)
    }
}

impl From<PublishStatement> for Statement {
    fn from(stmt: PublishStatement) -> Self {
        Statement::Publish(stmt)
    }
}

impl From<RequireStatement> for Statement {
    fn from(stmt: RequireStatement) -> Self {
        Statement::Require(stmt)
    }
}

impl From<MatchStatement> for Statement {
    fn from(stmt: MatchStatement) -> Self {
        Statement::Match(stmt)
    }
}

/// An action statement, optionally carrying a literal and/or an expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionStatement {
    pub action: Action,
    pub result: QualifiedNoun,
    pub object: ObjectClause,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub literal: Option<LiteralValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expression: Option<Expr>,
    #[serde(default)]
    pub span: Span,
}

impl ActionStatement {
    pub fn new(
        verb: impl Into<Action>,
        result: impl Into<QualifiedNoun>,
        preposition: Preposition,
        object: impl Into<QualifiedNoun>,
    ) -> Self {
        Self {
            action: verb.into(),
            result: result.into(),
            object: ObjectClause::new(preposition, object),
            literal: None,
            expression: None,
            span: Span::default(),
        }
    }

    pub fn with_literal(mut self, literal: impl Into<LiteralValue>) -> Self {
        self.literal = Some(literal.into());
        self
    }

    pub fn with_expression(mut self, expression: Expr) -> Self {
        self.expression = Some(expression);
        self
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }
}

/// Makes an internal binding visible to other feature sets under `external_name`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublishStatement {
    pub external_name: String,
    pub internal_variable: String,
    #[serde(default)]
    pub span: Span,
}

impl PublishStatement {
    pub fn new(external_name: impl Into<String>, internal_variable: impl Into<String>) -> Self {
        Self {
            external_name: external_name.into(),
            internal_variable: internal_variable.into(),
            span: Span::default(),
        }
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }
}

/// Where a required name comes from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RequireSource {
    Framework,
    Environment,
    /// Another feature set, by name.
    FeatureSet(String),
}

impl RequireSource {
    pub fn as_str(&self) -> &str {
        match self {
            RequireSource::Framework => "framework",
            RequireSource::Environment => "environment",
            RequireSource::FeatureSet(name) => name,
        }
    }
}

impl From<String> for RequireSource {
    fn from(source: String) -> Self {
        match source.as_str() {
            "framework" => RequireSource::Framework,
            "environment" => RequireSource::Environment,
            _ => RequireSource::FeatureSet(source),
        }
    }
}

impl From<&str> for RequireSource {
    fn from(source: &str) -> Self {
        RequireSource::from(source.to_string())
    }
}

impl From<RequireSource> for String {
    fn from(source: RequireSource) -> Self {
        match source {
            RequireSource::FeatureSet(name) => name,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for RequireSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Declares a dependency on a name provided outside the feature set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequireStatement {
    pub variable: String,
    pub source: RequireSource,
    #[serde(default)]
    pub span: Span,
}

impl RequireStatement {
    pub fn new(variable: impl Into<String>, source: impl Into<RequireSource>) -> Self {
        Self {
            variable: variable.into(),
            source: source.into(),
            span: Span::default(),
        }
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }
}

/// Pattern of a `case` clause.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pattern {
    Literal(LiteralValue),
    /// `_`
    Wildcard,
    /// Binds the subject to a new name.
    Binding(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseClause {
    pub pattern: Pattern,
    pub body: Vec<Statement>,
    #[serde(default)]
    pub span: Span,
}

impl CaseClause {
    pub fn new(pattern: Pattern, body: Vec<Statement>) -> Self {
        Self {
            pattern,
            body,
            span: Span::default(),
        }
    }
}

/// Multi-way branch on a subject value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchStatement {
    pub subject: QualifiedNoun,
    #[serde(default)]
    pub cases: Vec<CaseClause>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub otherwise: Option<Vec<Statement>>,
    #[serde(default)]
    pub span: Span,
}

impl MatchStatement {
    pub fn new(subject: impl Into<QualifiedNoun>) -> Self {
        Self {
            subject: subject.into(),
            cases: Vec::new(),
            otherwise: None,
            span: Span::default(),
        }
    }

    pub fn with_case(mut self, pattern: Pattern, body: Vec<Statement>) -> Self {
        self.cases.push(CaseClause::new(pattern, body));
        self
    }

    pub fn with_otherwise(mut self, body: Vec<Statement>) -> Self {
        self.otherwise = Some(body);
        self
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::action::ActionRole;

    #[test]
    fn action_statement_builder() {
        let stmt = ActionStatement::new("Create", "greeting", Preposition::With, "_literal_")
            .with_literal("Hello")
            .with_span(Span::new(3, 5, 40));

        assert_eq!(stmt.action.role, ActionRole::Own);
        assert_eq!(stmt.object.name(), "_literal_");
        assert_eq!(stmt.literal, Some(LiteralValue::from("Hello")));
        assert_eq!(Statement::from(stmt).span(), Span::new(3, 5, 40));
    }

    #[test]
    fn require_source_from_string() {
        assert_eq!(RequireSource::from("framework"), RequireSource::Framework);
        assert_eq!(RequireSource::from("environment"), RequireSource::Environment);
        assert_eq!(
            RequireSource::from("User API"),
            RequireSource::FeatureSet("User API".to_string())
        );
        assert_eq!(RequireSource::from("User API").as_str(), "User API");
    }

    #[test]
    fn statement_from_json() {
        let json = r#"{
            "kind": "action",
            "action": "Extract",
            "result": {"name": "user", "specifiers": ["id"]},
            "object": {"preposition": "from", "noun": {"name": "request", "specifiers": ["body"]}},
            "span": {"line": 2, "col": 5}
        }"#;
        let stmt: Statement = serde_json::from_str(json).unwrap();
        let Statement::Action(action) = stmt else {
            panic!("expected action statement");
        };
        assert_eq!(action.action.role, ActionRole::Request);
        assert_eq!(action.result.specifiers, vec!["id"]);
        assert_eq!(action.object.preposition, Preposition::From);
        assert_eq!(action.span, Span::new(2, 5, 0));
    }

    #[test]
    fn match_builder_keeps_case_order() {
        let stmt = MatchStatement::new("status")
            .with_case(Pattern::Literal("a".into()), vec![])
            .with_case(Pattern::Wildcard, vec![])
            .with_otherwise(vec![]);
        assert_eq!(stmt.cases.len(), 2);
        assert_eq!(stmt.cases[1].pattern, Pattern::Wildcard);
        assert!(stmt.otherwise.is_some());
    }
}
