//! Expression nodes.
//!
//! Expressions appear in the optional `where`/`with` clause of an action
//! statement. Each node owns its children; there is no sharing.

use aro_core::Span;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::ast::ops::{BinaryOp, UnaryOp};

/// A literal value.
///
/// Serialized untagged, so the JSON form of a literal is the plain JSON value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LiteralValue {
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Array(Vec<LiteralValue>),
    /// Keys keep their source order.
    Object(IndexMap<String, LiteralValue>),
    Null,
}

impl LiteralValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            LiteralValue::String(s) => Some(s),
            _ => None,
        }
    }
}

impl From<&str> for LiteralValue {
    fn from(value: &str) -> Self {
        LiteralValue::String(value.to_string())
    }
}

impl From<String> for LiteralValue {
    fn from(value: String) -> Self {
        LiteralValue::String(value)
    }
}

impl From<i64> for LiteralValue {
    fn from(value: i64) -> Self {
        LiteralValue::Integer(value)
    }
}

impl From<i32> for LiteralValue {
    fn from(value: i32) -> Self {
        LiteralValue::Integer(i64::from(value))
    }
}

impl From<f64> for LiteralValue {
    fn from(value: f64) -> Self {
        LiteralValue::Float(value)
    }
}

impl From<bool> for LiteralValue {
    fn from(value: bool) -> Self {
        LiteralValue::Boolean(value)
    }
}

impl<T: Into<LiteralValue>> From<Vec<T>> for LiteralValue {
    fn from(values: Vec<T>) -> Self {
        LiteralValue::Array(values.into_iter().map(Into::into).collect())
    }
}

/// An expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Expr {
    /// Literal value
    Literal(LiteralExpr),
    /// `[a, b, c]`
    Array(ArrayExpr),
    /// `{ key: value }`
    Map(MapExpr),
    /// Variable reference `<name>`
    Var(VarExpr),
    /// Binary operation
    Binary(BinaryExpr),
    /// Unary prefix operation
    Unary(UnaryExpr),
    /// Member access `<user>.name`
    Member(MemberExpr),
    /// Subscript `<items>[0]`
    Subscript(SubscriptExpr),
    /// Parenthesized expression
    Grouped(GroupedExpr),
    /// `exists <x>`
    Exists(ExistsExpr),
    /// `<x> is Type`
    TypeCheck(TypeCheckExpr),
    /// `"Hello ${<name>}"`
    Interpolated(InterpolatedExpr),
}

impl Expr {
    /// Get the span of this expression.
    pub fn span(&self) -> Span {
        match self {
            Self::Literal(e) => e.span,
            Self::Array(e) => e.span,
            Self::Map(e) => e.span,
            Self::Var(e) => e.span,
            Self::Binary(e) => e.span,
            Self::Unary(e) => e.span,
            Self::Member(e) => e.span,
            Self::Subscript(e) => e.span,
            Self::Grouped(e) => e.span,
            Self::Exists(e) => e.span,
            Self::TypeCheck(e) => e.span,
            Self::Interpolated(e) => e.span,
        }
    }

    /// Strips any number of enclosing parentheses.
    pub fn ungrouped(&self) -> &Expr {
        let mut expr = self;
        while let Expr::Grouped(group) = expr {
            expr = &group.inner;
        }
        expr
    }

    // Builders. Spans default to unknown; parsers set them directly.

    pub fn literal(value: impl Into<LiteralValue>) -> Self {
        Expr::Literal(LiteralExpr {
            value: value.into(),
            span: Span::default(),
        })
    }

    pub fn var(name: impl Into<String>) -> Self {
        Expr::Var(VarExpr {
            name: name.into(),
            span: Span::default(),
        })
    }

    pub fn array(elements: Vec<Expr>) -> Self {
        Expr::Array(ArrayExpr {
            elements,
            span: Span::default(),
        })
    }

    pub fn map<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, Expr)>,
        K: Into<String>,
    {
        Expr::Map(MapExpr {
            entries: entries
                .into_iter()
                .map(|(key, value)| MapEntry {
                    key: key.into(),
                    value,
                })
                .collect(),
            span: Span::default(),
        })
    }

    pub fn binary(left: Expr, op: BinaryOp, right: Expr) -> Self {
        Expr::Binary(BinaryExpr {
            left: Box::new(left),
            op,
            right: Box::new(right),
            span: Span::default(),
        })
    }

    pub fn unary(op: UnaryOp, operand: Expr) -> Self {
        Expr::Unary(UnaryExpr {
            op,
            operand: Box::new(operand),
            span: Span::default(),
        })
    }

    pub fn member(object: Expr, member: impl Into<String>) -> Self {
        Expr::Member(MemberExpr {
            object: Box::new(object),
            member: member.into(),
            span: Span::default(),
        })
    }

    pub fn subscript(object: Expr, index: Expr) -> Self {
        Expr::Subscript(SubscriptExpr {
            object: Box::new(object),
            index: Box::new(index),
            span: Span::default(),
        })
    }

    pub fn grouped(inner: Expr) -> Self {
        Expr::Grouped(GroupedExpr {
            inner: Box::new(inner),
            span: Span::default(),
        })
    }

    pub fn exists(operand: Expr) -> Self {
        Expr::Exists(ExistsExpr {
            operand: Box::new(operand),
            span: Span::default(),
        })
    }

    pub fn type_check(operand: Expr, type_name: impl Into<String>) -> Self {
        Expr::TypeCheck(TypeCheckExpr {
            operand: Box::new(operand),
            type_name: type_name.into(),
            span: Span::default(),
        })
    }

    pub fn interpolated(parts: Vec<StringPart>) -> Self {
        Expr::Interpolated(InterpolatedExpr {
            parts,
            span: Span::default(),
        })
    }

    /// Replace the span, keeping everything else.
    pub fn with_span(mut self, span: Span) -> Self {
        match &mut self {
            Self::Literal(e) => e.span = span,
            Self::Array(e) => e.span = span,
            Self::Map(e) => e.span = span,
            Self::Var(e) => e.span = span,
            Self::Binary(e) => e.span = span,
            Self::Unary(e) => e.span = span,
            Self::Member(e) => e.span = span,
            Self::Subscript(e) => e.span = span,
            Self::Grouped(e) => e.span = span,
            Self::Exists(e) => e.span = span,
            Self::TypeCheck(e) => e.span = span,
            Self::Interpolated(e) => e.span = span,
        }
        self
    }
}

/// Literal expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiteralExpr {
    pub value: LiteralValue,
    #[serde(default)]
    pub span: Span,
}

/// Array literal whose elements may be arbitrary expressions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrayExpr {
    pub elements: Vec<Expr>,
    #[serde(default)]
    pub span: Span,
}

/// Map literal. Entries keep source order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapExpr {
    pub entries: Vec<MapEntry>,
    #[serde(default)]
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapEntry {
    pub key: String,
    pub value: Expr,
}

/// Variable reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VarExpr {
    pub name: String,
    #[serde(default)]
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinaryExpr {
    pub left: Box<Expr>,
    pub op: BinaryOp,
    pub right: Box<Expr>,
    #[serde(default)]
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnaryExpr {
    pub op: UnaryOp,
    pub operand: Box<Expr>,
    #[serde(default)]
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberExpr {
    pub object: Box<Expr>,
    pub member: String,
    #[serde(default)]
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubscriptExpr {
    pub object: Box<Expr>,
    pub index: Box<Expr>,
    #[serde(default)]
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupedExpr {
    pub inner: Box<Expr>,
    #[serde(default)]
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExistsExpr {
    pub operand: Box<Expr>,
    #[serde(default)]
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeCheckExpr {
    pub operand: Box<Expr>,
    pub type_name: String,
    #[serde(default)]
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterpolatedExpr {
    pub parts: Vec<StringPart>,
    #[serde(default)]
    pub span: Span,
}

/// A piece of an interpolated string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StringPart {
    Text(String),
    Expr(Expr),
}
