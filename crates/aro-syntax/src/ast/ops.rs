//! Operator definitions for ARO expressions.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOp {
    // Arithmetic
    /// `+`
    #[serde(rename = "+")]
    Add,
    /// `-`
    #[serde(rename = "-")]
    Sub,
    /// `*`
    #[serde(rename = "*")]
    Mul,
    /// `/`
    #[serde(rename = "/")]
    Div,
    /// `%`
    #[serde(rename = "%")]
    Mod,

    // Concatenation
    /// `++`
    #[serde(rename = "++")]
    Concat,

    // Comparison
    /// `==`
    #[serde(rename = "==")]
    Equal,
    /// `!=`
    #[serde(rename = "!=")]
    NotEqual,
    /// `<`
    #[serde(rename = "<")]
    Less,
    /// `<=`
    #[serde(rename = "<=")]
    LessEqual,
    /// `>`
    #[serde(rename = ">")]
    Greater,
    /// `>=`
    #[serde(rename = ">=")]
    GreaterEqual,

    // Logical
    /// `and`
    #[serde(rename = "and")]
    And,
    /// `or`
    #[serde(rename = "or")]
    Or,

    // Membership
    /// `contains`
    #[serde(rename = "contains")]
    Contains,
    /// `in`
    #[serde(rename = "in")]
    In,
}

/// Operator families, used by type inference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpCategory {
    Arithmetic,
    Concatenation,
    Comparison,
    Logical,
    Membership,
}

impl BinaryOp {
    /// Source spelling. Also the `op` field of the runtime evaluation protocol.
    pub fn as_str(&self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
            BinaryOp::Concat => "++",
            BinaryOp::Equal => "==",
            BinaryOp::NotEqual => "!=",
            BinaryOp::Less => "<",
            BinaryOp::LessEqual => "<=",
            BinaryOp::Greater => ">",
            BinaryOp::GreaterEqual => ">=",
            BinaryOp::And => "and",
            BinaryOp::Or => "or",
            BinaryOp::Contains => "contains",
            BinaryOp::In => "in",
        }
    }

    pub fn category(&self) -> OpCategory {
        use BinaryOp::*;
        match self {
            Add | Sub | Mul | Div | Mod => OpCategory::Arithmetic,
            Concat => OpCategory::Concatenation,
            Equal | NotEqual | Less | LessEqual | Greater | GreaterEqual => OpCategory::Comparison,
            And | Or => OpCategory::Logical,
            Contains | In => OpCategory::Membership,
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unary prefix operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnaryOp {
    /// `-`
    #[serde(rename = "-")]
    Neg,
    /// `not`
    #[serde(rename = "not")]
    Not,
}

impl UnaryOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnaryOp::Neg => "-",
            UnaryOp::Not => "not",
        }
    }
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories() {
        assert_eq!(BinaryOp::Mod.category(), OpCategory::Arithmetic);
        assert_eq!(BinaryOp::Concat.category(), OpCategory::Concatenation);
        assert_eq!(BinaryOp::GreaterEqual.category(), OpCategory::Comparison);
        assert_eq!(BinaryOp::Or.category(), OpCategory::Logical);
        assert_eq!(BinaryOp::In.category(), OpCategory::Membership);
    }

    #[test]
    fn spelling_matches_serde_name() {
        for op in [BinaryOp::Add, BinaryOp::Concat, BinaryOp::Contains] {
            let json = serde_json::to_string(&op).unwrap();
            assert_eq!(json, format!("\"{}\"", op.as_str()));
        }
        assert_eq!(UnaryOp::Not.to_string(), "not");
    }
}
