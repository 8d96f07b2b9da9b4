//! `Display` implementations rendering ARO surface syntax.
//!
//! ```text
//! (Get User: User API) {
//!     <Extract> the <id> from the <pathParameters: id>.
//!     <Retrieve> the <user> from the <user-repository> where <id>.
//!     <Return> an <OK: status> for the <user>.
//! }
//! ```
//!
//! Output is for humans (diagnostics, `--emit-ast`, tests); it is not
//! guaranteed to re-parse byte for byte.

use std::fmt::{self, Write};

use crate::ast::action::{QualifiedNoun, ObjectClause};
use crate::ast::expr::{Expr, LiteralValue, StringPart};
use crate::ast::stmt::*;
use crate::ast::{FeatureSet, Program};

const INDENT: &str = "    ";

fn write_quoted(f: &mut impl Write, s: &str) -> fmt::Result {
    f.write_char('"')?;
    for c in s.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\t' => f.write_str("\\t")?,
            '\r' => f.write_str("\\r")?,
            c => f.write_char(c)?,
        }
    }
    f.write_char('"')
}

fn write_indent(f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
    for _ in 0..depth {
        f.write_str(INDENT)?;
    }
    Ok(())
}

impl fmt::Display for LiteralValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LiteralValue::String(s) => write_quoted(f, s),
            LiteralValue::Integer(i) => write!(f, "{i}"),
            LiteralValue::Float(x) => write!(f, "{x:?}"),
            LiteralValue::Boolean(b) => write!(f, "{b}"),
            LiteralValue::Null => f.write_str("null"),
            LiteralValue::Array(items) => {
                f.write_char('[')?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_char(']')
            }
            LiteralValue::Object(entries) => {
                f.write_char('{')?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_char(',')?;
                    }
                    write!(f, " {key}: {value}")?;
                }
                if !entries.is_empty() {
                    f.write_char(' ')?;
                }
                f.write_char('}')
            }
        }
    }
}

impl fmt::Display for QualifiedNoun {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.specifiers.is_empty() {
            write!(f, "<{}>", self.name)
        } else {
            write!(f, "<{}: {}>", self.name, self.specifiers.join(" "))
        }
    }
}

impl fmt::Display for ObjectClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} the {}", self.preposition, self.noun)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Literal(e) => write!(f, "{}", e.value),
            Expr::Array(e) => {
                f.write_char('[')?;
                for (i, element) in e.elements.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{element}")?;
                }
                f.write_char(']')
            }
            Expr::Map(e) => {
                f.write_char('{')?;
                for (i, entry) in e.entries.iter().enumerate() {
                    if i > 0 {
                        f.write_char(',')?;
                    }
                    write!(f, " {}: {}", entry.key, entry.value)?;
                }
                if !e.entries.is_empty() {
                    f.write_char(' ')?;
                }
                f.write_char('}')
            }
            Expr::Var(e) => write!(f, "<{}>", e.name),
            Expr::Binary(e) => write!(f, "{} {} {}", e.left, e.op, e.right),
            Expr::Unary(e) => match e.op {
                crate::ast::UnaryOp::Neg => write!(f, "-{}", e.operand),
                crate::ast::UnaryOp::Not => write!(f, "not {}", e.operand),
            },
            Expr::Member(e) => write!(f, "{}.{}", e.object, e.member),
            Expr::Subscript(e) => write!(f, "{}[{}]", e.object, e.index),
            Expr::Grouped(e) => write!(f, "({})", e.inner),
            Expr::Exists(e) => write!(f, "exists {}", e.operand),
            Expr::TypeCheck(e) => write!(f, "{} is {}", e.operand, e.type_name),
            Expr::Interpolated(e) => {
                f.write_char('"')?;
                for part in &e.parts {
                    match part {
                        StringPart::Text(text) => {
                            let mut quoted = String::new();
                            write_quoted(&mut quoted, text)?;
                            f.write_str(&quoted[1..quoted.len() - 1])?;
                        }
                        StringPart::Expr(expr) => write!(f, "${{{expr}}}")?,
                    }
                }
                f.write_char('"')
            }
        }
    }
}

impl ActionStatement {
    fn fmt_line(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}> the {} ", self.action.verb, self.result)?;
        match (&self.literal, &self.expression) {
            (Some(literal), _) if self.object.name() == "_literal_" => {
                write!(f, "{} {literal}", self.object.preposition)?;
            }
            (_, Some(expr)) if self.object.name() == "_expression_" => {
                write!(f, "{} {expr}", self.object.preposition)?;
            }
            (literal, expr) => {
                write!(f, "{}", self.object)?;
                if let Some(literal) = literal {
                    write!(f, " with {literal}")?;
                }
                if let Some(expr) = expr {
                    write!(f, " where {expr}")?;
                }
            }
        }
        f.write_char('.')
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pattern::Literal(value) => write!(f, "{value}"),
            Pattern::Wildcard => f.write_char('_'),
            Pattern::Binding(name) => write!(f, "<{name}>"),
        }
    }
}

fn fmt_block(f: &mut fmt::Formatter<'_>, stmts: &[Statement], depth: usize) -> fmt::Result {
    for stmt in stmts {
        fmt_statement(f, stmt, depth)?;
        f.write_char('\n')?;
    }
    Ok(())
}

fn fmt_statement(f: &mut fmt::Formatter<'_>, stmt: &Statement, depth: usize) -> fmt::Result {
    write_indent(f, depth)?;
    match stmt {
        Statement::Action(s) => s.fmt_line(f),
        Statement::Publish(s) => write!(
            f,
            "<Publish> as <{}> <{}>.",
            s.external_name, s.internal_variable
        ),
        Statement::Require(s) => {
            write!(f, "<Require> the <{}> from the <{}>.", s.variable, s.source)
        }
        Statement::Match(s) => {
            writeln!(f, "match {} {{", s.subject)?;
            for case in &s.cases {
                write_indent(f, depth + 1)?;
                writeln!(f, "case {} {{", case.pattern)?;
                fmt_block(f, &case.body, depth + 2)?;
                write_indent(f, depth + 1)?;
                writeln!(f, "}}")?;
            }
            if let Some(body) = &s.otherwise {
                write_indent(f, depth + 1)?;
                writeln!(f, "otherwise {{")?;
                fmt_block(f, body, depth + 2)?;
                write_indent(f, depth + 1)?;
                writeln!(f, "}}")?;
            }
            write_indent(f, depth)?;
            f.write_char('}')
        }
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_statement(f, self, 0)
    }
}

impl fmt::Display for ActionStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_line(f)
    }
}

impl fmt::Display for FeatureSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "({}: {}) {{", self.name, self.business_activity)?;
        fmt_block(f, &self.statements, 1)?;
        f.write_char('}')
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, feature_set) in self.feature_sets.iter().enumerate() {
            if i > 0 {
                f.write_str("\n\n")?;
            }
            write!(f, "{feature_set}")?;
        }
        Ok(())
    }
}
