//! Lightweight type inference over expressions.

use aro_registry::DataType;
use aro_syntax::ast::visitor::ExprVisitor;
use aro_syntax::ast::*;

/// Inferred type of a literal value.
pub fn literal_type(value: &LiteralValue) -> DataType {
    match value {
        LiteralValue::String(_) => DataType::String,
        LiteralValue::Integer(_) => DataType::Integer,
        LiteralValue::Float(_) => DataType::Float,
        LiteralValue::Boolean(_) => DataType::Boolean,
        LiteralValue::Null => DataType::Null,
        LiteralValue::Array(_) => DataType::List,
        LiteralValue::Object(_) => DataType::Map,
    }
}

/// Inferred type of an expression.
pub fn infer_expr(expr: &Expr) -> DataType {
    expr.accept_expr(&mut TypeInference)
}

struct TypeInference;

impl ExprVisitor for TypeInference {
    type Output = DataType;

    fn visit_literal(&mut self, expr: &LiteralExpr) -> DataType {
        literal_type(&expr.value)
    }

    fn visit_array(&mut self, _expr: &ArrayExpr) -> DataType {
        DataType::List
    }

    fn visit_map(&mut self, _expr: &MapExpr) -> DataType {
        DataType::Map
    }

    fn visit_var(&mut self, _expr: &VarExpr) -> DataType {
        DataType::Any
    }

    fn visit_binary(&mut self, expr: &BinaryExpr) -> DataType {
        match expr.op.category() {
            OpCategory::Arithmetic => DataType::Number,
            OpCategory::Concatenation => DataType::String,
            OpCategory::Comparison | OpCategory::Logical | OpCategory::Membership => {
                DataType::Boolean
            }
        }
    }

    fn visit_unary(&mut self, _expr: &UnaryExpr) -> DataType {
        DataType::Any
    }

    fn visit_member(&mut self, _expr: &MemberExpr) -> DataType {
        DataType::Any
    }

    fn visit_subscript(&mut self, _expr: &SubscriptExpr) -> DataType {
        DataType::Any
    }

    fn visit_grouped(&mut self, expr: &GroupedExpr) -> DataType {
        expr.inner.accept_expr(self)
    }

    fn visit_exists(&mut self, _expr: &ExistsExpr) -> DataType {
        DataType::Boolean
    }

    fn visit_type_check(&mut self, _expr: &TypeCheckExpr) -> DataType {
        DataType::Boolean
    }

    fn visit_interpolated(&mut self, _expr: &InterpolatedExpr) -> DataType {
        DataType::String
    }
}
