//! Visitor pattern for traversing the syntax tree.
//!
//! Two traversal styles are provided:
//!
//! - [`Visitor`]: one `visit_*` method per node kind, each defaulting to the
//!   matching `walk_*` function. Override what you need; call the `walk_*`
//!   function from an override to keep descending.
//! - [`ExprVisitor`]: a result-returning visitor over expressions with no
//!   defaults. Used where every expression kind needs an explicit answer
//!   (type inference, serialization).
//!
//! # Example
//!
//! ```
//! use aro_syntax::ast::{visitor::Visitor, VarExpr, Expr, BinaryOp};
//!
//! struct VarCollector(Vec<String>);
//!
//! impl Visitor for VarCollector {
//!     fn visit_var_expr(&mut self, expr: &VarExpr) {
//!         self.0.push(expr.name.clone());
//!     }
//! }
//!
//! let expr = Expr::binary(Expr::var("a"), BinaryOp::Add, Expr::var("b"));
//! let mut collector = VarCollector(Vec::new());
//! expr.accept(&mut collector);
//! assert_eq!(collector.0, vec!["a", "b"]);
//! ```

use crate::ast::expr::*;
use crate::ast::stmt::*;
use crate::ast::{FeatureSet, Program};

/// Visitor trait for traversing syntax nodes.
///
/// The default implementations call the corresponding `walk_*` function to
/// continue traversal.
pub trait Visitor: Sized {
    // === Program structure ===

    /// Visit the root node.
    fn visit_program(&mut self, program: &Program) {
        walk_program(self, program);
    }

    /// Visit a feature set.
    fn visit_feature_set(&mut self, feature_set: &FeatureSet) {
        walk_feature_set(self, feature_set);
    }

    // === Statements ===

    /// Visit a statement.
    fn visit_statement(&mut self, stmt: &Statement) {
        walk_statement(self, stmt);
    }

    fn visit_action_statement(&mut self, stmt: &ActionStatement) {
        walk_action_statement(self, stmt);
    }

    fn visit_publish_statement(&mut self, _stmt: &PublishStatement) {}

    fn visit_require_statement(&mut self, _stmt: &RequireStatement) {}

    fn visit_match_statement(&mut self, stmt: &MatchStatement) {
        walk_match_statement(self, stmt);
    }

    fn visit_case_clause(&mut self, case: &CaseClause) {
        walk_case_clause(self, case);
    }

    fn visit_pattern(&mut self, _pattern: &Pattern) {}

    // === Expressions ===

    /// Visit an expression.
    fn visit_expr(&mut self, expr: &Expr) {
        walk_expr(self, expr);
    }

    fn visit_literal_expr(&mut self, _expr: &LiteralExpr) {}

    fn visit_array_expr(&mut self, expr: &ArrayExpr) {
        walk_array_expr(self, expr);
    }

    fn visit_map_expr(&mut self, expr: &MapExpr) {
        walk_map_expr(self, expr);
    }

    fn visit_var_expr(&mut self, _expr: &VarExpr) {}

    fn visit_binary_expr(&mut self, expr: &BinaryExpr) {
        walk_binary_expr(self, expr);
    }

    fn visit_unary_expr(&mut self, expr: &UnaryExpr) {
        walk_unary_expr(self, expr);
    }

    fn visit_member_expr(&mut self, expr: &MemberExpr) {
        walk_member_expr(self, expr);
    }

    fn visit_subscript_expr(&mut self, expr: &SubscriptExpr) {
        walk_subscript_expr(self, expr);
    }

    fn visit_grouped_expr(&mut self, expr: &GroupedExpr) {
        walk_grouped_expr(self, expr);
    }

    fn visit_exists_expr(&mut self, expr: &ExistsExpr) {
        walk_exists_expr(self, expr);
    }

    fn visit_type_check_expr(&mut self, expr: &TypeCheckExpr) {
        walk_type_check_expr(self, expr);
    }

    fn visit_interpolated_expr(&mut self, expr: &InterpolatedExpr) {
        walk_interpolated_expr(self, expr);
    }
}

// === Walk Functions ===
// These provide default traversal logic for each node type.

pub fn walk_program<V: Visitor>(visitor: &mut V, program: &Program) {
    for feature_set in &program.feature_sets {
        visitor.visit_feature_set(feature_set);
    }
}

pub fn walk_feature_set<V: Visitor>(visitor: &mut V, feature_set: &FeatureSet) {
    for stmt in &feature_set.statements {
        visitor.visit_statement(stmt);
    }
}

pub fn walk_statement<V: Visitor>(visitor: &mut V, stmt: &Statement) {
    match stmt {
        Statement::Action(s) => visitor.visit_action_statement(s),
        Statement::Publish(s) => visitor.visit_publish_statement(s),
        Statement::Require(s) => visitor.visit_require_statement(s),
        Statement::Match(s) => visitor.visit_match_statement(s),
    }
}

/// Walk an action statement. Only the expression has children.
pub fn walk_action_statement<V: Visitor>(visitor: &mut V, stmt: &ActionStatement) {
    if let Some(expr) = &stmt.expression {
        visitor.visit_expr(expr);
    }
}

/// Walk a match statement: cases in order, then the otherwise body.
pub fn walk_match_statement<V: Visitor>(visitor: &mut V, stmt: &MatchStatement) {
    for case in &stmt.cases {
        visitor.visit_case_clause(case);
    }
    if let Some(body) = &stmt.otherwise {
        for s in body {
            visitor.visit_statement(s);
        }
    }
}

pub fn walk_case_clause<V: Visitor>(visitor: &mut V, case: &CaseClause) {
    visitor.visit_pattern(&case.pattern);
    for s in &case.body {
        visitor.visit_statement(s);
    }
}

pub fn walk_expr<V: Visitor>(visitor: &mut V, expr: &Expr) {
    match expr {
        Expr::Literal(e) => visitor.visit_literal_expr(e),
        Expr::Array(e) => visitor.visit_array_expr(e),
        Expr::Map(e) => visitor.visit_map_expr(e),
        Expr::Var(e) => visitor.visit_var_expr(e),
        Expr::Binary(e) => visitor.visit_binary_expr(e),
        Expr::Unary(e) => visitor.visit_unary_expr(e),
        Expr::Member(e) => visitor.visit_member_expr(e),
        Expr::Subscript(e) => visitor.visit_subscript_expr(e),
        Expr::Grouped(e) => visitor.visit_grouped_expr(e),
        Expr::Exists(e) => visitor.visit_exists_expr(e),
        Expr::TypeCheck(e) => visitor.visit_type_check_expr(e),
        Expr::Interpolated(e) => visitor.visit_interpolated_expr(e),
    }
}

pub fn walk_array_expr<V: Visitor>(visitor: &mut V, expr: &ArrayExpr) {
    for element in &expr.elements {
        visitor.visit_expr(element);
    }
}

pub fn walk_map_expr<V: Visitor>(visitor: &mut V, expr: &MapExpr) {
    for entry in &expr.entries {
        visitor.visit_expr(&entry.value);
    }
}

pub fn walk_binary_expr<V: Visitor>(visitor: &mut V, expr: &BinaryExpr) {
    visitor.visit_expr(&expr.left);
    visitor.visit_expr(&expr.right);
}

pub fn walk_unary_expr<V: Visitor>(visitor: &mut V, expr: &UnaryExpr) {
    visitor.visit_expr(&expr.operand);
}

pub fn walk_member_expr<V: Visitor>(visitor: &mut V, expr: &MemberExpr) {
    visitor.visit_expr(&expr.object);
}

pub fn walk_subscript_expr<V: Visitor>(visitor: &mut V, expr: &SubscriptExpr) {
    visitor.visit_expr(&expr.object);
    visitor.visit_expr(&expr.index);
}

pub fn walk_grouped_expr<V: Visitor>(visitor: &mut V, expr: &GroupedExpr) {
    visitor.visit_expr(&expr.inner);
}

pub fn walk_exists_expr<V: Visitor>(visitor: &mut V, expr: &ExistsExpr) {
    visitor.visit_expr(&expr.operand);
}

pub fn walk_type_check_expr<V: Visitor>(visitor: &mut V, expr: &TypeCheckExpr) {
    visitor.visit_expr(&expr.operand);
}

pub fn walk_interpolated_expr<V: Visitor>(visitor: &mut V, expr: &InterpolatedExpr) {
    for part in &expr.parts {
        if let StringPart::Expr(e) = part {
            visitor.visit_expr(e);
        }
    }
}

// === Double dispatch ===

impl Program {
    pub fn accept<V: Visitor>(&self, visitor: &mut V) {
        visitor.visit_program(self);
    }
}

impl FeatureSet {
    pub fn accept<V: Visitor>(&self, visitor: &mut V) {
        visitor.visit_feature_set(self);
    }
}

impl Statement {
    pub fn accept<V: Visitor>(&self, visitor: &mut V) {
        visitor.visit_statement(self);
    }
}

impl Expr {
    pub fn accept<V: Visitor>(&self, visitor: &mut V) {
        visitor.visit_expr(self);
    }

    /// Dispatch to a result-returning [`ExprVisitor`].
    pub fn accept_expr<V: ExprVisitor>(&self, visitor: &mut V) -> V::Output {
        match self {
            Expr::Literal(e) => visitor.visit_literal(e),
            Expr::Array(e) => visitor.visit_array(e),
            Expr::Map(e) => visitor.visit_map(e),
            Expr::Var(e) => visitor.visit_var(e),
            Expr::Binary(e) => visitor.visit_binary(e),
            Expr::Unary(e) => visitor.visit_unary(e),
            Expr::Member(e) => visitor.visit_member(e),
            Expr::Subscript(e) => visitor.visit_subscript(e),
            Expr::Grouped(e) => visitor.visit_grouped(e),
            Expr::Exists(e) => visitor.visit_exists(e),
            Expr::TypeCheck(e) => visitor.visit_type_check(e),
            Expr::Interpolated(e) => visitor.visit_interpolated(e),
        }
    }
}

/// Result-returning expression visitor.
///
/// Implementations recurse by calling [`Expr::accept_expr`] on children.
pub trait ExprVisitor {
    type Output;

    fn visit_literal(&mut self, expr: &LiteralExpr) -> Self::Output;
    fn visit_array(&mut self, expr: &ArrayExpr) -> Self::Output;
    fn visit_map(&mut self, expr: &MapExpr) -> Self::Output;
    fn visit_var(&mut self, expr: &VarExpr) -> Self::Output;
    fn visit_binary(&mut self, expr: &BinaryExpr) -> Self::Output;
    fn visit_unary(&mut self, expr: &UnaryExpr) -> Self::Output;
    fn visit_member(&mut self, expr: &MemberExpr) -> Self::Output;
    fn visit_subscript(&mut self, expr: &SubscriptExpr) -> Self::Output;
    fn visit_grouped(&mut self, expr: &GroupedExpr) -> Self::Output;
    fn visit_exists(&mut self, expr: &ExistsExpr) -> Self::Output;
    fn visit_type_check(&mut self, expr: &TypeCheckExpr) -> Self::Output;
    fn visit_interpolated(&mut self, expr: &InterpolatedExpr) -> Self::Output;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::action::Preposition;
    use crate::ast::ops::{BinaryOp, UnaryOp};

    /// Collects variable names in visit order.
    struct VarCollector {
        names: Vec<String>,
    }

    impl Visitor for VarCollector {
        fn visit_var_expr(&mut self, expr: &VarExpr) {
            self.names.push(expr.name.clone());
        }
    }

    /// Counts statements, including nested ones.
    struct StatementCounter {
        count: usize,
    }

    impl Visitor for StatementCounter {
        fn visit_statement(&mut self, stmt: &Statement) {
            self.count += 1;
            walk_statement(self, stmt);
        }
    }

    /// Computes expression depth.
    struct Depth;

    impl ExprVisitor for Depth {
        type Output = usize;

        fn visit_literal(&mut self, _: &LiteralExpr) -> usize {
            1
        }
        fn visit_array(&mut self, expr: &ArrayExpr) -> usize {
            1 + expr.elements.iter().map(|e| e.accept_expr(self)).max().unwrap_or(0)
        }
        fn visit_map(&mut self, expr: &MapExpr) -> usize {
            1 + expr.entries.iter().map(|e| e.value.accept_expr(self)).max().unwrap_or(0)
        }
        fn visit_var(&mut self, _: &VarExpr) -> usize {
            1
        }
        fn visit_binary(&mut self, expr: &BinaryExpr) -> usize {
            1 + expr.left.accept_expr(self).max(expr.right.accept_expr(self))
        }
        fn visit_unary(&mut self, expr: &UnaryExpr) -> usize {
            1 + expr.operand.accept_expr(self)
        }
        fn visit_member(&mut self, expr: &MemberExpr) -> usize {
            1 + expr.object.accept_expr(self)
        }
        fn visit_subscript(&mut self, expr: &SubscriptExpr) -> usize {
            1 + expr.object.accept_expr(self).max(expr.index.accept_expr(self))
        }
        fn visit_grouped(&mut self, expr: &GroupedExpr) -> usize {
            expr.inner.accept_expr(self)
        }
        fn visit_exists(&mut self, expr: &ExistsExpr) -> usize {
            1 + expr.operand.accept_expr(self)
        }
        fn visit_type_check(&mut self, expr: &TypeCheckExpr) -> usize {
            1 + expr.operand.accept_expr(self)
        }
        fn visit_interpolated(&mut self, _: &InterpolatedExpr) -> usize {
            1
        }
    }

    #[test]
    fn collects_vars_in_order() {
        let expr = Expr::binary(
            Expr::member(Expr::var("user"), "age"),
            BinaryOp::Greater,
            Expr::subscript(Expr::var("limits"), Expr::var("tier")),
        );
        let mut collector = VarCollector { names: Vec::new() };
        expr.accept(&mut collector);
        assert_eq!(collector.names, vec!["user", "limits", "tier"]);
    }

    #[test]
    fn interpolated_parts_are_walked() {
        let expr = Expr::interpolated(vec![
            StringPart::Text("Hello ".to_string()),
            StringPart::Expr(Expr::var("name")),
        ]);
        let mut collector = VarCollector { names: Vec::new() };
        walk_expr(&mut collector, &expr);
        assert_eq!(collector.names, vec!["name"]);
    }

    #[test]
    fn counts_nested_statements() {
        let log = || ActionStatement::new("Log", "msg", Preposition::To, "console");
        let program = Program::new(vec![FeatureSet::new("A", "B").with_statement(
            MatchStatement::new("x")
                .with_case(Pattern::Wildcard, vec![log().into()])
                .with_otherwise(vec![log().into()]),
        )]);
        let mut counter = StatementCounter { count: 0 };
        program.accept(&mut counter);
        assert_eq!(counter.count, 3);
    }

    #[test]
    fn expr_visitor_returns_results() {
        let expr = Expr::unary(
            UnaryOp::Not,
            Expr::grouped(Expr::binary(Expr::var("a"), BinaryOp::And, Expr::literal(true))),
        );
        assert_eq!(expr.accept_expr(&mut Depth), 3);
    }
}
