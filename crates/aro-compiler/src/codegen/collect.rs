//! String collection pass.
//!
//! Walks the program in the same order emission does and registers every
//! string the module will reference. What gets registered for a statement is
//! decided by the functions in [`super::lowering`], which emission uses too.

use aro_core::CodegenError;
use aro_syntax::ast::*;
use tracing::trace;

use super::lowering::{ActionTarget, ExprLowering, ValueBinding, action_target, pattern_text};
use super::options::CodegenOptions;
use super::pool::StringConstantPool;
use crate::analysis::known::{EXPRESSION_SLOT, LITERAL_SLOT};

/// Registers every string the generated module needs.
pub fn collect_strings(
    program: &Program,
    options: &CodegenOptions,
) -> Result<StringConstantPool, CodegenError> {
    let mut collector = StringCollector::default();

    for feature_set in &program.feature_sets {
        collector.pool.register(&feature_set.name);
        collector.pool.register(&feature_set.business_activity);
        collector.statements(&feature_set.statements)?;
    }

    collector.pool.register(&options.entry_marker);
    if let Some(openapi) = &options.openapi_spec {
        collector.pool.register(openapi);
    }
    for feature_set in &program.feature_sets {
        if let Some(event) = feature_set.handled_event() {
            collector.pool.register(event);
        }
    }

    trace!(strings = collector.pool.len(), "string collection finished");
    Ok(collector.pool)
}

#[derive(Default)]
struct StringCollector {
    pool: StringConstantPool,
}

impl StringCollector {
    fn statements(&mut self, statements: &[Statement]) -> Result<(), CodegenError> {
        for statement in statements {
            self.statement(statement)?;
        }
        Ok(())
    }

    fn statement(&mut self, statement: &Statement) -> Result<(), CodegenError> {
        match statement {
            Statement::Action(action) => self.action(action)?,
            Statement::Publish(publish) => {
                self.pool.register(&publish.external_name);
                self.pool.register(&publish.internal_variable);
            }
            Statement::Require(require) => {
                self.pool.register(&require.variable);
                self.pool.register(require.source.as_str());
            }
            Statement::Match(m) => self.match_statement(m)?,
        }
        Ok(())
    }

    fn noun(&mut self, noun: &QualifiedNoun) {
        self.pool.register(&noun.name);
        self.pool.register_all(&noun.specifiers);
    }

    fn action(&mut self, action: &ActionStatement) -> Result<(), CodegenError> {
        self.noun(&action.result);
        self.noun(&action.object.noun);

        let literal = action
            .literal
            .as_ref()
            .map(ValueBinding::from_literal)
            .transpose()?;
        if let Some(binding) = &literal {
            if let Some(s) = binding.pooled_string() {
                self.pool.register(s);
            }
        }

        let expression = action
            .expression
            .as_ref()
            .map(ExprLowering::of)
            .transpose()?;
        if let Some(lowering) = &expression {
            self.pool.register_all(lowering.pooled_strings());
        }

        if literal.as_ref().is_some_and(ValueBinding::binds_something) {
            self.pool.register(LITERAL_SLOT);
        }
        if expression.as_ref().is_some_and(ExprLowering::binds_something) {
            self.pool.register(EXPRESSION_SLOT);
        }

        if let ActionTarget::Custom(verb) = action_target(&action.action.lowercase_verb()) {
            self.pool.register(verb);
        }
        Ok(())
    }

    fn match_statement(&mut self, m: &MatchStatement) -> Result<(), CodegenError> {
        self.noun(&m.subject);
        for case in &m.cases {
            if let Pattern::Literal(value) = &case.pattern {
                if let Some(text) = pattern_text(value) {
                    self.pool.register(&text);
                }
            }
        }
        for case in &m.cases {
            self.statements(&case.body)?;
        }
        if let Some(otherwise) = &m.otherwise {
            self.statements(otherwise)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(program: &Program) -> Vec<String> {
        let pool = collect_strings(program, &CodegenOptions::default()).unwrap();
        pool.freeze().iter().map(|(_, s)| s.to_string()).collect()
    }

    #[test]
    fn action_strings_in_order() {
        let program = Program::new(vec![
            FeatureSet::new("Application-Start", "Demo")
                .with_statement(
                    ActionStatement::new("Create", "greeting", Preposition::With, "_literal_")
                        .with_literal("Hello"),
                )
                .with_statement(ActionStatement::new(
                    "Log",
                    "greeting",
                    Preposition::To,
                    QualifiedNoun::with_specifiers("console", ["stdout"]),
                )),
        ]);

        assert_eq!(
            collect(&program),
            [
                "Application-Start",
                "Demo",
                "greeting",
                "_literal_",
                "Hello",
                "console",
                "stdout",
            ]
        );
    }

    #[test]
    fn null_literal_does_not_use_slot() {
        let program = Program::new(vec![FeatureSet::new("A", "B").with_statement(
            ActionStatement::new("Create", "x", Preposition::With, "y")
                .with_literal(LiteralValue::Null),
        )]);
        assert!(!collect(&program).iter().any(|s| s == LITERAL_SLOT));
    }

    #[test]
    fn expression_and_custom_verb() {
        let program = Program::new(vec![FeatureSet::new("A", "B").with_statement(
            ActionStatement::new("Frobnicate", "total", Preposition::From, "price")
                .with_expression(Expr::binary(
                    Expr::var("price"),
                    BinaryOp::Mul,
                    Expr::literal(2),
                )),
        )]);
        let strings = collect(&program);
        let json = r#"{"$binary":{"op":"*","left":{"$var":"price"},"right":{"$lit":2}}}"#;
        assert!(strings.contains(&json.to_string()));
        assert!(strings.contains(&EXPRESSION_SLOT.to_string()));
        assert!(strings.contains(&"frobnicate".to_string()));
        assert!(!strings.contains(&"Frobnicate".to_string()));
    }

    #[test]
    fn canonical_verbs_are_not_pooled() {
        let program = Program::new(vec![
            FeatureSet::new("A", "B")
                .with_statement(ActionStatement::new("Calculate", "x", Preposition::From, "y")),
        ]);
        assert!(!collect(&program).iter().any(|s| s.eq_ignore_ascii_case("calculate")));
    }

    #[test]
    fn trailing_strings() {
        let program = Program::new(vec![FeatureSet::new("Notify", "UserCreated Handler")]);
        let options = CodegenOptions::default().with_openapi_spec("{}");
        let pool = collect_strings(&program, &options).unwrap().freeze();
        let strings: Vec<_> = pool.iter().map(|(_, s)| s).collect();
        assert_eq!(
            strings,
            ["Notify", "UserCreated Handler", "Application-Start", "{}", "UserCreated"]
        );
    }

    #[test]
    fn match_patterns_and_bodies() {
        let program = Program::new(vec![FeatureSet::new("A", "B").with_statement(
            MatchStatement::new("status")
                .with_case(Pattern::Literal("ok".into()), vec![])
                .with_case(Pattern::Literal(LiteralValue::Float(1.5)), vec![])
                .with_case(Pattern::Literal(LiteralValue::Integer(3)), vec![])
                .with_otherwise(vec![
                    ActionStatement::new("Log", "status", Preposition::To, "console").into(),
                ]),
        )]);
        let strings = collect(&program);
        assert_eq!(
            strings,
            ["A", "B", "status", "ok", "1.5", "console", "Application-Start"]
        );
    }
}
