//! `match` lowering.
//!
//! The subject is resolved once. Cases become a chain of check blocks in
//! source order; a failed check falls through to the next case, then to the
//! `otherwise` block, then to the end block. Every body branches to the
//! shared end block.
//!
//! ```text
//!   br label %match0_case0
//! match0_case0:
//!   br i1 %hit, label %match0_body0, label %match0_case1
//! match0_body0:
//!   br label %match0_end
//! ...
//! match0_otherwise:
//!   br label %match0_end
//! match0_end:
//! ```

use std::fmt::Write;

use aro_core::CodegenError;
use aro_syntax::ast::*;

use super::abi::{STRCMP, VALUE_AS_INT, VALUE_AS_STRING};
use super::escape::comment_text;
use super::function::FunctionEmitter;
use super::lowering::pattern_text;

/// Block labels of one match statement.
#[derive(Debug, Clone, Copy)]
struct MatchLabels {
    id: u32,
    cases: usize,
    has_otherwise: bool,
}

impl MatchLabels {
    fn check(&self, case: usize) -> String {
        format!("match{}_case{case}", self.id)
    }

    fn body(&self, case: usize) -> String {
        format!("match{}_body{case}", self.id)
    }

    fn otherwise(&self) -> String {
        format!("match{}_otherwise", self.id)
    }

    fn end(&self) -> String {
        format!("match{}_end", self.id)
    }

    /// Target reached when no case before `case` matched.
    fn fallthrough(&self, case: usize) -> String {
        if case < self.cases {
            self.check(case)
        } else if self.has_otherwise {
            self.otherwise()
        } else {
            self.end()
        }
    }
}

/// Values a pattern check may inspect.
struct Subject {
    value: String,
    text: String,
}

impl FunctionEmitter<'_> {
    pub(super) fn match_statement(
        &mut self,
        statement: &MatchStatement,
    ) -> Result<(), CodegenError> {
        let labels = MatchLabels {
            id: self.next_match,
            cases: statement.cases.len(),
            has_otherwise: statement.otherwise.is_some(),
        };
        self.next_match += 1;

        writeln!(
            self.out,
            "  ; match {}",
            comment_text(&statement.subject.to_string())
        )?;
        let value = self.resolve(&statement.subject.name)?;
        let text = self.temp();
        writeln!(self.out, "  {text} = call ptr @{VALUE_AS_STRING}(ptr {value})")?;
        let subject = Subject { value, text };
        writeln!(self.out, "  br label %{}", labels.fallthrough(0))?;

        for (index, case) in statement.cases.iter().enumerate() {
            let body = labels.body(index);
            writeln!(self.out, "{}:", labels.check(index))?;
            self.pattern_check(&case.pattern, &subject, &body, &labels.fallthrough(index + 1))?;
            writeln!(self.out, "{body}:")?;
            self.statements(&case.body)?;
            writeln!(self.out, "  br label %{}", labels.end())?;
        }

        if let Some(otherwise) = &statement.otherwise {
            writeln!(self.out, "{}:", labels.otherwise())?;
            self.statements(otherwise)?;
            writeln!(self.out, "  br label %{}", labels.end())?;
        }

        writeln!(self.out, "{}:", labels.end())?;
        Ok(())
    }

    /// Ends the current check block with a branch to `hit` or `miss`.
    fn pattern_check(
        &mut self,
        pattern: &Pattern,
        subject: &Subject,
        hit: &str,
        miss: &str,
    ) -> Result<(), CodegenError> {
        let condition = match pattern {
            Pattern::Wildcard => {
                writeln!(self.out, "  br label %{hit}")?;
                return Ok(());
            }
            // Binding patterns never match.
            Pattern::Binding(_) => {
                writeln!(self.out, "  br label %{miss}")?;
                return Ok(());
            }
            Pattern::Literal(LiteralValue::Null) => {
                let condition = self.temp();
                writeln!(self.out, "  {condition} = icmp eq ptr {}, null", subject.value)?;
                condition
            }
            Pattern::Literal(LiteralValue::Integer(expected)) => {
                let slot = self.temp();
                writeln!(self.out, "  {slot} = alloca i64")?;
                writeln!(self.out, "  store i64 0, ptr {slot}")?;
                let status = self.temp();
                writeln!(
                    self.out,
                    "  {status} = call i32 @{VALUE_AS_INT}(ptr {}, ptr {slot})",
                    subject.value
                )?;
                let converted = self.temp();
                writeln!(self.out, "  {converted} = icmp ne i32 {status}, 0")?;
                let actual = self.temp();
                writeln!(self.out, "  {actual} = load i64, ptr {slot}")?;
                let equal = self.temp();
                writeln!(self.out, "  {equal} = icmp eq i64 {actual}, {expected}")?;
                let condition = self.temp();
                writeln!(self.out, "  {condition} = and i1 {converted}, {equal}")?;
                condition
            }
            Pattern::Literal(value) => match pattern_text(value) {
                Some(expected) => {
                    let expected = self.string(&expected)?;
                    let cmp = self.temp();
                    writeln!(
                        self.out,
                        "  {cmp} = call i32 @{STRCMP}(ptr {}, ptr {expected})",
                        subject.text
                    )?;
                    let condition = self.temp();
                    writeln!(self.out, "  {condition} = icmp eq i32 {cmp}, 0")?;
                    condition
                }
                // Array and object patterns never match.
                None => {
                    writeln!(self.out, "  br label %{miss}")?;
                    return Ok(());
                }
            },
        };
        writeln!(self.out, "  br i1 {condition}, label %{hit}, label %{miss}")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::codegen::collect::collect_strings;
    use crate::codegen::function::FunctionEmitter;
    use crate::codegen::options::CodegenOptions;
    use aro_syntax::ast::*;

    fn log(name: &str) -> Statement {
        ActionStatement::new("Log", name, Preposition::To, "console").into()
    }

    fn emit(statement: MatchStatement) -> String {
        let program = Program::new(vec![FeatureSet::new("Test", "Demo").with_statement(statement)]);
        let pool = collect_strings(&program, &CodegenOptions::default())
            .unwrap()
            .freeze();
        FunctionEmitter::new(&pool)
            .emit(&program.feature_sets[0], "aro_fs_test")
            .unwrap()
    }

    fn labels(ir: &str) -> Vec<&str> {
        ir.lines()
            .filter(|line| line.ends_with(':'))
            .map(|line| line.trim_end_matches(':'))
            .collect()
    }

    #[test]
    fn string_cases_chain_in_order() {
        let ir = emit(
            MatchStatement::new("status")
                .with_case(Pattern::Literal("a".into()), vec![log("one")])
                .with_case(Pattern::Literal("b".into()), vec![log("two")])
                .with_case(Pattern::Literal("c".into()), vec![log("three")])
                .with_otherwise(vec![log("other")]),
        );

        assert_eq!(
            labels(&ir),
            [
                "entry",
                "match0_case0",
                "match0_body0",
                "match0_case1",
                "match0_body1",
                "match0_case2",
                "match0_body2",
                "match0_otherwise",
                "match0_end",
            ]
        );
        assert!(ir.contains("label %match0_body0, label %match0_case1"));
        assert!(ir.contains("label %match0_body1, label %match0_case2"));
        assert!(ir.contains("label %match0_body2, label %match0_otherwise"));
        assert_eq!(ir.matches("  br label %match0_end\n").count(), 4);
        assert_eq!(ir.matches("call i32 @strcmp(").count(), 3);
        assert_eq!(ir.matches("@aro_variable_resolve(").count(), 1);
    }

    #[test]
    fn otherwise_is_the_last_link_of_the_chain() {
        let ir = emit(
            MatchStatement::new("status")
                .with_case(Pattern::Literal("a".into()), vec![])
                .with_case(Pattern::Literal("b".into()), vec![])
                .with_case(Pattern::Literal("c".into()), vec![])
                .with_otherwise(vec![]),
        );

        let chain: Vec<&str> = labels(&ir)
            .into_iter()
            .filter(|l| l.contains("_case") || l.ends_with("_otherwise"))
            .collect();
        assert_eq!(
            chain,
            ["match0_case0", "match0_case1", "match0_case2", "match0_otherwise"]
        );
        for pair in chain.windows(2) {
            assert!(ir.contains(&format!(", label %{}\n", pair[1])), "{pair:?}");
        }
        assert!(ir.contains("match0_otherwise:\n  br label %match0_end\n"));
    }

    #[test]
    fn empty_match_branches_to_end() {
        let ir = emit(MatchStatement::new("status"));
        assert!(ir.contains("  br label %match0_end\nmatch0_end:\n"));
        assert_eq!(labels(&ir), ["entry", "match0_end"]);
    }

    #[test]
    fn last_case_without_otherwise_falls_to_end() {
        let ir = emit(MatchStatement::new("x").with_case(Pattern::Wildcard, vec![]));
        assert!(ir.contains("match0_case0:\n  br label %match0_body0\n"));
        assert!(!ir.contains("match0_otherwise"));
    }

    #[test]
    fn integer_and_null_patterns() {
        let ir = emit(
            MatchStatement::new("code")
                .with_case(Pattern::Literal(LiteralValue::Integer(404)), vec![])
                .with_case(Pattern::Literal(LiteralValue::Null), vec![]),
        );
        assert!(ir.contains("alloca i64"));
        assert!(ir.contains("call i32 @aro_value_as_int(ptr %t0, ptr"));
        assert!(ir.contains(", 404\n"));
        assert!(ir.contains("= and i1 "));
        assert!(ir.contains("= icmp eq ptr %t0, null"));
    }

    #[test]
    fn binding_pattern_never_matches() {
        let ir = emit(
            MatchStatement::new("x")
                .with_case(Pattern::Binding("y".into()), vec![])
                .with_otherwise(vec![]),
        );
        assert!(ir.contains("match0_case0:\n  br label %match0_otherwise\n"));
    }

    #[test]
    fn nested_matches_get_distinct_labels() {
        let inner = MatchStatement::new("y").with_case(Pattern::Wildcard, vec![log("y")]);
        let ir = emit(MatchStatement::new("x").with_case(Pattern::Wildcard, vec![inner.into()]));
        let labels = labels(&ir);
        assert!(labels.contains(&"match0_end"));
        assert!(labels.contains(&"match1_end"));
        let inner_end = ir.find("match1_end:").unwrap();
        assert!(ir[inner_end..].contains("br label %match0_end"));
    }
}
