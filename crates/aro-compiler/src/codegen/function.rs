//! Per-feature-set function emission.
//!
//! Each feature set becomes `define ptr @aro_fs_<name>(ptr %ctx)`. The
//! function keeps the most recent action result in the `%__result` stack
//! slot and returns it after the last statement. Temporaries are named
//! `%t<n>`, numbered per function.

use std::fmt::Write;

use aro_core::CodegenError;
use aro_syntax::ast::*;
use tracing::trace;

use super::abi::*;
use super::escape::comment_text;
use super::lowering::{ActionTarget, ExprLowering, ValueBinding, action_target, double_literal};
use super::pool::{FrozenStringPool, StringId};
use super::verbs::action_function;
use crate::analysis::known::{EXPRESSION_SLOT, LITERAL_SLOT};

/// Emits the body of one feature-set function.
pub(super) struct FunctionEmitter<'a> {
    pool: &'a FrozenStringPool,
    pub(super) out: String,
    next_temp: u32,
    pub(super) next_match: u32,
}

impl<'a> FunctionEmitter<'a> {
    pub fn new(pool: &'a FrozenStringPool) -> Self {
        Self {
            pool,
            out: String::new(),
            next_temp: 0,
            next_match: 0,
        }
    }

    /// Emits the complete function definition for `feature_set`.
    pub fn emit(mut self, feature_set: &FeatureSet, symbol: &str) -> Result<String, CodegenError> {
        writeln!(
            self.out,
            "; Feature set: {} ({})",
            comment_text(&feature_set.name),
            comment_text(&feature_set.business_activity)
        )?;
        writeln!(self.out, "define ptr @{symbol}(ptr %ctx) {{")?;
        writeln!(self.out, "entry:")?;
        writeln!(self.out, "  %__result = alloca ptr")?;
        writeln!(self.out, "  store ptr null, ptr %__result")?;

        self.statements(&feature_set.statements)?;

        let value = self.temp();
        writeln!(self.out, "  {value} = load ptr, ptr %__result")?;
        writeln!(self.out, "  ret ptr {value}")?;
        writeln!(self.out, "}}")?;
        Ok(self.out)
    }

    pub(super) fn temp(&mut self) -> String {
        let name = format!("%t{}", self.next_temp);
        self.next_temp += 1;
        name
    }

    pub(super) fn string(&self, value: &str) -> Result<StringId, CodegenError> {
        self.pool.id(value)
    }

    pub(super) fn statements(&mut self, statements: &[Statement]) -> Result<(), CodegenError> {
        for statement in statements {
            trace!(line = statement.span().line, "lowering statement");
            match statement {
                Statement::Action(action) => self.action(action)?,
                Statement::Publish(publish) => self.publish(publish)?,
                Statement::Require(require) => self.require(require)?,
                Statement::Match(m) => self.match_statement(m)?,
            }
        }
        Ok(())
    }

    fn action(&mut self, action: &ActionStatement) -> Result<(), CodegenError> {
        writeln!(self.out, "  ; {}", comment_text(&action.to_string()))?;

        if let Some(literal) = &action.literal {
            let binding = ValueBinding::from_literal(literal)?;
            self.bind(LITERAL_SLOT, &binding)?;
        }

        if let Some(expression) = &action.expression {
            match ExprLowering::of(expression)? {
                ExprLowering::Constant(binding) => self.bind(EXPRESSION_SLOT, &binding)?,
                ExprLowering::Copy(name) => {
                    let value = self.resolve(name)?;
                    self.bind_value(EXPRESSION_SLOT, &value)?;
                }
                ExprLowering::Evaluate(json) => {
                    let json = self.string(&json)?;
                    let value = self.temp();
                    writeln!(
                        self.out,
                        "  {value} = call ptr @{EVALUATE}(ptr %ctx, ptr {json})"
                    )?;
                    self.bind_value(EXPRESSION_SLOT, &value)?;
                    writeln!(self.out, "  call void @{VALUE_FREE}(ptr {value})")?;
                }
            }
        }

        let result = self.result_descriptor(&action.result.name, &action.result.specifiers)?;
        let object = self.object_descriptor(
            &action.object.noun.name,
            action.object.preposition,
            &action.object.noun.specifiers,
        )?;

        let value = self.temp();
        match action_target(&action.action.lowercase_verb()) {
            ActionTarget::Canonical(verb) => writeln!(
                self.out,
                "  {value} = call ptr @{}(ptr %ctx, ptr {result}, ptr {object})",
                action_function(verb)
            )?,
            ActionTarget::Custom(verb) => {
                let verb = self.string(verb)?;
                writeln!(
                    self.out,
                    "  {value} = call ptr @{CUSTOM_ACTION}(ptr %ctx, ptr {verb}, ptr {result}, ptr {object})"
                )?
            }
        }
        writeln!(self.out, "  store ptr {value}, ptr %__result")?;
        Ok(())
    }

    fn publish(&mut self, publish: &PublishStatement) -> Result<(), CodegenError> {
        writeln!(
            self.out,
            "  ; <Publish> as <{}> <{}>.",
            comment_text(&publish.external_name),
            comment_text(&publish.internal_variable)
        )?;
        let result = self.result_descriptor(&publish.external_name, &[])?;
        let object = self.object_descriptor(&publish.internal_variable, Preposition::With, &[])?;
        let value = self.temp();
        writeln!(
            self.out,
            "  {value} = call ptr @{}(ptr %ctx, ptr {result}, ptr {object})",
            action_function("publish")
        )?;
        writeln!(self.out, "  store ptr {value}, ptr %__result")?;
        Ok(())
    }

    /// Requirements are satisfied by the runtime context; only recorded.
    fn require(&mut self, require: &RequireStatement) -> Result<(), CodegenError> {
        writeln!(
            self.out,
            "  ; <Require> the <{}> from the <{}>.",
            comment_text(&require.variable),
            comment_text(require.source.as_str())
        )?;
        Ok(())
    }

    fn bind(&mut self, slot: &str, binding: &ValueBinding) -> Result<(), CodegenError> {
        if !binding.binds_something() {
            return Ok(());
        }
        let slot = self.string(slot)?;
        match binding {
            ValueBinding::String(s) => {
                let value = self.string(s)?;
                writeln!(
                    self.out,
                    "  call void @{BIND_STRING}(ptr %ctx, ptr {slot}, ptr {value})"
                )?;
            }
            ValueBinding::Int(i) => {
                writeln!(self.out, "  call void @{BIND_INT}(ptr %ctx, ptr {slot}, i64 {i})")?;
            }
            ValueBinding::Double(x) => {
                writeln!(
                    self.out,
                    "  call void @{BIND_DOUBLE}(ptr %ctx, ptr {slot}, double {})",
                    double_literal(*x)
                )?;
            }
            ValueBinding::Bool(b) => {
                writeln!(
                    self.out,
                    "  call void @{BIND_BOOL}(ptr %ctx, ptr {slot}, i32 {})",
                    i32::from(*b)
                )?;
            }
            ValueBinding::Array(json) => {
                let value = self.string(json)?;
                writeln!(self.out, "  call void @{BIND_ARRAY}(ptr %ctx, ptr {slot}, ptr {value})")?;
            }
            ValueBinding::Dict(json) => {
                let value = self.string(json)?;
                writeln!(self.out, "  call void @{BIND_DICT}(ptr %ctx, ptr {slot}, ptr {value})")?;
            }
            ValueBinding::Null => {}
        }
        Ok(())
    }

    /// Copies an already materialized value into a slot.
    fn bind_value(&mut self, slot: &str, value: &str) -> Result<(), CodegenError> {
        let slot = self.string(slot)?;
        writeln!(self.out, "  call void @{BIND_VALUE}(ptr %ctx, ptr {slot}, ptr {value})")?;
        Ok(())
    }

    pub(super) fn resolve(&mut self, name: &str) -> Result<String, CodegenError> {
        let name = self.string(name)?;
        let value = self.temp();
        writeln!(self.out, "  {value} = call ptr @{RESOLVE}(ptr %ctx, ptr {name})")?;
        Ok(value)
    }

    /// Stack-allocated array of specifier strings, or `null` when empty.
    fn specifier_array(&mut self, specifiers: &[String]) -> Result<String, CodegenError> {
        if specifiers.is_empty() {
            return Ok("null".to_string());
        }
        let count = specifiers.len();
        let array = self.temp();
        writeln!(self.out, "  {array} = alloca [{count} x ptr]")?;
        for (index, specifier) in specifiers.iter().enumerate() {
            let id = self.string(specifier)?;
            let element = self.temp();
            writeln!(
                self.out,
                "  {element} = getelementptr inbounds [{count} x ptr], ptr {array}, i32 0, i32 {index}"
            )?;
            writeln!(self.out, "  store ptr {id}, ptr {element}")?;
        }
        Ok(array)
    }

    fn store_field(
        &mut self,
        descriptor_type: &str,
        descriptor: &str,
        index: u32,
        field: &str,
    ) -> Result<(), CodegenError> {
        let slot = self.temp();
        writeln!(
            self.out,
            "  {slot} = getelementptr inbounds {descriptor_type}, ptr {descriptor}, i32 0, i32 {index}"
        )?;
        writeln!(self.out, "  store {field}, ptr {slot}")?;
        Ok(())
    }

    fn result_descriptor(
        &mut self,
        name: &str,
        specifiers: &[String],
    ) -> Result<String, CodegenError> {
        let name = self.string(name)?;
        let array = self.specifier_array(specifiers)?;
        let descriptor = self.temp();
        writeln!(self.out, "  {descriptor} = alloca {RESULT_DESCRIPTOR}")?;
        self.store_field(RESULT_DESCRIPTOR, &descriptor, 0, &format!("ptr {name}"))?;
        self.store_field(RESULT_DESCRIPTOR, &descriptor, 1, &format!("ptr {array}"))?;
        self.store_field(RESULT_DESCRIPTOR, &descriptor, 2, &format!("i32 {}", specifiers.len()))?;
        Ok(descriptor)
    }

    fn object_descriptor(
        &mut self,
        name: &str,
        preposition: Preposition,
        specifiers: &[String],
    ) -> Result<String, CodegenError> {
        let name = self.string(name)?;
        let array = self.specifier_array(specifiers)?;
        let descriptor = self.temp();
        writeln!(self.out, "  {descriptor} = alloca {OBJECT_DESCRIPTOR}")?;
        self.store_field(OBJECT_DESCRIPTOR, &descriptor, 0, &format!("ptr {name}"))?;
        let code = format!("i32 {}", preposition.code());
        self.store_field(OBJECT_DESCRIPTOR, &descriptor, 1, &code)?;
        self.store_field(OBJECT_DESCRIPTOR, &descriptor, 2, &format!("ptr {array}"))?;
        self.store_field(OBJECT_DESCRIPTOR, &descriptor, 3, &format!("i32 {}", specifiers.len()))?;
        Ok(descriptor)
    }
}
