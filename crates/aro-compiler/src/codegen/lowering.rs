//! Lowering decisions shared by string collection and emission.
//!
//! The collection pass must register exactly the strings emission will ask
//! for. Both passes therefore derive what to emit from the same functions in
//! this module instead of re-deciding independently.

use aro_core::CodegenError;
use aro_syntax::ast::*;

use super::eval::{expression_json_text, literal_json_text};
use super::verbs::canonical_verb;

/// How a value is bound into a context slot.
#[derive(Debug, Clone, PartialEq)]
pub enum ValueBinding {
    String(String),
    Int(i64),
    Double(f64),
    Bool(bool),
    /// JSON text of an array.
    Array(String),
    /// JSON text of an object.
    Dict(String),
    /// Nothing is bound.
    Null,
}

impl ValueBinding {
    pub fn from_literal(value: &LiteralValue) -> Result<Self, CodegenError> {
        Ok(match value {
            LiteralValue::String(s) => ValueBinding::String(s.clone()),
            LiteralValue::Integer(i) => ValueBinding::Int(*i),
            LiteralValue::Float(x) => ValueBinding::Double(*x),
            LiteralValue::Boolean(b) => ValueBinding::Bool(*b),
            LiteralValue::Null => ValueBinding::Null,
            LiteralValue::Array(_) => ValueBinding::Array(literal_json_text(value)?),
            LiteralValue::Object(_) => ValueBinding::Dict(literal_json_text(value)?),
        })
    }

    /// The pooled string this binding passes, if any.
    pub fn pooled_string(&self) -> Option<&str> {
        match self {
            ValueBinding::String(s) | ValueBinding::Array(s) | ValueBinding::Dict(s) => Some(s),
            _ => None,
        }
    }

    pub fn binds_something(&self) -> bool {
        !matches!(self, ValueBinding::Null)
    }
}

/// How an action's expression reaches the `_expression_` slot.
#[derive(Debug, Clone, PartialEq)]
pub enum ExprLowering<'e> {
    /// A constant bound directly.
    Constant(ValueBinding),
    /// A bare variable: resolved, then copied.
    Copy(&'e str),
    /// Everything else: evaluated at run time from protocol JSON.
    Evaluate(String),
}

impl<'e> ExprLowering<'e> {
    pub fn of(expr: &'e Expr) -> Result<Self, CodegenError> {
        let expr = expr.ungrouped();
        if let Expr::Var(var) = expr {
            return Ok(ExprLowering::Copy(&var.name));
        }
        match constant_value(expr) {
            Some(value) => Ok(ExprLowering::Constant(ValueBinding::from_literal(&value)?)),
            None => Ok(ExprLowering::Evaluate(expression_json_text(expr)?)),
        }
    }

    /// Whether anything ends up in the `_expression_` slot.
    pub fn binds_something(&self) -> bool {
        match self {
            ExprLowering::Constant(binding) => binding.binds_something(),
            ExprLowering::Copy(_) | ExprLowering::Evaluate(_) => true,
        }
    }

    /// Strings this lowering references, in emission order.
    pub fn pooled_strings(&self) -> Vec<&str> {
        match self {
            ExprLowering::Constant(binding) => binding.pooled_string().into_iter().collect(),
            ExprLowering::Copy(name) => vec![*name],
            ExprLowering::Evaluate(json) => vec![json.as_str()],
        }
    }
}

/// Folds literal-only expressions (including nested array and map literals)
/// into a single literal value.
pub fn constant_value(expr: &Expr) -> Option<LiteralValue> {
    match expr {
        Expr::Literal(lit) => Some(lit.value.clone()),
        Expr::Grouped(group) => constant_value(&group.inner),
        Expr::Array(array) => array
            .elements
            .iter()
            .map(constant_value)
            .collect::<Option<Vec<_>>>()
            .map(LiteralValue::Array),
        Expr::Map(map) => map
            .entries
            .iter()
            .map(|entry| constant_value(&entry.value).map(|v| (entry.key.clone(), v)))
            .collect::<Option<indexmap::IndexMap<_, _>>>()
            .map(LiteralValue::Object),
        _ => None,
    }
}

/// Runtime call target of an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionTarget<'a> {
    Canonical(&'static str),
    /// Dispatched by (lowercase) verb name.
    Custom(&'a str),
}

/// Call target for a lowercased verb. Only custom actions pool the verb.
pub fn action_target(verb_lower: &str) -> ActionTarget<'_> {
    match canonical_verb(verb_lower) {
        Some(canonical) => ActionTarget::Canonical(canonical),
        None => ActionTarget::Custom(verb_lower),
    }
}

/// Canonical text a float or boolean pattern compares against.
pub fn pattern_text(value: &LiteralValue) -> Option<String> {
    match value {
        LiteralValue::String(s) => Some(s.clone()),
        LiteralValue::Float(x) => Some(x.to_string()),
        LiteralValue::Boolean(b) => Some(b.to_string()),
        _ => None,
    }
}

/// LLVM hexadecimal spelling of a double.
pub fn double_literal(value: f64) -> String {
    format!("0x{:016X}", value.to_bits())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_variables_are_copied() {
        let expr = Expr::grouped(Expr::var("user"));
        assert_eq!(ExprLowering::of(&expr).unwrap(), ExprLowering::Copy("user"));
    }

    #[test]
    fn constant_containers_fold() {
        let expr = Expr::array(vec![Expr::literal(1), Expr::grouped(Expr::literal("a"))]);
        assert_eq!(
            ExprLowering::of(&expr).unwrap(),
            ExprLowering::Constant(ValueBinding::Array(r#"[1,"a"]"#.to_string()))
        );
        let map = Expr::map([("k", Expr::literal(true))]);
        assert_eq!(
            ExprLowering::of(&map).unwrap(),
            ExprLowering::Constant(ValueBinding::Dict(r#"{"k":true}"#.to_string()))
        );
    }

    #[test]
    fn non_constant_is_evaluated() {
        let expr = Expr::array(vec![Expr::var("a")]);
        assert_eq!(
            ExprLowering::of(&expr).unwrap(),
            ExprLowering::Evaluate(r#"{"$array":[{"$var":"a"}]}"#.to_string())
        );
    }

    #[test]
    fn primitive_literal_bindings() {
        assert_eq!(
            ValueBinding::from_literal(&LiteralValue::Integer(7)).unwrap(),
            ValueBinding::Int(7)
        );
        assert!(!ValueBinding::from_literal(&LiteralValue::Null).unwrap().binds_something());
        assert_eq!(
            ValueBinding::from_literal(&"x".into()).unwrap().pooled_string(),
            Some("x")
        );
    }

    #[test]
    fn targets() {
        assert_eq!(action_target("calculate"), ActionTarget::Canonical("compute"));
        assert_eq!(action_target("frobnicate"), ActionTarget::Custom("frobnicate"));
    }

    #[test]
    fn double_literal_is_hex() {
        assert_eq!(double_literal(1.0), "0x3FF0000000000000");
        assert_eq!(double_literal(-2.5), "0xC004000000000000");
    }

    #[test]
    fn pattern_texts() {
        assert_eq!(pattern_text(&LiteralValue::Float(2.5)).as_deref(), Some("2.5"));
        assert_eq!(pattern_text(&LiteralValue::Boolean(false)).as_deref(), Some("false"));
        assert_eq!(pattern_text(&LiteralValue::Integer(1)), None);
    }
}
