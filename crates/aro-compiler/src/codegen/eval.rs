//! Expression evaluation protocol.
//!
//! Expressions the generator does not lower directly are serialized to JSON
//! and handed to `aro_evaluate_expression`. Each node becomes a single-key
//! object whose key names the node kind:
//!
//! ```text
//! {"$lit": <json value>}
//! {"$var": "name"}
//! {"$binary": {"op": "+", "left": <node>, "right": <node>}}
//! {"$unary": {"op": "not", "operand": <node>}}
//! {"$member": {"object": <node>, "member": "name"}}
//! {"$index": {"object": <node>, "index": <node>}}
//! {"$exists": <node>}
//! {"$is": {"operand": <node>, "type": "Name"}}
//! {"$interp": ["text", <node>, ...]}
//! {"$array": [<node>, ...]}
//! {"$map": {"key": <node>, ...}}
//! ```
//!
//! Grouping is structural only: a grouped expression serializes as its inner
//! expression. Tag and field names are a fixed contract with the runtime.

use aro_core::CodegenError;
use aro_syntax::ast::visitor::ExprVisitor;
use aro_syntax::ast::*;
use serde_json::{Map, Number, Value, json};

/// Plain JSON for a literal value. Object keys keep source order.
pub fn literal_to_json(value: &LiteralValue) -> Result<Value, CodegenError> {
    Ok(match value {
        LiteralValue::String(s) => Value::String(s.clone()),
        LiteralValue::Integer(i) => Value::Number((*i).into()),
        LiteralValue::Float(x) => Value::Number(Number::from_f64(*x).ok_or_else(|| {
            CodegenError::Serialization {
                what: "float literal",
                detail: format!("{x} has no JSON representation"),
            }
        })?),
        LiteralValue::Boolean(b) => Value::Bool(*b),
        LiteralValue::Null => Value::Null,
        LiteralValue::Array(items) => Value::Array(
            items
                .iter()
                .map(literal_to_json)
                .collect::<Result<Vec<_>, _>>()?,
        ),
        LiteralValue::Object(entries) => {
            let mut map = Map::new();
            for (key, value) in entries {
                map.insert(key.clone(), literal_to_json(value)?);
            }
            Value::Object(map)
        }
    })
}

/// JSON text of a composite literal, as bound by `bind_array`/`bind_dict`.
pub fn literal_json_text(value: &LiteralValue) -> Result<String, CodegenError> {
    Ok(literal_to_json(value)?.to_string())
}

/// Serializes an expression with the evaluation protocol.
pub fn expression_to_json(expr: &Expr) -> Result<Value, CodegenError> {
    expr.accept_expr(&mut ProtocolWriter)
}

/// Protocol JSON text for an expression.
pub fn expression_json_text(expr: &Expr) -> Result<String, CodegenError> {
    Ok(expression_to_json(expr)?.to_string())
}

struct ProtocolWriter;

impl ExprVisitor for ProtocolWriter {
    type Output = Result<Value, CodegenError>;

    fn visit_literal(&mut self, expr: &LiteralExpr) -> Self::Output {
        Ok(json!({ "$lit": literal_to_json(&expr.value)? }))
    }

    fn visit_array(&mut self, expr: &ArrayExpr) -> Self::Output {
        let elements = expr
            .elements
            .iter()
            .map(|e| e.accept_expr(self))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(json!({ "$array": elements }))
    }

    fn visit_map(&mut self, expr: &MapExpr) -> Self::Output {
        let mut map = Map::new();
        for entry in &expr.entries {
            map.insert(entry.key.clone(), entry.value.accept_expr(self)?);
        }
        Ok(json!({ "$map": map }))
    }

    fn visit_var(&mut self, expr: &VarExpr) -> Self::Output {
        Ok(json!({ "$var": expr.name }))
    }

    fn visit_binary(&mut self, expr: &BinaryExpr) -> Self::Output {
        Ok(json!({
            "$binary": {
                "op": expr.op.as_str(),
                "left": expr.left.accept_expr(self)?,
                "right": expr.right.accept_expr(self)?,
            }
        }))
    }

    fn visit_unary(&mut self, expr: &UnaryExpr) -> Self::Output {
        Ok(json!({
            "$unary": {
                "op": expr.op.as_str(),
                "operand": expr.operand.accept_expr(self)?,
            }
        }))
    }

    fn visit_member(&mut self, expr: &MemberExpr) -> Self::Output {
        Ok(json!({
            "$member": {
                "object": expr.object.accept_expr(self)?,
                "member": expr.member,
            }
        }))
    }

    fn visit_subscript(&mut self, expr: &SubscriptExpr) -> Self::Output {
        Ok(json!({
            "$index": {
                "object": expr.object.accept_expr(self)?,
                "index": expr.index.accept_expr(self)?,
            }
        }))
    }

    fn visit_grouped(&mut self, expr: &GroupedExpr) -> Self::Output {
        expr.inner.accept_expr(self)
    }

    fn visit_exists(&mut self, expr: &ExistsExpr) -> Self::Output {
        Ok(json!({ "$exists": expr.operand.accept_expr(self)? }))
    }

    fn visit_type_check(&mut self, expr: &TypeCheckExpr) -> Self::Output {
        Ok(json!({
            "$is": {
                "operand": expr.operand.accept_expr(self)?,
                "type": expr.type_name,
            }
        }))
    }

    fn visit_interpolated(&mut self, expr: &InterpolatedExpr) -> Self::Output {
        let parts = expr
            .parts
            .iter()
            .map(|part| match part {
                StringPart::Text(text) => Ok(Value::String(text.clone())),
                StringPart::Expr(e) => e.accept_expr(self),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(json!({ "$interp": parts }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binary_protocol_shape() {
        let expr = Expr::binary(Expr::var("price"), BinaryOp::Mul, Expr::literal(2));
        assert_eq!(
            expression_json_text(&expr).unwrap(),
            r#"{"$binary":{"op":"*","left":{"$var":"price"},"right":{"$lit":2}}}"#
        );
    }

    #[test]
    fn grouping_is_transparent() {
        let grouped = Expr::grouped(Expr::binary(
            Expr::var("a"),
            BinaryOp::Add,
            Expr::var("b"),
        ));
        let plain = Expr::binary(Expr::var("a"), BinaryOp::Add, Expr::var("b"));
        assert_eq!(
            expression_to_json(&grouped).unwrap(),
            expression_to_json(&plain).unwrap()
        );
    }

    #[test]
    fn extended_tags() {
        let expr = Expr::binary(
            Expr::exists(Expr::member(Expr::var("user"), "email")),
            BinaryOp::And,
            Expr::unary(
                UnaryOp::Not,
                Expr::type_check(Expr::subscript(Expr::var("xs"), Expr::literal(0)), "String"),
            ),
        );
        let json = expression_json_text(&expr).unwrap();
        assert_eq!(
            json,
            concat!(
                r#"{"$binary":{"op":"and","#,
                r#""left":{"$exists":{"$member":{"object":{"$var":"user"},"member":"email"}}},"#,
                r#""right":{"$unary":{"op":"not","operand":{"$is":{"operand":"#,
                r#"{"$index":{"object":{"$var":"xs"},"index":{"$lit":0}}},"type":"String"}}}}}}"#
            )
        );
    }

    #[test]
    fn interpolation_and_containers() {
        let expr = Expr::interpolated(vec![
            StringPart::Text("Hi ".into()),
            StringPart::Expr(Expr::var("name")),
        ]);
        assert_eq!(
            expression_json_text(&expr).unwrap(),
            r#"{"$interp":["Hi ",{"$var":"name"}]}"#
        );

        let map = Expr::map([("z", Expr::var("a")), ("y", Expr::array(vec![Expr::literal(true)]))]);
        assert_eq!(
            expression_json_text(&map).unwrap(),
            r#"{"$map":{"z":{"$var":"a"},"y":{"$array":[{"$lit":true}]}}}"#
        );
    }

    #[test]
    fn literal_object_keeps_key_order() {
        let mut entries = indexmap::IndexMap::new();
        entries.insert("zeta".to_string(), LiteralValue::Integer(1));
        entries.insert("alpha".to_string(), LiteralValue::from(vec!["x"]));
        let text = literal_json_text(&LiteralValue::Object(entries)).unwrap();
        assert_eq!(text, r#"{"zeta":1,"alpha":["x"]}"#);
    }

    #[test]
    fn non_finite_float_fails() {
        let err = literal_json_text(&LiteralValue::Array(vec![LiteralValue::Float(f64::NAN)]))
            .unwrap_err();
        assert!(matches!(err, CodegenError::Serialization { .. }));
        assert!(!err.is_internal());
    }
}
