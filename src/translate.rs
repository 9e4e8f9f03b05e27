//! The translator (C3): JSON → expression tree, with static variable-name
//! indexing performed in the same left-to-right pass.

use crate::error::{JsonLogicError, Result};
use crate::value::{Expr, COMPUTED};
use serde_json::Value as Json;
use std::collections::HashMap;

/// Translation output: the expression tree plus the ordered list of
/// distinct static variable names encountered, indexed by first
/// occurrence.
#[derive(Debug, Clone, PartialEq)]
pub struct LogicBundle {
    pub tree: Expr,
    pub var_names: Vec<String>,
    pub has_computed_vars: bool,
}

/// Translates a JSON rule document into a [`LogicBundle`]. Translation
/// never evaluates anything — it only classifies variable references and
/// assigns them indices.
pub fn create_logic(rule: &Json) -> Result<LogicBundle> {
    let mut translator = Translator::default();
    let tree = translator.translate(rule)?;
    Ok(LogicBundle {
        tree,
        var_names: translator.var_names(),
        has_computed_vars: translator.has_computed_vars,
    })
}

#[derive(Default)]
struct Translator {
    index_of: HashMap<String, i64>,
    order: Vec<String>,
    has_computed_vars: bool,
}

impl Translator {
    fn var_names(&self) -> Vec<String> {
        self.order.clone()
    }

    fn translate(&mut self, n: &Json) -> Result<Expr> {
        match n {
            Json::Null => Ok(Expr::Null),
            Json::Bool(b) => Ok(Expr::Bool(*b)),
            Json::Number(num) => Ok(translate_number(num)),
            Json::String(s) => Ok(Expr::Str(s.clone())),
            Json::Array(items) => {
                let children = self.translate_many(items)?;
                Ok(Expr::Array(children))
            }
            Json::Object(map) => self.translate_object(map),
        }
    }

    fn translate_many(&mut self, items: &[Json]) -> Result<Vec<Expr>> {
        items.iter().map(|v| self.translate(v)).collect()
    }

    /// Translates the operand position of an operator: a JSON array
    /// becomes many operands, anything else becomes a single operand.
    fn translate_operands(&mut self, args: &Json) -> Result<Vec<Expr>> {
        match args {
            Json::Array(items) => self.translate_many(items),
            other => Ok(vec![self.translate(other)?]),
        }
    }

    fn translate_object(&mut self, map: &serde_json::Map<String, Json>) -> Result<Expr> {
        if map.len() != 1 {
            return Err(JsonLogicError::logic_error(format!(
                "operator object must have exactly one key, found {}",
                map.len()
            )));
        }
        let (key, args) = map.iter().next().expect("len checked above");
        let operands = self.translate_operands(args)?;
        self.build_operator(key, operands)
    }

    fn build_operator(&mut self, key: &str, operands: Vec<Expr>) -> Result<Expr> {
        let op = key;
        match key {
            "==" => require_arity(op, &operands, 2, 2).map(|_| Expr::Eq(operands)),
            "!=" => require_arity(op, &operands, 2, 2).map(|_| Expr::Ne(operands)),
            "===" => require_arity(op, &operands, 2, 2).map(|_| Expr::StrictEq(operands)),
            "!==" => require_arity(op, &operands, 2, 2).map(|_| Expr::StrictNe(operands)),
            "<" => require_arity(op, &operands, 2, 3).map(|_| Expr::Lt(operands)),
            ">" => require_arity(op, &operands, 2, 3).map(|_| Expr::Gt(operands)),
            "<=" => require_arity(op, &operands, 2, 3).map(|_| Expr::Le(operands)),
            ">=" => require_arity(op, &operands, 2, 3).map(|_| Expr::Ge(operands)),
            "!" => require_arity(op, &operands, 1, 1).map(|_| Expr::Not(operands)),
            "!!" => require_arity(op, &operands, 1, 1).map(|_| Expr::NotNot(operands)),
            "and" => require_arity(op, &operands, 1, usize::MAX).map(|_| Expr::And(operands)),
            "or" => require_arity(op, &operands, 1, usize::MAX).map(|_| Expr::Or(operands)),
            "if" => Ok(Expr::If(operands)),
            "+" => require_arity(op, &operands, 1, usize::MAX).map(|_| Expr::Add(operands)),
            "*" => require_arity(op, &operands, 1, usize::MAX).map(|_| Expr::Mul(operands)),
            "min" => require_arity(op, &operands, 1, usize::MAX).map(|_| Expr::Min(operands)),
            "max" => require_arity(op, &operands, 1, usize::MAX).map(|_| Expr::Max(operands)),
            "-" => require_arity(op, &operands, 1, 2).map(|_| Expr::Sub(operands)),
            "/" => require_arity(op, &operands, 2, 2).map(|_| Expr::Div(operands)),
            "%" => require_arity(op, &operands, 2, 2).map(|_| Expr::Mod(operands)),
            "merge" => Ok(Expr::Merge(operands)),
            "cat" => require_arity(op, &operands, 1, usize::MAX).map(|_| Expr::Cat(operands)),
            "substr" => require_arity(op, &operands, 1, 3).map(|_| Expr::Substr(operands)),
            "in" => require_arity(op, &operands, 2, 2).map(|_| Expr::In(operands)),
            "map" => require_arity(op, &operands, 2, 2).map(|_| Expr::Map(operands)),
            "filter" => require_arity(op, &operands, 2, 2).map(|_| Expr::Filter(operands)),
            "all" => require_arity(op, &operands, 2, 2).map(|_| Expr::All(operands)),
            "none" => require_arity(op, &operands, 2, 2).map(|_| Expr::None_(operands)),
            "some" => require_arity(op, &operands, 2, 2).map(|_| Expr::Some_(operands)),
            "reduce" => require_arity(op, &operands, 3, 3).map(|_| Expr::Reduce(operands)),
            "missing" => Ok(Expr::Missing(operands)),
            "missing_some" => {
                require_arity(op, &operands, 2, 2).map(|_| Expr::MissingSome(operands))
            }
            "log" => require_arity(op, &operands, 1, 1).map(|_| Expr::Log(operands)),
            "regex" => require_arity(op, &operands, 2, 2).map(|_| Expr::Regex(operands)),
            "var" => {
                require_arity(op, &operands, 1, 2)?;
                let idx = self.classify_var(&operands[0]);
                Ok(Expr::Var(operands, idx))
            }
            other => Err(JsonLogicError::logic_error(format!(
                "unknown operator '{other}'"
            ))),
        }
    }

    /// Assigns (or reuses) a static index for a `var` node's path
    /// operand, or returns [`COMPUTED`] when the path isn't a static
    /// plain string.
    fn classify_var(&mut self, path_operand: &Expr) -> i64 {
        let path = match path_operand {
            Expr::Str(s) => s,
            _ => {
                self.has_computed_vars = true;
                return COMPUTED;
            }
        };

        if path.contains('.') || path.contains('[') {
            self.has_computed_vars = true;
            return COMPUTED;
        }

        if path.is_empty() {
            // Recorded as a self-reference, but never assigned an index.
            return COMPUTED;
        }

        if let Some(&idx) = self.index_of.get(path) {
            return idx;
        }
        let idx = self.order.len() as i64;
        self.order.push(path.clone());
        self.index_of.insert(path.clone(), idx);
        idx
    }
}

fn require_arity(op: &'static str, operands: &[Expr], min: usize, max: usize) -> Result<()> {
    let n = operands.len();
    if n < min || n > max {
        return Err(JsonLogicError::logic_error(format!(
            "'{op}' expects between {min} and {max} operand(s), got {n}"
        )));
    }
    Ok(())
}

/// A JSON number with no sign and no fractional part is `Uint`; with a
/// sign it's `Int`; with a fractional part or exponent it's `Real`.
fn translate_number(num: &serde_json::Number) -> Expr {
    if let Some(u) = num.as_u64() {
        if !num.to_string().starts_with('-') {
            return Expr::Uint(u);
        }
    }
    if let Some(i) = num.as_i64() {
        return Expr::Int(i);
    }
    Expr::Real(num.as_f64().unwrap_or(f64::NAN))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn translates_literal_values() {
        assert_eq!(create_logic(&json!(null)).unwrap().tree, Expr::Null);
        assert_eq!(create_logic(&json!(true)).unwrap().tree, Expr::Bool(true));
        assert_eq!(create_logic(&json!(42)).unwrap().tree, Expr::Uint(42));
        assert_eq!(create_logic(&json!(-3)).unwrap().tree, Expr::Int(-3));
        assert_eq!(create_logic(&json!(1.5)).unwrap().tree, Expr::Real(1.5));
        assert_eq!(
            create_logic(&json!("hi")).unwrap().tree,
            Expr::Str("hi".into())
        );
    }

    #[test]
    fn json_array_literal_translates_to_array_node() {
        let bundle = create_logic(&json!([1, 2, "x"])).unwrap();
        assert_eq!(
            bundle.tree,
            Expr::Array(vec![Expr::Uint(1), Expr::Uint(2), Expr::Str("x".into())])
        );
    }

    #[test]
    fn single_key_object_dispatches_to_operator() {
        let bundle = create_logic(&json!({"==": [1, 1]})).unwrap();
        assert_eq!(bundle.tree, Expr::Eq(vec![Expr::Uint(1), Expr::Uint(1)]));
    }

    #[test]
    fn multi_key_object_is_a_logic_error() {
        let err = create_logic(&json!({"==": [1, 1], "!=": [2, 2]})).unwrap_err();
        assert!(matches!(err, JsonLogicError::Logic { .. }));
    }

    #[test]
    fn unknown_operator_is_a_logic_error() {
        let err = create_logic(&json!({"frobnicate": [1]})).unwrap_err();
        assert!(matches!(err, JsonLogicError::Logic { .. }));
    }

    #[test]
    fn single_operand_not_wrapped_in_array_becomes_one_element_list() {
        let bundle = create_logic(&json!({"!": true})).unwrap();
        assert_eq!(bundle.tree, Expr::Not(vec![Expr::Bool(true)]));
    }

    #[test]
    fn static_plain_var_paths_are_indexed_in_first_occurrence_order() {
        let bundle = create_logic(&json!({"==": [{"var": "b"}, {"var": "a"}]})).unwrap();
        assert_eq!(bundle.var_names, vec!["b".to_string(), "a".to_string()]);
        assert!(!bundle.has_computed_vars);
        match bundle.tree {
            Expr::Eq(ops) => {
                assert_eq!(ops[0], Expr::Var(vec![Expr::Str("b".into())], 0));
                assert_eq!(ops[1], Expr::Var(vec![Expr::Str("a".into())], 1));
            }
            _ => panic!("expected Eq"),
        }
    }

    #[test]
    fn repeated_var_reuses_its_index() {
        let bundle = create_logic(&json!({"==": [{"var": "x"}, {"var": "x"}]})).unwrap();
        assert_eq!(bundle.var_names, vec!["x".to_string()]);
        match bundle.tree {
            Expr::Eq(ops) => {
                assert_eq!(ops[0], Expr::Var(vec![Expr::Str("x".into())], 0));
                assert_eq!(ops[1], Expr::Var(vec![Expr::Str("x".into())], 0));
            }
            _ => panic!("expected Eq"),
        }
    }

    #[test]
    fn dotted_and_bracketed_paths_are_computed() {
        let bundle = create_logic(&json!({"var": "user.name"})).unwrap();
        assert!(bundle.has_computed_vars);
        assert!(bundle.var_names.is_empty());
        match bundle.tree {
            Expr::Var(_, idx) => assert_eq!(idx, COMPUTED),
            _ => panic!("expected Var"),
        }
    }

    #[test]
    fn empty_path_is_not_indexed() {
        let bundle = create_logic(&json!({"var": ""})).unwrap();
        assert!(!bundle.has_computed_vars);
        assert!(bundle.var_names.is_empty());
        match bundle.tree {
            Expr::Var(_, idx) => assert_eq!(idx, COMPUTED),
            _ => panic!("expected Var"),
        }
    }

    #[test]
    fn nested_expr_var_path_is_computed() {
        let bundle = create_logic(&json!({"var": [{"var": "which"}]})).unwrap();
        assert!(bundle.has_computed_vars);
    }
}
