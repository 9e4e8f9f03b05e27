//! The variable accessor contract and default implementation (C7
//! boundary): `(path, index) -> Option<Expr>`, where `None` signals
//! absence — caught by `Var`'s default-operand fallback and `Missing`'s
//! membership test, never raised as an error.

use crate::value::Expr;
use std::collections::BTreeMap;

/// A source of variable bindings. The evaluator calls `resolve` once per
/// `Var`/`Missing`/`MissingSome` operand; implementations may freely
/// mutate external state (see §5's resource model).
pub trait Accessor {
    fn resolve(&mut self, path: &Expr, idx: i64) -> Option<Expr>;
}

impl<F: FnMut(&Expr, i64) -> Option<Expr>> Accessor for F {
    fn resolve(&mut self, path: &Expr, idx: i64) -> Option<Expr> {
        self(path, idx)
    }
}

/// The default accessor: dotted-path and numeric-index lookup against a
/// fixed document. Ignores `idx` — the static variable-name table is a
/// translator-side optimization a caller may use, but `DataAccessor`
/// itself always resolves by path.
pub struct DataAccessor {
    root: Expr,
}

impl DataAccessor {
    pub fn new(data: &serde_json::Value) -> Self {
        DataAccessor {
            root: json_to_expr(data),
        }
    }
}

impl Accessor for DataAccessor {
    fn resolve(&mut self, path: &Expr, _idx: i64) -> Option<Expr> {
        lookup_path(&self.root, path)
    }
}

/// Builds the default accessor (C7's `data_accessor`) over `data`.
pub fn data_accessor(data: &serde_json::Value) -> DataAccessor {
    DataAccessor::new(data)
}

/// Converts a `serde_json::Value` into the engine's internal tree
/// representation, preserving object/array structure so accessor lookups
/// can walk it the same way `Expr` trees are walked elsewhere.
pub fn json_to_expr(v: &serde_json::Value) -> Expr {
    match v {
        serde_json::Value::Null => Expr::Null,
        serde_json::Value::Bool(b) => Expr::Bool(*b),
        serde_json::Value::Number(n) => json_number_to_expr(n),
        serde_json::Value::String(s) => Expr::Str(s.clone()),
        serde_json::Value::Array(items) => Expr::Array(items.iter().map(json_to_expr).collect()),
        serde_json::Value::Object(map) => Expr::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), json_to_expr(v)))
                .collect::<BTreeMap<_, _>>(),
        ),
    }
}

fn json_number_to_expr(num: &serde_json::Number) -> Expr {
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

/// Resolves a `Var` path against `root`: empty string returns the whole
/// document; a dotted string walks object members (numeric segments
/// index arrays); a bare integer indexes an array directly.
pub fn lookup_path(root: &Expr, path: &Expr) -> Option<Expr> {
    match path {
        Expr::Str(s) => lookup_str_path(root, s),
        Expr::Int(i) => lookup_index(root, *i),
        Expr::Uint(u) => lookup_index(root, *u as i64),
        _ => None,
    }
}

fn lookup_str_path(root: &Expr, path: &str) -> Option<Expr> {
    if path.is_empty() {
        return Some(root.clone());
    }
    let mut current = root.clone();
    for segment in path.split('.') {
        current = lookup_segment(&current, segment)?;
    }
    Some(current)
}

fn lookup_segment(current: &Expr, segment: &str) -> Option<Expr> {
    match current {
        Expr::Object(map) => map.get(segment).cloned(),
        Expr::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i).cloned()),
        _ => None,
    }
}

fn lookup_index(root: &Expr, idx: i64) -> Option<Expr> {
    if idx < 0 {
        return None;
    }
    match root {
        Expr::Array(items) => items.get(idx as usize).cloned(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_path_returns_whole_document() {
        let mut accessor = data_accessor(&json!({"a": 1}));
        let result = accessor.resolve(&Expr::Str(String::new()), -1).unwrap();
        assert_eq!(result, Expr::Object(BTreeMap::from([("a".to_string(), Expr::Uint(1))])));
    }

    #[test]
    fn dotted_path_walks_nested_objects() {
        let mut accessor = data_accessor(&json!({"user": {"name": "Alice"}}));
        let result = accessor.resolve(&Expr::Str("user.name".into()), -1).unwrap();
        assert_eq!(result, Expr::Str("Alice".into()));
    }

    #[test]
    fn numeric_segment_indexes_an_array() {
        let mut accessor = data_accessor(&json!({"xs": [10, 20, 30]}));
        let result = accessor.resolve(&Expr::Str("xs.1".into()), -1).unwrap();
        assert_eq!(result, Expr::Uint(20));
    }

    #[test]
    fn missing_path_resolves_to_none() {
        let mut accessor = data_accessor(&json!({"a": 1}));
        assert!(accessor.resolve(&Expr::Str("b".into()), -1).is_none());
    }

    #[test]
    fn integer_path_indexes_array_root() {
        let mut accessor = data_accessor(&json!(["x", "y", "z"]));
        let result = accessor.resolve(&Expr::Uint(2), -1).unwrap();
        assert_eq!(result, Expr::Str("z".into()));
    }
}
