//! The evaluator (C5): a recursive tree walk implementing short-circuit
//! evaluation, chained comparisons, and sub-evaluator construction for
//! the sequence combinators.

use crate::accessor::{lookup_path, Accessor};
use crate::coerce::to_numeric_for_compare;
use crate::error::{JsonLogicError, Result};
use crate::log::LogSink;
use crate::operators;
use crate::value::{Expr, COMPUTED};

/// Owns the variable accessor and log sink for one evaluation. Holds no
/// other state: every other match arm's "current value" is simply its
/// return value, not a mutable field (§9's re-architecture guidance).
pub struct Evaluator<'a> {
    accessor: &'a mut dyn Accessor,
    sink: &'a mut dyn LogSink,
}

impl<'a> Evaluator<'a> {
    pub fn new(accessor: &'a mut dyn Accessor, sink: &'a mut dyn LogSink) -> Self {
        Evaluator { accessor, sink }
    }

    pub fn eval(&mut self, expr: &Expr) -> Result<Expr> {
        match expr {
            Expr::Null
            | Expr::Bool(_)
            | Expr::Int(_)
            | Expr::Uint(_)
            | Expr::Real(_)
            | Expr::Str(_)
            | Expr::Object(_) => Ok(expr.clone()),

            Expr::Array(items) => {
                let values = self.eval_all(items)?;
                Ok(Expr::Array(values))
            }

            Expr::Eq(ops) => self.binary(ops, |a, b| operators::eq(a, b).map(Expr::Bool)),
            Expr::Ne(ops) => self.binary(ops, |a, b| operators::ne(a, b).map(Expr::Bool)),
            Expr::StrictEq(ops) => {
                self.binary(ops, |a, b| Ok(Expr::Bool(operators::strict_eq(a, b))))
            }
            Expr::StrictNe(ops) => {
                self.binary(ops, |a, b| Ok(Expr::Bool(operators::strict_ne(a, b))))
            }

            Expr::Lt(ops) => self.chained_relational(ops, operators::lt),
            Expr::Gt(ops) => self.chained_relational(ops, operators::gt),
            Expr::Le(ops) => self.chained_relational(ops, operators::le),
            Expr::Ge(ops) => self.chained_relational(ops, operators::ge),

            Expr::Not(ops) => {
                let a = self.eval(&ops[0])?;
                Ok(Expr::Bool(operators::not(&a)))
            }
            Expr::NotNot(ops) => {
                let a = self.eval(&ops[0])?;
                Ok(Expr::Bool(operators::not_not(&a)))
            }

            Expr::And(ops) => self.short_circuit_logical(ops, true),
            Expr::Or(ops) => self.short_circuit_logical(ops, false),

            Expr::If(ops) => self.eval_if(ops),

            Expr::Add(ops) => {
                let vals = self.eval_all(ops)?;
                operators::add(&vals)
            }
            Expr::Mul(ops) => {
                let vals = self.eval_all(ops)?;
                operators::mul(&vals)
            }
            Expr::Min(ops) => {
                let vals = self.eval_all(ops)?;
                operators::min(&vals)
            }
            Expr::Max(ops) => {
                let vals = self.eval_all(ops)?;
                operators::max(&vals)
            }
            Expr::Sub(ops) => {
                let vals = self.eval_all(ops)?;
                operators::sub(&vals)
            }
            Expr::Div(ops) => self.binary(ops, operators::div),
            Expr::Mod(ops) => self.binary(ops, operators::modulo),

            Expr::Merge(ops) => {
                let vals = self.eval_all(ops)?;
                operators::merge(&vals)
            }
            Expr::Cat(ops) => {
                let vals = self.eval_all(ops)?;
                operators::cat(&vals)
            }
            Expr::Substr(ops) => {
                let vals = self.eval_all(ops)?;
                operators::substr(&vals)
            }
            Expr::In(ops) => self.binary(ops, |a, b| operators::in_op(a, b).map(Expr::Bool)),

            Expr::Map(ops) => self.eval_map(ops),
            Expr::Filter(ops) => self.eval_filter(ops),
            Expr::Reduce(ops) => self.eval_reduce(ops),
            Expr::All(ops) => self.eval_quantified(ops, Quantifier::All),
            Expr::None_(ops) => self.eval_quantified(ops, Quantifier::None),
            Expr::Some_(ops) => self.eval_quantified(ops, Quantifier::Some),

            Expr::Var(ops, idx) => self.eval_var(ops, *idx),
            Expr::Missing(ops) => self.eval_missing(ops),
            Expr::MissingSome(ops) => self.eval_missing_some(ops),

            Expr::Log(ops) => {
                let v = self.eval(&ops[0])?;
                self.sink.log(&v.to_string());
                Ok(v)
            }
            Expr::Regex(ops) => {
                self.binary(ops, |a, b| operators::regex_match(a, b).map(Expr::Bool))
            }
        }
    }

    fn eval_all(&mut self, ops: &[Expr]) -> Result<Vec<Expr>> {
        ops.iter().map(|e| self.eval(e)).collect()
    }

    fn binary(
        &mut self,
        ops: &[Expr],
        f: impl FnOnce(&Expr, &Expr) -> Result<Expr>,
    ) -> Result<Expr> {
        let a = self.eval(&ops[0])?;
        let b = self.eval(&ops[1])?;
        f(&a, &b)
    }

    /// 2-argument form is a single pairwise comparison; the 3-argument
    /// form is a chained range check, evaluating the middle operand
    /// exactly once and short-circuiting on the first failing pair.
    fn chained_relational(
        &mut self,
        ops: &[Expr],
        pred: impl Fn(&Expr, &Expr) -> Result<bool>,
    ) -> Result<Expr> {
        match ops {
            [a, b] => {
                let a = self.eval(a)?;
                let b = self.eval(b)?;
                Ok(Expr::Bool(pred(&a, &b)?))
            }
            [a, b, c] => {
                let a = self.eval(a)?;
                let b = self.eval(b)?;
                if !pred(&a, &b)? {
                    return Ok(Expr::Bool(false));
                }
                let c = self.eval(c)?;
                Ok(Expr::Bool(pred(&b, &c)?))
            }
            _ => Err(JsonLogicError::logic_error(
                "relational operator expects 2 or 3 operands",
            )),
        }
    }

    /// Shared core of `And`/`Or`: returns the first operand whose
    /// truthiness is the stopping value, or the last operand otherwise.
    /// The returned value is the operand itself, never a coerced bool.
    fn short_circuit_logical(&mut self, ops: &[Expr], stop_on_falsy: bool) -> Result<Expr> {
        let mut result = Expr::Null;
        for (i, op) in ops.iter().enumerate() {
            result = self.eval(op)?;
            let stop = result.truthy() != stop_on_falsy;
            if stop || i == ops.len() - 1 {
                return Ok(result);
            }
        }
        Ok(result)
    }

    /// Pairs `(cond, then)...` with an optional trailing else; zero
    /// operands is `Null`.
    fn eval_if(&mut self, ops: &[Expr]) -> Result<Expr> {
        let mut i = 0;
        while i + 1 < ops.len() {
            let cond = self.eval(&ops[i])?;
            if cond.truthy() {
                return self.eval(&ops[i + 1]);
            }
            i += 2;
        }
        match ops.get(i) {
            Some(else_branch) => self.eval(else_branch),
            None => Ok(Expr::Null),
        }
    }

    fn eval_map(&mut self, ops: &[Expr]) -> Result<Expr> {
        let source = self.eval(&ops[0])?;
        let items = as_array("map", &source)?;
        let mut out = Vec::with_capacity(items.len());
        for item in items {
            let mut sub = ElementAccessor::new(item);
            let mut sub_eval = Evaluator::new(&mut sub, &mut *self.sink);
            out.push(sub_eval.eval(&ops[1])?);
        }
        Ok(Expr::Array(out))
    }

    fn eval_filter(&mut self, ops: &[Expr]) -> Result<Expr> {
        let source = self.eval(&ops[0])?;
        let items = as_array("filter", &source)?;
        let mut out = Vec::new();
        for item in items {
            let mut sub = ElementAccessor::new(item.clone());
            let mut sub_eval = Evaluator::new(&mut sub, &mut *self.sink);
            if sub_eval.eval(&ops[1])?.truthy() {
                out.push(item);
            }
        }
        Ok(Expr::Array(out))
    }

    fn eval_reduce(&mut self, ops: &[Expr]) -> Result<Expr> {
        let source = self.eval(&ops[0])?;
        let items = as_array("reduce", &source)?;
        let mut acc = self.eval(&ops[2])?;
        if items.is_empty() {
            return Ok(acc);
        }
        for item in items {
            let result = {
                let mut sub = ReduceAccessor {
                    current: item,
                    accumulator: acc,
                    outer: &mut *self.accessor,
                };
                let mut sub_eval = Evaluator::new(&mut sub, &mut *self.sink);
                sub_eval.eval(&ops[1])?
            };
            acc = result;
        }
        Ok(acc)
    }

    fn eval_quantified(&mut self, ops: &[Expr], q: Quantifier) -> Result<Expr> {
        let source = self.eval(&ops[0])?;
        let items = as_array(q.op_name(), &source)?;
        if items.is_empty() {
            return Ok(Expr::Bool(q.empty_result()));
        }
        for item in items {
            let mut sub = ElementAccessor::new(item);
            let mut sub_eval = Evaluator::new(&mut sub, &mut *self.sink);
            let truthy = sub_eval.eval(&ops[1])?.truthy();
            if let Some(short_circuit) = q.decision(truthy) {
                return Ok(Expr::Bool(short_circuit));
            }
        }
        // No early decision: every element passed through without
        // triggering a stop, which resolves the same way as the
        // empty-array case (`All`/`None` => true, `Some` => false).
        Ok(Expr::Bool(q.empty_result()))
    }

    fn eval_var(&mut self, ops: &[Expr], idx: i64) -> Result<Expr> {
        let path = self.eval(&ops[0])?;
        match self.accessor.resolve(&path, idx) {
            Some(v) => Ok(v),
            None => match ops.get(1) {
                Some(default) => self.eval(default),
                None => Ok(Expr::Null),
            },
        }
    }

    fn eval_missing(&mut self, ops: &[Expr]) -> Result<Expr> {
        let paths = self.missing_path_list(ops)?;
        let mut missing = Vec::new();
        for path in paths {
            if self.accessor.resolve(&path, COMPUTED).is_none() {
                missing.push(path);
            }
        }
        Ok(Expr::Array(missing))
    }

    fn eval_missing_some(&mut self, ops: &[Expr]) -> Result<Expr> {
        let min_val = self.eval(&ops[0])?;
        let min = to_numeric_for_compare("missing_some", &min_val)?.as_f64() as i64;
        let paths_val = self.eval(&ops[1])?;
        let paths = match paths_val {
            Expr::Array(items) => items,
            other => vec![other],
        };
        let mut missing = Vec::new();
        let mut found: i64 = 0;
        for path in &paths {
            if self.accessor.resolve(path, COMPUTED).is_some() {
                found += 1;
            } else {
                missing.push(path.clone());
            }
        }
        if found >= min {
            Ok(Expr::Array(Vec::new()))
        } else {
            Ok(Expr::Array(missing))
        }
    }

    /// `Missing`'s operand list is either many path operands, or a
    /// single operand that is itself an array of paths.
    fn missing_path_list(&mut self, ops: &[Expr]) -> Result<Vec<Expr>> {
        if let [single] = ops {
            let v = self.eval(single)?;
            if let Expr::Array(items) = v {
                return Ok(items);
            }
            return Ok(vec![v]);
        }
        self.eval_all(ops)
    }
}

#[derive(Clone, Copy)]
enum Quantifier {
    All,
    None,
    Some,
}

impl Quantifier {
    fn op_name(self) -> &'static str {
        match self {
            Quantifier::All => "all",
            Quantifier::None => "none",
            Quantifier::Some => "some",
        }
    }

    fn empty_result(self) -> bool {
        match self {
            Quantifier::All | Quantifier::None => true,
            Quantifier::Some => false,
        }
    }

    /// Returns `Some(result)` the moment `truthy` decides the outcome,
    /// or `None` to keep scanning.
    fn decision(self, truthy: bool) -> Option<bool> {
        match self {
            Quantifier::All if !truthy => Some(false),
            Quantifier::None if truthy => Some(false),
            Quantifier::Some if truthy => Some(true),
            _ => None,
        }
    }
}

fn as_array(op: &'static str, v: &Expr) -> Result<Vec<Expr>> {
    match v {
        Expr::Array(items) => Ok(items.clone()),
        Expr::Null => Ok(Vec::new()),
        _ => Err(JsonLogicError::type_error(
            op,
            format!("expected an array source, found {:?}", v.kind()),
        )),
    }
}

/// The sub-evaluator accessor for `Map`/`Filter`/`All`/`None`/`Some`:
/// empty path resolves to the current element; any other path looks up
/// a member of the current element (if it's an object/array); the outer
/// accessor is never consulted.
struct ElementAccessor {
    element: Expr,
}

impl ElementAccessor {
    fn new(element: Expr) -> Self {
        ElementAccessor { element }
    }
}

impl Accessor for ElementAccessor {
    fn resolve(&mut self, path: &Expr, _idx: i64) -> Option<Expr> {
        match path {
            Expr::Str(s) if s.is_empty() => Some(self.element.clone()),
            _ => lookup_path(&self.element, path),
        }
    }
}

/// The sub-evaluator accessor for `Reduce`: `"current"`/`"accumulator"`
/// resolve to the bound values; empty path delegates to the outer
/// accessor (there is no single "current element" the way there is for
/// the other combinators); any other path looks up a member of the
/// current element.
struct ReduceAccessor<'a> {
    current: Expr,
    accumulator: Expr,
    outer: &'a mut dyn Accessor,
}

impl<'a> Accessor for ReduceAccessor<'a> {
    fn resolve(&mut self, path: &Expr, idx: i64) -> Option<Expr> {
        match path {
            Expr::Str(s) if s.is_empty() => self.outer.resolve(path, idx),
            Expr::Str(s) if s == "current" => Some(self.current.clone()),
            Expr::Str(s) if s == "accumulator" => Some(self.accumulator.clone()),
            _ => lookup_path(&self.current, path),
        }
    }
}
