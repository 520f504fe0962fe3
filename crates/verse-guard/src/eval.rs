//! The expression evaluator and the three guard-evaluation modes (§4.2).
//!
//! All three share one tri-valued core (`eval_tri`): a boolean sub-tree
//! evaluates to `True`, `False`, or `Unknown` (can't be decided from the
//! bindings on hand). Discrete pruning hides every continuous binding, so
//! any comparison touching a continuous field comes back `Unknown`;
//! conservative by construction (§4.2.2 "no false negatives"). Hybrid
//! pruning and continuous containment bind real intervals, so `Unknown`
//! only remains where the box straddles the guard boundary.

use verse_core::Interval;
use verse_ir::{BinOp, BoolOp, Expr, QuantKind};

use crate::env::Env;
use crate::error::{GuardError, GuardResult};
use crate::functions::call_fn;
use crate::updater::unrolled_name;
use crate::value::Value;

/// Three-valued evaluation result for a boolean (sub-)expression.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Tri {
    True,
    False,
    Unknown,
}

impl Tri {
    fn not(self) -> Tri {
        match self {
            Tri::True => Tri::False,
            Tri::False => Tri::True,
            Tri::Unknown => Tri::Unknown,
        }
    }

    fn and(items: impl Iterator<Item = Tri>) -> Tri {
        let mut saw_unknown = false;
        for t in items {
            match t {
                Tri::False => return Tri::False,
                Tri::Unknown => saw_unknown = true,
                Tri::True => {}
            }
        }
        if saw_unknown {
            Tri::Unknown
        } else {
            Tri::True
        }
    }

    fn or(items: impl Iterator<Item = Tri>) -> Tri {
        let mut saw_unknown = false;
        for t in items {
            match t {
                Tri::True => return Tri::True,
                Tri::Unknown => saw_unknown = true,
                Tri::False => {}
            }
        }
        if saw_unknown {
            Tri::Unknown
        } else {
            Tri::False
        }
    }
}

/// Replace every `{bound}.<field>` variable reference in `expr` with the
/// indexed name `others.<field>[idx]` (§9 "binding time substitutes lists
/// into indexed slots").
fn substitute_bound(expr: &Expr, bound: &str, idx: usize) -> Expr {
    let prefix = format!("{bound}.");
    match expr {
        Expr::Var(name) => match name.strip_prefix(&prefix) {
            Some(field) => Expr::Var(unrolled_name(field, idx)),
            None => expr.clone(),
        },
        Expr::Unary(op, e) => Expr::Unary(*op, Box::new(substitute_bound(e, bound, idx))),
        Expr::Binary(op, l, r) => Expr::Binary(
            *op,
            Box::new(substitute_bound(l, bound, idx)),
            Box::new(substitute_bound(r, bound, idx)),
        ),
        Expr::Bool(op, operands) => Expr::Bool(
            *op,
            operands.iter().map(|o| substitute_bound(o, bound, idx)).collect(),
        ),
        Expr::Quantifier { kind, bound: inner_bound, body } => Expr::Quantifier {
            kind: *kind,
            bound: inner_bound.clone(),
            body: Box::new(substitute_bound(body, bound, idx)),
        },
        Expr::Call(name, args) => Expr::Call(
            name.clone(),
            args.iter().map(|a| substitute_bound(a, bound, idx)).collect(),
        ),
        Expr::List(items) => {
            Expr::List(items.iter().map(|i| substitute_bound(i, bound, idx)).collect())
        }
        Expr::Lit(_) | Expr::ModeLit(_) | Expr::BoolLit(_) => expr.clone(),
    }
}

/// Evaluate `expr` as a value (literal, variable, arithmetic, or function
/// call). Returns `Ok(None)` for an unresolved variable rather than an
/// error — discrete pruning relies on that to treat continuous comparisons
/// as `Unknown` instead of failing outright.
fn eval_value(expr: &Expr, env: &Env) -> GuardResult<Option<Value>> {
    match expr {
        Expr::Lit(v) => Ok(Some(Value::Scalar(*v))),
        Expr::ModeLit(m) => Ok(Some(Value::Mode(m.as_str().into()))),
        Expr::BoolLit(b) => Ok(Some(Value::Bool(*b))),
        Expr::Var(name) => Ok(env.get(name).cloned()),
        Expr::Unary(_, inner) => {
            let Some(v) = eval_value(inner, env)? else { return Ok(None) };
            let iv = v.as_interval().ok_or_else(|| GuardError::TypeMismatch {
                context: "unary -".to_string(),
            })?;
            Ok(Some(Value::from_interval(-iv)))
        }
        Expr::Binary(op, lhs, rhs) if is_arithmetic(*op) => {
            let (Some(l), Some(r)) = (eval_value(lhs, env)?, eval_value(rhs, env)?) else {
                return Ok(None);
            };
            let a = l.as_interval().ok_or_else(|| GuardError::TypeMismatch {
                context: op.to_string(),
            })?;
            let b = r.as_interval().ok_or_else(|| GuardError::TypeMismatch {
                context: op.to_string(),
            })?;
            let result = match op {
                BinOp::Add => a + b,
                BinOp::Sub => a - b,
                BinOp::Mul => a * b,
                BinOp::Div => a / b,
                _ => unreachable!("is_arithmetic() guards this match"),
            };
            Ok(Some(Value::from_interval(result)))
        }
        Expr::Call(name, args) => {
            let mut values = Vec::with_capacity(args.len());
            for a in args {
                match eval_value(a, env)? {
                    Some(v) => values.push(v),
                    None => return Ok(None),
                }
            }
            Ok(Some(call_fn(name, &values)?))
        }
        Expr::Binary(..) | Expr::Bool(..) | Expr::Quantifier { .. } | Expr::List(_) => {
            Err(GuardError::TypeMismatch {
                context: "boolean or list expression used in scalar value position".to_string(),
            })
        }
    }
}

fn is_arithmetic(op: BinOp) -> bool {
    matches!(op, BinOp::Add | BinOp::Sub | BinOp::Mul | BinOp::Div)
}

/// Compare two intervals under `op`, returning `Unknown` only where the
/// boxes overlap in a way that makes the comparison's truth depend on which
/// concrete point is chosen.
fn compare_intervals(op: BinOp, a: Interval, b: Interval) -> Tri {
    match op {
        BinOp::Lt => {
            if a.high < b.low {
                Tri::True
            } else if a.low >= b.high {
                Tri::False
            } else {
                Tri::Unknown
            }
        }
        BinOp::Le => {
            if a.high <= b.low {
                Tri::True
            } else if a.low > b.high {
                Tri::False
            } else {
                Tri::Unknown
            }
        }
        BinOp::Gt => compare_intervals(BinOp::Lt, b, a),
        BinOp::Ge => compare_intervals(BinOp::Le, b, a),
        BinOp::Eq => {
            if a.is_degenerate() && b.is_degenerate() && a.low == b.low {
                Tri::True
            } else if !a.overlaps(b) {
                Tri::False
            } else {
                Tri::Unknown
            }
        }
        BinOp::Ne => compare_intervals(BinOp::Eq, a, b).not(),
        BinOp::Add | BinOp::Sub | BinOp::Mul | BinOp::Div => {
            unreachable!("arithmetic ops never reach compare_intervals")
        }
    }
}

/// The tri-valued core shared by discrete pruning, hybrid pruning, and
/// continuous containment.
fn eval_tri(expr: &Expr, env: &Env) -> GuardResult<Tri> {
    match expr {
        Expr::Binary(op, lhs, rhs) if !is_arithmetic(*op) => {
            let lv = eval_value(lhs, env)?;
            let rv = eval_value(rhs, env)?;
            match (lv, rv) {
                (Some(Value::Mode(a)), Some(Value::Mode(b))) => {
                    let eq = a == b;
                    Ok(match op {
                        BinOp::Eq => bool_tri(eq),
                        BinOp::Ne => bool_tri(!eq),
                        _ => Tri::Unknown,
                    })
                }
                (Some(l), Some(r)) => {
                    let (Some(a), Some(b)) = (l.as_interval(), r.as_interval()) else {
                        return Ok(Tri::Unknown);
                    };
                    Ok(compare_intervals(*op, a, b))
                }
                _ => Ok(Tri::Unknown),
            }
        }
        Expr::Bool(BoolOp::Not, operands) => {
            let [inner] = operands.as_slice() else {
                return Err(GuardError::TypeMismatch {
                    context: "not takes exactly one operand".to_string(),
                });
            };
            Ok(eval_tri(inner, env)?.not())
        }
        Expr::Bool(BoolOp::And, operands) => {
            let mut results = Vec::with_capacity(operands.len());
            for o in operands {
                results.push(eval_tri(o, env)?);
            }
            Ok(Tri::and(results.into_iter()))
        }
        Expr::Bool(BoolOp::Or, operands) => {
            let mut results = Vec::with_capacity(operands.len());
            for o in operands {
                results.push(eval_tri(o, env)?);
            }
            Ok(Tri::or(results.into_iter()))
        }
        Expr::Quantifier { kind, bound, body } => {
            let mut vars = Vec::new();
            body.referenced_vars(&mut vars);
            let prefix = format!("{bound}.");
            let field = vars.iter().find_map(|v| v.strip_prefix(&prefix));
            let Some(field) = field else {
                return Ok(Tri::Unknown);
            };
            let len = env.others_len(field).unwrap_or(0);
            let mut results = Vec::with_capacity(len);
            for idx in 0..len {
                let substituted = substitute_bound(body, bound, idx);
                results.push(eval_tri(&substituted, env)?);
            }
            Ok(match kind {
                QuantKind::ForAll => Tri::and(results.into_iter()),
                QuantKind::Exists => Tri::or(results.into_iter()),
            })
        }
        Expr::BoolLit(b) => Ok(bool_tri(*b)),
        Expr::Var(name) => match env.get(name) {
            Some(Value::Bool(b)) => Ok(bool_tri(*b)),
            Some(_) => Err(GuardError::TypeMismatch {
                context: format!("variable {name:?} used as a boolean"),
            }),
            None => Ok(Tri::Unknown),
        },
        _ => Err(GuardError::TypeMismatch {
            context: "non-boolean expression used as a guard".to_string(),
        }),
    }
}

fn bool_tri(b: bool) -> Tri {
    if b {
        Tri::True
    } else {
        Tri::False
    }
}

/// Conjoin a path's top-level predicate list (§4.2 "multiple top-level
/// predicates are conjoined").
fn conjoin(guards: &[Expr]) -> GuardResult<Expr> {
    if guards.is_empty() {
        return Err(GuardError::EmptyGuardList);
    }
    if guards.len() == 1 {
        return Ok(guards[0].clone());
    }
    Ok(Expr::and(guards.to_vec()))
}

/// Evaluate a value (non-boolean) expression to a single `Value`, e.g. a
/// continuous reset's right-hand side. Exposed for `verse-reset`, which
/// evaluates `ModePath::val` expressions but never builds its own AST
/// walker.
pub fn evaluate_value(expr: &Expr, env: &Env) -> GuardResult<Value> {
    eval_value(expr, env)?.ok_or_else(|| GuardError::UnboundVariable(format!("{expr:?}")))
}

/// Evaluate a reset value that may legally be a [`Expr::List`] (§4.3): a
/// single resulting value comes back as a one-element vec, a list literal
/// evaluates each element independently.
pub fn evaluate_reset_values(expr: &Expr, env: &Env) -> GuardResult<Vec<Value>> {
    match expr {
        Expr::List(items) => items.iter().map(|i| evaluate_value(i, env)).collect(),
        other => Ok(vec![evaluate_value(other, env)?]),
    }
}

/// (2) Discrete pruning: `false` iff the guard is provably unsatisfiable
/// from discrete bindings alone (§4.2.2).
pub fn evaluate_guard_disc(guards: &[Expr], disc_env: &Env) -> GuardResult<bool> {
    let guard = conjoin(guards)?;
    Ok(eval_tri(&guard, disc_env)? != Tri::False)
}

/// (3) Hybrid pruning: `false` iff the guard cannot be satisfied for any
/// concrete point in the box (§4.2.3).
pub fn evaluate_guard_hybrid(guards: &[Expr], env: &Env) -> GuardResult<bool> {
    let guard = conjoin(guards)?;
    Ok(eval_tri(&guard, env)? != Tri::False)
}

/// (4) Continuous containment: `hit` if the box intersects the guard
/// region, `contained` if the box is entirely inside it (§4.2.4).
pub fn evaluate_guard_cont(guards: &[Expr], env: &Env) -> GuardResult<(bool, bool)> {
    let guard = conjoin(guards)?;
    let tri = eval_tri(&guard, env)?;
    Ok((tri != Tri::False, tri == Tri::True))
}

/// (5) Point evaluation: every variable must resolve to a definite value —
/// used in simulation, where there is no "unknown" (§4.2.5).
pub fn evaluate_point(guards: &[Expr], env: &Env) -> GuardResult<bool> {
    let guard = conjoin(guards)?;
    match eval_tri(&guard, env)? {
        Tri::True => Ok(true),
        Tri::False => Ok(false),
        Tri::Unknown => Err(GuardError::UnboundVariable(format!("{guard:?}"))),
    }
}
