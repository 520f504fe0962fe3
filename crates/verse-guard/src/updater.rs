//! Quantifier unrolling (§4.2.1, §9).
//!
//! `∀ o ∈ others. P(o)` / `∃ o ∈ others. P(o)` is never rewritten into the
//! AST. Instead `parse_any_all` walks the guard once to find which
//! `others.<field>` lists the quantifier bodies reference, producing a
//! recipe (`Updater`) for which indexed variables (`others.v[0]`,
//! `others.v[1]`, …) must be bound before evaluation. `apply_updater` does
//! that binding from a concrete sensor template; `eval` substitutes the
//! bound name for the indexed name while walking each quantifier body.

use std::collections::HashMap;

use verse_sensor::{ContBinding, ContTemplate, DiscBinding, DiscBindings};
use verse_ir::Expr;

use crate::env::Env;
use crate::value::Value;

/// Maps a base `others.<field>` name to the `(unrolled name, index)` pairs
/// that must be populated from the sensed list before evaluation.
pub type Updater = HashMap<String, Vec<(String, usize)>>;

/// Unrolled name for the `idx`-th element of `others.<field>`.
pub fn unrolled_name(field: &str, idx: usize) -> String {
    format!("others.{field}[{idx}]")
}

fn walk(expr: &Expr, env: &Env, out: &mut Updater) {
    match expr {
        Expr::Quantifier { bound, body, .. } => {
            let prefix = format!("{bound}.");
            let mut vars = Vec::new();
            body.referenced_vars(&mut vars);
            for v in vars {
                if let Some(field) = v.strip_prefix(&prefix) {
                    if out.contains_key(field) {
                        continue;
                    }
                    let len = env.others_len(field).unwrap_or(0);
                    let entries = (0..len).map(|i| (unrolled_name(field, i), i)).collect();
                    out.insert(field.to_string(), entries);
                }
            }
            walk(body, env, out);
        }
        Expr::Unary(_, e) => walk(e, env, out),
        Expr::Binary(_, l, r) => {
            walk(l, env, out);
            walk(r, env, out);
        }
        Expr::Bool(_, operands) => {
            for o in operands {
                walk(o, env, out);
            }
        }
        Expr::Call(_, args) => {
            for a in args {
                walk(a, env, out);
            }
        }
        Expr::List(items) => {
            for i in items {
                walk(i, env, out);
            }
        }
        Expr::Lit(_) | Expr::ModeLit(_) | Expr::BoolLit(_) | Expr::Var(_) => {}
    }
}

/// `parse_any_all(guard, env) -> updater` (§4.2.1). `env` must already have
/// its `others_len` table populated (`bind::build_env`); quantifier absent
/// ⇒ empty updater.
pub fn parse_any_all(guard: &Expr, env: &Env) -> Updater {
    let mut out = Updater::new();
    walk(guard, env, &mut out);
    out
}

/// Populate `env` with every indexed variable `updater` calls for, pulled
/// from the current `cont`/`disc` sensor template.
pub fn apply_updater(env: &mut Env, updater: &Updater, cont: &ContTemplate, disc: &DiscBindings) {
    for (field, entries) in updater {
        if let Some(ContBinding::Others(values)) = cont.get(&format!("others.{field}")) {
            for (name, idx) in entries {
                if let Some(iv) = values.get(*idx) {
                    env.bind(name.clone(), Value::from_interval(*iv));
                }
            }
        } else if let Some(DiscBinding::Others(values)) = disc.get(&format!("others.{field}")) {
            for (name, idx) in entries {
                if let Some(v) = values.get(*idx) {
                    env.bind(name.clone(), Value::from(v.clone()));
                }
            }
        }
    }
}
