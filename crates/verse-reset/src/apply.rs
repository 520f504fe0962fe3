//! `apply_reset` (§4.3).

use verse_core::{Interval, ModeTuple, ModeValue, Rect, Region};
use verse_guard::{evaluate_reset_values, Env, Value};
use verse_ir::{ControllerIr, ModePath};

use crate::error::{ResetError, ResetResult};
use crate::outcome::ResetOutcome;

/// Group of candidate values for one declared mode category, in the order
/// contributing reset paths were first seen (§5 "first-appearance order").
struct ModeCandidates {
    category_index: usize,
    values: Vec<ModeValue>,
}

/// Apply every reset in `fired` (mode paths whose guard was satisfied) to
/// `agent`, against the bindings in `env` and the agent's `current_mode` /
/// `current_region`.
///
/// `fired` may combine resets from more than one satisfied path; within a
/// target variable, every path's `val` is evaluated and contributes
/// candidate values (§4.3 "for each discrete target ... keep it").
pub fn apply_reset(
    controller: &ControllerIr,
    fired: &[&ModePath],
    env: &Env,
    current_mode: &ModeTuple,
    current_region: &Region,
) -> ResetResult<ResetOutcome> {
    let mut mode_candidates: Vec<Option<ModeCandidates>> = controller.mode_defs.iter().map(|_| None).collect();
    let mut cont_dims: Vec<Option<Interval>> = vec![None; controller.state_defs.num_continuous()];

    for path in fired {
        if let Some(idx) = controller
            .mode_defs
            .iter()
            .position(|c| c.name == path.var)
        {
            let values = evaluate_reset_values(&path.val, env)?;
            let modes: Vec<ModeValue> = values
                .into_iter()
                .map(|v| match v {
                    Value::Mode(m) => Ok(m),
                    other => Err(ResetError::UnknownTargetVariable(format!(
                        "{}: reset produced non-mode value {other:?}",
                        path.var
                    ))),
                })
                .collect::<ResetResult<_>>()?;
            match &mut mode_candidates[idx] {
                Some(existing) => existing.values.extend(modes),
                None => {
                    mode_candidates[idx] = Some(ModeCandidates {
                        category_index: idx,
                        values: modes,
                    })
                }
            }
        } else if let Some(dim) = controller
            .state_defs
            .continuous_fields
            .iter()
            .position(|f| f == &path.var)
        {
            let mut values = evaluate_reset_values(&path.val, env)?;
            if values.len() != 1 {
                return Err(ResetError::NondeterministicContinuousReset { var: path.var.clone() });
            }
            let v = values.remove(0);
            let iv = v.as_interval().ok_or_else(|| {
                ResetError::UnknownTargetVariable(format!("{}: continuous reset produced {v:?}", path.var))
            })?;
            cont_dims[dim] = match cont_dims[dim] {
                Some(existing) => Some(existing.union(iv)),
                None => Some(iv),
            };
        } else {
            return Err(ResetError::UnknownTargetVariable(path.var.clone()));
        }
    }

    // Build the successor rect: reset dims hold the evaluated interval,
    // untouched dims inherit the agent's current region (§4.3).
    let current_rect = current_region.as_rect();
    let successor_rect = Rect::new(
        cont_dims
            .into_iter()
            .enumerate()
            .map(|(i, reset)| reset.unwrap_or(current_rect.0[i]))
            .collect(),
    );
    let successor_region = if current_region.is_point() && successor_rect.is_point() {
        Region::Point(successor_rect.as_point())
    } else {
        Region::Rect(successor_rect)
    };

    // Cartesian product across mode categories: untouched categories
    // contribute a singleton list (their current value), so every category
    // is represented in every emitted tuple (§3 invariant iv).
    let per_category: Vec<Vec<ModeValue>> = mode_candidates
        .into_iter()
        .enumerate()
        .map(|(idx, candidates)| match candidates {
            Some(c) => c.values,
            None => vec![current_mode.0[idx].clone()],
        })
        .collect();

    let dest_modes = cartesian_product(&per_category);
    let no_successor = dest_modes.is_empty() && fired.iter().any(|p| {
        controller.mode_defs.iter().any(|c| c.name == p.var)
    });

    Ok(ResetOutcome {
        dest_modes: dest_modes.into_iter().map(ModeTuple::new).collect(),
        successor_region,
        no_successor,
    })
}

/// Cartesian product of per-category candidate lists (§3 invariant v,
/// §8 "Cartesian completeness"). An empty candidate list for any category
/// makes the whole product empty.
fn cartesian_product(lists: &[Vec<ModeValue>]) -> Vec<Vec<ModeValue>> {
    if lists.iter().any(|l| l.is_empty()) {
        return Vec::new();
    }
    let mut acc: Vec<Vec<ModeValue>> = vec![Vec::new()];
    for list in lists {
        let mut next = Vec::with_capacity(acc.len() * list.len());
        for prefix in &acc {
            for value in list {
                let mut combined = prefix.clone();
                combined.push(value.clone());
                next.push(combined);
            }
        }
        acc = next;
    }
    acc
}
