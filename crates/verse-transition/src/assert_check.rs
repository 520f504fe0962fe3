//! Assert evaluation (§4.4 step 2, §4.5 analogue, §7 "Assert violations").

use verse_core::AgentId;
use verse_guard::{evaluate_guard_hybrid, evaluate_point, Env};
use verse_ir::Assert;

use crate::error::{TransitionError, TransitionResult};

/// One fired assert: the agent it belongs to, and its label (or a
/// positional fallback, §3 "`label_or_index`").
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AssertHit {
    pub agent: AgentId,
    pub label: String,
}

/// Point-evaluate `agent_id`'s asserts in declared order against `env`;
/// returns the first one that fires (§4.4 step 2 "skip transition scanning
/// for that agent" — one hit per agent per step is all the caller needs).
pub fn check_asserts_point(
    agent_id: &AgentId,
    asserts: &[Assert],
    env: &Env,
) -> TransitionResult<Option<AssertHit>> {
    for (i, assert) in asserts.iter().enumerate() {
        let pre_holds = if assert.pre.is_empty() {
            true
        } else {
            evaluate_point(&assert.pre, env).map_err(|source| TransitionError::Guard {
                agent: agent_id.clone(),
                var: format!("<assert {i}> pre"),
                source,
            })?
        };
        if !pre_holds {
            continue;
        }
        let cond_holds = evaluate_point(std::slice::from_ref(&assert.cond), env).map_err(|source| {
            TransitionError::Guard {
                agent: agent_id.clone(),
                var: format!("<assert {i}> cond"),
                source,
            }
        })?;
        if !cond_holds {
            return Ok(Some(AssertHit {
                agent: agent_id.clone(),
                label: assert.label_or_index(i),
            }));
        }
    }
    Ok(None)
}

/// Interval analogue: an assert "fires" conservatively — the precondition
/// must be possibly true (hybrid pruning doesn't rule it out) and the
/// condition must be possibly false somewhere in the box (§7 "verification
/// treats assert violations the same way with an interval-valid
/// precondition as fired").
pub fn check_asserts_interval(
    agent_id: &AgentId,
    asserts: &[Assert],
    env: &Env,
) -> TransitionResult<Option<AssertHit>> {
    for (i, assert) in asserts.iter().enumerate() {
        let pre_holds = if assert.pre.is_empty() {
            true
        } else {
            evaluate_guard_hybrid(&assert.pre, env).map_err(|source| TransitionError::Guard {
                agent: agent_id.clone(),
                var: format!("<assert {i}> pre"),
                source,
            })?
        };
        if !pre_holds {
            continue;
        }
        let negated = verse_ir::Expr::not(assert.cond.clone());
        let cond_can_fail = evaluate_guard_hybrid(std::slice::from_ref(&negated), env).map_err(|source| {
            TransitionError::Guard {
                agent: agent_id.clone(),
                var: format!("<assert {i}> cond"),
                source,
            }
        })?;
        if cond_can_fail {
            return Ok(Some(AssertHit {
                agent: agent_id.clone(),
                label: assert.label_or_index(i),
            }));
        }
    }
    Ok(None)
}
