//! Controller diffing (§4.6 "Controller diffing").
//!
//! Paths are paired by output variable, in declared order — the Open
//! Question of §9 ("the source does not resolve what happens when the new
//! controller reorders paths with the same `cond`") is resolved here by
//! preserving strict positional pairing within each variable's group and
//! documenting the limitation rather than guessing at reordering intent.

use std::collections::BTreeSet;

use verse_core::AgentId;
use verse_ir::{Agent, ControllerIr, Expr, ModePath};

use crate::caches::SimTraceCache;
use crate::error::{CacheError, CacheResult};
use crate::segment::CachedSegment;

/// A path that must be (re-)explored by the driver: either newly declared,
/// or an existing variable whose guard condition changed (§4.6 "added
/// path").
#[derive(Clone, Debug, PartialEq)]
pub struct AddedPath {
    pub agent: AgentId,
    pub var: String,
    pub cond: Expr,
    pub val: Expr,
}

/// Diff every agent present in both `old_agents` and `new_agents` and patch
/// `cache` in place: removed paths drop the matching `ModePath` from every
/// cached segment's stored controller, reset-changed paths patch its `val`,
/// and added paths are returned for the driver to schedule (§4.6).
///
/// A brand-new agent (absent from `old_agents`) has nothing cached yet and
/// is skipped — its paths are explored fresh, not reported as "added".
pub fn to_simulate(old_agents: &[Agent], new_agents: &[Agent], cache: &mut SimTraceCache) -> CacheResult<Vec<AddedPath>> {
    let mut added = Vec::new();

    for new_agent in new_agents {
        let Some(old_agent) = old_agents.iter().find(|a| a.id == new_agent.id) else {
            continue;
        };

        if old_agent.controller.args != new_agent.controller.args {
            return Err(CacheError::ArgSignatureMismatch { agent: new_agent.id.clone() });
        }

        let old_vars: BTreeSet<&str> = old_agent.controller.get_paths().iter().map(|p| p.var.as_str()).collect();
        let new_vars: BTreeSet<&str> = new_agent.controller.get_paths().iter().map(|p| p.var.as_str()).collect();
        if old_vars != new_vars {
            return Err(CacheError::OutputVariableSetMismatch { agent: new_agent.id.clone() });
        }

        for var in new_vars {
            let old_group: Vec<&ModePath> = old_agent.controller.get_paths().iter().filter(|p| p.var == var).collect();
            let new_group: Vec<&ModePath> = new_agent.controller.get_paths().iter().filter(|p| p.var == var).collect();

            for i in 0..old_group.len().max(new_group.len()) {
                match (old_group.get(i), new_group.get(i)) {
                    (Some(old_path), None) => {
                        remove_path(cache, &new_agent.id, old_path);
                    }
                    (None, Some(new_path)) => {
                        added.push(AddedPath {
                            agent: new_agent.id.clone(),
                            var: var.to_string(),
                            cond: new_path.cond.clone(),
                            val: new_path.val.clone(),
                        });
                    }
                    (Some(old_path), Some(new_path)) => {
                        if old_path.cond != new_path.cond {
                            added.push(AddedPath {
                                agent: new_agent.id.clone(),
                                var: var.to_string(),
                                cond: new_path.cond.clone(),
                                val: new_path.val.clone(),
                            });
                        } else if old_path.val != new_path.val {
                            patch_reset_val(cache, &new_agent.id, old_path, &new_path.val);
                        }
                    }
                    (None, None) => unreachable!("loop bound is the longer of the two groups"),
                }
            }
        }
    }

    Ok(added)
}

fn with_paths(old: &ControllerIr, new_paths: Vec<ModePath>) -> ControllerIr {
    ControllerIr::new(old.mode_defs.clone(), old.state_defs.clone(), old.args.clone(), new_paths, old.get_asserts().to_vec())
}

fn remove_path(cache: &mut SimTraceCache, agent: &AgentId, removed: &ModePath) {
    for_each_segment_controller(cache, agent, |controller| {
        let kept: Vec<ModePath> = controller
            .get_paths()
            .iter()
            .filter(|p| !(p.var == removed.var && p.cond == removed.cond))
            .cloned()
            .collect();
        with_paths(controller, kept)
    });
}

fn patch_reset_val(cache: &mut SimTraceCache, agent: &AgentId, matched: &ModePath, new_val: &Expr) {
    for_each_segment_controller(cache, agent, |controller| {
        let patched: Vec<ModePath> = controller
            .get_paths()
            .iter()
            .map(|p| {
                if p.var == matched.var && p.cond == matched.cond {
                    ModePath::new(p.var.clone(), p.cond.clone(), new_val.clone()).with_provenance(p.provenance.clone())
                } else {
                    p.clone()
                }
            })
            .collect();
        with_paths(controller, patched)
    });
}

/// Apply `patch` to the stored controller of every cached segment under
/// `agent`, across every mode's tree.
fn for_each_segment_controller(cache: &mut SimTraceCache, agent: &AgentId, patch: impl Fn(&ControllerIr) -> ControllerIr) {
    let modes: Vec<_> = cache.keys().filter(|(a, _)| a == agent).cloned().collect();
    for (a, mode) in modes {
        if let Some(tree) = cache.tree_mut(&a, &mode) {
            tree.for_each_mut(&mut |segment: &mut CachedSegment<verse_transition::SimTransition>| {
                let patched = patch(&segment.controller);
                segment.controller = std::sync::Arc::new(patched);
            });
        }
    }
}
