//! The verification transition engine (§4.5).

use std::collections::HashMap;

use verse_core::{AgentId, Destination, HitRange, ModeTuple, Rect, StepIndex};
use verse_guard::{apply_updater, build_env, evaluate_guard_cont, evaluate_guard_hybrid};
use verse_ir::ModePath;
use verse_reset::apply_reset;

use crate::assert_check::check_asserts_interval;
use crate::error::{TransitionError, TransitionResult};
use crate::node::NodeView;
use crate::prepare::{bind_path_env, prepare_paths_pruned};
use crate::sensor::Sensor;
use crate::transition::{VerifyOutcome, VerifyTransition};

/// One step index at which at least one path hit, for one agent, with the
/// indices (into that agent's pruned path list) of every path that hit.
struct StepHit {
    agent_idx: usize,
    idx: usize,
    path_indices: Vec<usize>,
}

/// `get_transition_verify(node) -> transitions` (§4.5), collapsed into one
/// [`VerifyOutcome`] the same way `get_transition_simulate` reports
/// [`crate::transition::SimOutcome`] (§7 "verification treats assert
/// violations the same way with an interval-valid precondition as fired").
pub fn get_transition_verify(node: &NodeView, sensor: &dyn Sensor) -> TransitionResult<VerifyOutcome> {
    let agents = node.agents();
    if agents.is_empty() {
        return Ok(VerifyOutcome::NoTransition);
    }

    // Preparation: discrete pruning once, dropping provably-unsatisfiable
    // paths before any step index is scanned (§4.5 "Preparation").
    let joint0 = node.interval_joint_state(0);
    let mut prepared = Vec::with_capacity(agents.len());
    for agent in agents {
        prepared.push(prepare_paths_pruned(agent, &joint0, sensor)?);
    }

    let mut step_hits: Vec<StepHit> = Vec::new();
    let mut hits_have_started = false;

    'steps: for idx in 0..node.num_verify_steps() {
        let joint = node.interval_joint_state(idx);
        let mut any_hit_this_step = false;
        let mut force_stop = false;

        // Asserts, as in simulation, take precedence absolutely: a possibly
        // violated one preempts whatever hits accumulated up to this step.
        let mut assert_hits = Vec::new();
        let mut sensed = Vec::with_capacity(agents.len());
        for agent in agents {
            let s = sensor.sense(&agent.agent, &joint)?;
            let env = build_env(&s.0, &s.1, &s.2);
            if let Some(hit) = check_asserts_interval(&agent.agent.id, agent.agent.controller.get_asserts(), &env)? {
                assert_hits.push(hit);
            }
            sensed.push(s);
        }
        if !assert_hits.is_empty() {
            return Ok(VerifyOutcome::AssertsFired { hits: assert_hits, at: StepIndex(idx) });
        }

        for (agent_idx, agent) in agents.iter().enumerate() {
            let (cont, disc, length_dict) = &sensed[agent_idx];
            let mut hit_paths = Vec::new();

            for (path_idx, p) in prepared[agent_idx].iter().enumerate() {
                let env = bind_path_env(p, cont, disc, length_dict);
                let maybe_satisfiable =
                    evaluate_guard_hybrid(std::slice::from_ref(&p.path.cond), &env).map_err(|source| {
                        TransitionError::Guard { agent: agent.agent.id.clone(), var: p.path.var.clone(), source }
                    })?;
                if !maybe_satisfiable {
                    continue;
                }
                let (hit, contained) =
                    evaluate_guard_cont(std::slice::from_ref(&p.path.cond), &env).map_err(|source| {
                        TransitionError::Guard { agent: agent.agent.id.clone(), var: p.path.var.clone(), source }
                    })?;
                if hit {
                    hit_paths.push(path_idx);
                    any_hit_this_step = true;
                }
                if contained {
                    force_stop = true;
                }
            }

            if !hit_paths.is_empty() {
                step_hits.push(StepHit { agent_idx, idx, path_indices: hit_paths });
            }
        }

        if hits_have_started && !any_hit_this_step {
            break 'steps;
        }
        hits_have_started |= any_hit_this_step;

        if force_stop {
            break 'steps;
        }
    }

    // Apply resets for every recorded hit, then union successor rects
    // componentwise per (agent, dest mode) (§4.5 step 5).
    let mut grouped: HashMap<(AgentId, Destination), (Rect, HitRange)> = HashMap::new();

    for step_hit in &step_hits {
        let agent = &agents[step_hit.agent_idx];
        let joint = node.interval_joint_state(step_hit.idx);
        let (cont, disc, length_dict) = sensor.sense(&agent.agent, &joint)?;

        let mut reset_env = build_env(&cont, &disc, &length_dict);
        let fired: Vec<&ModePath> = step_hit
            .path_indices
            .iter()
            .map(|&i| {
                let p = &prepared[step_hit.agent_idx][i];
                apply_updater(&mut reset_env, &p.updater, &cont, &disc);
                &p.path
            })
            .collect();

        let current_region = joint
            .get(&agent.agent.id)
            .map(|snap| snap.state.clone())
            .unwrap_or(verse_core::Region::Rect(Rect::new(Vec::new())));

        let outcome = apply_reset(&agent.agent.controller, &fired, &reset_env, &agent.mode, &current_region)
            .map_err(|source| TransitionError::Reset {
                agent: agent.agent.id.clone(),
                var: fired.first().map(|p| p.var.clone()).unwrap_or_default(),
                source,
            })?;

        let rect = outcome.successor_region.as_rect();
        let idx = StepIndex(step_hit.idx);

        if outcome.no_successor {
            accumulate(&mut grouped, agent.agent.id.clone(), Destination::None, &rect, idx);
        }
        for dest in &outcome.dest_modes {
            accumulate(&mut grouped, agent.agent.id.clone(), Destination::Mode(dest.clone()), &rect, idx);
        }
    }

    let mut transitions: Vec<VerifyTransition> = grouped
        .into_iter()
        .map(|((agent_id, dst_mode), (rect, hit_range))| {
            let src_mode = agents
                .iter()
                .find(|a| a.agent.id == agent_id)
                .map(|a| a.mode.clone())
                .unwrap_or_else(|| ModeTuple::new(Vec::new()));
            VerifyTransition { agent_id, src_mode, dst_mode, successor_rect: rect, hit_range }
        })
        .collect();

    // Deterministic output order: by agent id, then destination mode.
    transitions.sort_by(|a, b| {
        a.agent_id
            .as_str()
            .cmp(b.agent_id.as_str())
            .then_with(|| format!("{}", a.dst_mode).cmp(&format!("{}", b.dst_mode)))
    });

    if transitions.is_empty() {
        Ok(VerifyOutcome::NoTransition)
    } else {
        Ok(VerifyOutcome::Transitioned { transitions })
    }
}

fn accumulate(
    grouped: &mut HashMap<(AgentId, Destination), (Rect, HitRange)>,
    agent_id: AgentId,
    dest: Destination,
    rect: &Rect,
    idx: StepIndex,
) {
    grouped
        .entry((agent_id, dest))
        .and_modify(|(existing_rect, range)| {
            *existing_rect = union_rect(existing_rect, rect);
            range.extend(idx);
        })
        .or_insert_with(|| (rect.clone(), HitRange::single(idx)));
}

/// Componentwise union (min of lows, max of highs) — `Rect::union` already
/// implements this.
fn union_rect(a: &Rect, b: &Rect) -> Rect {
    if a.dims() == 0 {
        return b.clone();
    }
    a.union(b)
}
