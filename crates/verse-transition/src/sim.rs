//! The simulation transition engine (§4.4).

use verse_core::{AgentId, Destination, Region, StepIndex};
use verse_guard::{apply_updater, build_env, evaluate_point};
use verse_ir::ModePath;
use verse_reset::apply_reset;
use verse_sensor::{ContTemplate, DiscBindings, LengthDict};

use crate::assert_check::{check_asserts_point, AssertHit};
use crate::error::{TransitionError, TransitionResult};
use crate::node::NodeView;
use crate::prepare::{bind_path_env, prepare_paths, PreparedPath};
use crate::sensor::Sensor;
use crate::transition::{SimOutcome, SimTransition};

type Sensed = (ContTemplate, DiscBindings, LengthDict);

/// `get_transition_simulate(node) -> (asserts_fired?, transitions,
/// break_index)` (§4.4), collapsed into one [`SimOutcome`].
pub fn get_transition_simulate(node: &NodeView, sensor: &dyn Sensor) -> TransitionResult<SimOutcome> {
    let agents = node.agents();
    if agents.is_empty() {
        return Ok(SimOutcome::NoTransition);
    }

    // Preparation: frozen disc bindings + quantifier recipe per path,
    // computed once against step 0 (§4.4 "Preparation").
    let joint0 = node.point_joint_state(0);
    let mut prepared: Vec<Vec<PreparedPath>> = Vec::with_capacity(agents.len());
    for agent in agents {
        prepared.push(prepare_paths(agent, &joint0, sensor)?);
    }

    for idx in 0..node.num_sim_steps() {
        let joint = node.point_joint_state(idx);

        // Step 2: asserts, in insertion order, take precedence absolutely.
        let (sensed, assert_hits) = sense_and_check_asserts(agents, &joint, sensor)?;
        if !assert_hits.is_empty() {
            return Ok(SimOutcome::AssertsFired { hits: assert_hits, at: StepIndex(idx) });
        }

        // Step 3: guard scan, agents in insertion order, paths in declared
        // order, resets grouped per agent.
        let mut transitions = Vec::new();
        for (agent_idx, agent) in agents.iter().enumerate() {
            let (cont, disc, length_dict) = &sensed[agent_idx];
            let mut fired_indices = Vec::new();
            for (path_idx, prepared_path) in prepared[agent_idx].iter().enumerate() {
                let env = bind_path_env(prepared_path, cont, disc, length_dict);
                let satisfied = evaluate_point(std::slice::from_ref(&prepared_path.path.cond), &env).map_err(
                    |source| TransitionError::Guard {
                        agent: agent.agent.id.clone(),
                        var: prepared_path.path.var.clone(),
                        source,
                    },
                )?;
                if satisfied {
                    fired_indices.push(path_idx);
                }
            }
            if fired_indices.is_empty() {
                continue;
            }

            let mut reset_env = build_env(cont, disc, length_dict);
            let fired: Vec<&ModePath> = fired_indices
                .iter()
                .map(|&i| {
                    let p = &prepared[agent_idx][i];
                    apply_updater(&mut reset_env, &p.updater, cont, disc);
                    &p.path
                })
                .collect();

            let current_region = joint
                .get(&agent.agent.id)
                .map(|snap| snap.state.clone())
                .unwrap_or_else(|| Region::Point(Vec::new()));

            let outcome = apply_reset(&agent.agent.controller, &fired, &reset_env, &agent.mode, &current_region)
                .map_err(|source| TransitionError::Reset {
                    agent: agent.agent.id.clone(),
                    var: fired.first().map(|p| p.var.clone()).unwrap_or_default(),
                    source,
                })?;

            let successor_point = outcome.successor_region.as_rect().as_point();
            if outcome.no_successor {
                transitions.push(sim_transition(
                    &agent.agent.id,
                    &agent.mode,
                    Destination::None,
                    successor_point.clone(),
                    idx,
                ));
            }
            for dest in &outcome.dest_modes {
                transitions.push(sim_transition(
                    &agent.agent.id,
                    &agent.mode,
                    Destination::Mode(dest.clone()),
                    successor_point.clone(),
                    idx,
                ));
            }
        }

        if !transitions.is_empty() {
            return Ok(SimOutcome::Transitioned { transitions, at: StepIndex(idx) });
        }
    }

    Ok(SimOutcome::NoTransition)
}

/// Sense every agent and check its asserts against the result. Read-only and
/// independent per agent, so the `parallel` feature fans it out over rayon
/// (mirroring the teacher framework's parallel intent-computation phase);
/// resets still apply sequentially afterward since they mutate a shared
/// reset environment per firing agent.
#[cfg(feature = "parallel")]
fn sense_and_check_asserts(
    agents: &[crate::node::NodeAgent],
    joint: &verse_sensor::JointState,
    sensor: &dyn Sensor,
) -> TransitionResult<(Vec<Sensed>, Vec<AssertHit>)> {
    use rayon::prelude::*;

    let results: Vec<TransitionResult<(Sensed, Option<AssertHit>)>> = agents
        .par_iter()
        .map(|agent| {
            let (cont, disc, length_dict) = sensor.sense(&agent.agent, joint)?;
            let env = build_env(&cont, &disc, &length_dict);
            let hit = check_asserts_point(&agent.agent.id, agent.agent.controller.get_asserts(), &env)?;
            Ok(((cont, disc, length_dict), hit))
        })
        .collect();

    let mut sensed = Vec::with_capacity(agents.len());
    let mut assert_hits = Vec::new();
    for result in results {
        let (s, hit) = result?;
        sensed.push(s);
        if let Some(hit) = hit {
            assert_hits.push(hit);
        }
    }
    Ok((sensed, assert_hits))
}

#[cfg(not(feature = "parallel"))]
fn sense_and_check_asserts(
    agents: &[crate::node::NodeAgent],
    joint: &verse_sensor::JointState,
    sensor: &dyn Sensor,
) -> TransitionResult<(Vec<Sensed>, Vec<AssertHit>)> {
    let mut sensed = Vec::with_capacity(agents.len());
    let mut assert_hits = Vec::new();
    for agent in agents {
        let (cont, disc, length_dict) = sensor.sense(&agent.agent, joint)?;
        let env = build_env(&cont, &disc, &length_dict);
        if let Some(hit) = check_asserts_point(&agent.agent.id, agent.agent.controller.get_asserts(), &env)? {
            assert_hits.push(hit);
        }
        sensed.push((cont, disc, length_dict));
    }
    Ok((sensed, assert_hits))
}

fn sim_transition(
    agent_id: &AgentId,
    src_mode: &verse_core::ModeTuple,
    dst_mode: Destination,
    successor_point: Vec<f64>,
    idx: usize,
) -> SimTransition {
    SimTransition {
        agent_id: agent_id.clone(),
        src_mode: src_mode.clone(),
        dst_mode,
        successor_point,
        hit_index: StepIndex(idx),
    }
}
