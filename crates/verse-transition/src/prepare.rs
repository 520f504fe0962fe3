//! Per-path preparation shared by both transition engines (§4.4, §4.5
//! "Preparation").
//!
//! The discrete/mode bindings a path's quantifier unroll recipe depends on
//! are frozen at step 0 — they cannot change mid-node without a transition
//! that would terminate the node first — so `parse_any_all` runs once per
//! path here rather than being recomputed every step index.

use verse_guard::{build_env, parse_any_all, Env, Updater};
use verse_ir::ModePath;

use crate::error::{TransitionError, TransitionResult};
use crate::node::NodeAgent;
use crate::sensor::Sensor;

/// One guarded path together with its frozen quantifier-unroll recipe.
pub struct PreparedPath {
    pub path: ModePath,
    pub updater: Updater,
}

/// Build the frozen per-path preparation for `agent` against `joint0`, the
/// joint state at step index 0 of the node.
pub fn prepare_paths(
    agent: &NodeAgent,
    joint0: &verse_sensor::JointState,
    sensor: &dyn Sensor,
) -> TransitionResult<Vec<PreparedPath>> {
    let (cont0, disc0, length_dict) = sensor.sense(&agent.agent, joint0)?;
    let env0 = build_env(&cont0, &disc0, &length_dict);

    Ok(agent
        .agent
        .controller
        .get_paths()
        .iter()
        .map(|path| PreparedPath {
            path: path.clone(),
            updater: parse_any_all(&path.cond, &env0),
        })
        .collect())
}

/// Like [`prepare_paths`], but drops every path that discrete pruning
/// (§4.2.2) proves can never fire — used once by the verification engine
/// before scanning any step index (§4.5 "Preparation: ... discrete pruning
/// ... is applied once per path; paths provably unsatisfiable are
/// dropped").
pub fn prepare_paths_pruned(
    agent: &NodeAgent,
    joint0: &verse_sensor::JointState,
    sensor: &dyn Sensor,
) -> TransitionResult<Vec<PreparedPath>> {
    let (cont0, disc0, length_dict) = sensor.sense(&agent.agent, joint0)?;
    // Discrete-only environment: an empty continuous template means every
    // `ego.<field>` / `others.<field>[i]` lookup on a continuous name comes
    // back unbound, so `eval_tri` treats it as `Unknown` rather than a
    // concrete value (§4.2.2 "continuous variables left symbolic").
    let disc_env = build_env(&verse_sensor::ContTemplate::new(), &disc0, &length_dict);

    let mut kept = Vec::new();
    for path in agent.agent.controller.get_paths() {
        let updater = parse_any_all(&path.cond, &disc_env);
        let survives = verse_guard::evaluate_guard_disc(std::slice::from_ref(&path.cond), &disc_env)
            .map_err(|source| TransitionError::Guard {
                agent: agent.agent.id.clone(),
                var: path.var.clone(),
                source,
            })?;
        if survives {
            kept.push(PreparedPath { path: path.clone(), updater });
        }
    }
    Ok(kept)
}

/// Build the per-step environment for `path`'s sensed template, applying
/// the path's own quantifier-unroll recipe.
pub fn bind_path_env(
    path: &PreparedPath,
    cont: &verse_sensor::ContTemplate,
    disc: &verse_sensor::DiscBindings,
    length_dict: &verse_sensor::LengthDict,
) -> Env {
    let mut env = build_env(cont, disc, length_dict);
    verse_guard::apply_updater(&mut env, &path.updater, cont, disc);
    env
}
