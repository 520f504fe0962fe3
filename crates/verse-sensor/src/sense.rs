//! The sensor operation (§4.1): turns a joint-state snapshot into per-agent
//! environment templates the guard evaluator binds against.

use std::collections::HashMap;

use verse_core::Interval;
use verse_ir::Agent;

use crate::error::{SensorError, SensorResult};
use crate::snapshot::JointState;

/// A discrete value: either a declared mode-category value or a raw
/// discrete static field (§3 "named record with ... ordered discrete
/// fields").
#[derive(Clone, PartialEq, Debug)]
pub enum DiscValue {
    Mode(String),
    Static(f64),
}

/// One continuous binding: a single interval for `ego.<field>`, or the
/// ordered per-other-agent list for `others.<field>` (§4.1).
#[derive(Clone, Debug)]
pub enum ContBinding {
    Ego(Interval),
    Others(Vec<Interval>),
}

/// One discrete binding, mirroring [`ContBinding`]'s ego/others split.
#[derive(Clone, Debug)]
pub enum DiscBinding {
    Ego(DiscValue),
    Others(Vec<DiscValue>),
}

/// Dotted-name -> binding maps produced by `sense()` (§3 "Environment
/// binding").
pub type ContTemplate = HashMap<String, ContBinding>;
pub type DiscBindings = HashMap<String, DiscBinding>;

/// Per-`others.<field>` list length, so quantifier unrolling
/// (`verse_guard::parse_any_all`) knows how many indexed variables to
/// generate without re-deriving it from `ContTemplate` (§4.2.1).
pub type LengthDict = HashMap<String, usize>;

/// `sense(agent, joint_state, map) -> (cont_template, disc_bindings,
/// length_dict)` (§4.1). `map` is accepted for signature parity with the
/// Python original but unused here: lane-mode backfilling happens once, in
/// `Scenario::set_map`, not on every `sense()` call.
pub fn sense(agent: &Agent, joint_state: &JointState) -> SensorResult<(ContTemplate, DiscBindings, LengthDict)> {
    let ego_row = joint_state
        .get(&agent.id)
        .ok_or_else(|| SensorError::EgoNotFound(agent.id.clone()))?;

    let ego_rect = ego_row.state.as_rect();
    let others: Vec<_> = joint_state.others(&agent.id).collect();

    let mut cont_template = ContTemplate::new();
    let mut length_dict = LengthDict::new();

    for (i, field) in agent.controller.state_defs.continuous_fields.iter().enumerate() {
        cont_template.insert(format!("ego.{field}"), ContBinding::Ego(ego_rect.0[i]));

        let values: Vec<Interval> = others
            .iter()
            .map(|(_, snap)| snap.state.as_rect().0[i])
            .collect();
        length_dict.insert(field.clone(), values.len());
        cont_template.insert(format!("others.{field}"), ContBinding::Others(values));
    }

    let mut disc_bindings = DiscBindings::new();

    for (i, category) in agent.controller.mode_defs.iter().enumerate() {
        let ego_value = ego_row
            .mode
            .0
            .get(i)
            .map(|v| v.as_str().to_string())
            .unwrap_or_default();
        disc_bindings.insert(
            format!("ego.{}", category.name),
            DiscBinding::Ego(DiscValue::Mode(ego_value)),
        );

        let values: Vec<DiscValue> = others
            .iter()
            .map(|(_, snap)| {
                DiscValue::Mode(
                    snap.mode
                        .0
                        .get(i)
                        .map(|v| v.as_str().to_string())
                        .unwrap_or_default(),
                )
            })
            .collect();
        disc_bindings.insert(format!("others.{}", category.name), DiscBinding::Others(values));
    }

    for (i, field) in agent.controller.state_defs.discrete_fields.iter().enumerate() {
        let ego_value = ego_row.static_data.get(i).copied().unwrap_or(0.0);
        disc_bindings.insert(format!("ego.{field}"), DiscBinding::Ego(DiscValue::Static(ego_value)));

        let values: Vec<DiscValue> = others
            .iter()
            .map(|(_, snap)| DiscValue::Static(snap.static_data.get(i).copied().unwrap_or(0.0)))
            .collect();
        disc_bindings.insert(format!("others.{field}"), DiscBinding::Others(values));
    }

    Ok((cont_template, disc_bindings, length_dict))
}
