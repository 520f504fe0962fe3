//! Controller IR, declared mode/state shape, and the agent record.

use std::sync::Arc;

use verse_core::{AgentId, ModeTuple, Region};

use crate::path::{Assert, ModePath};

/// The decision-function argument signature (§3): each argument is either
/// the ego state, the sequence of other-agent states, or the map.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ArgKind {
    Ego,
    Others,
    Map,
}

/// The declared state shape: ordered continuous fields followed by ordered
/// discrete (non-mode) fields (§3 "named record with ordered continuous
/// fields and ordered discrete fields").
#[derive(Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StateDef {
    pub continuous_fields: Vec<String>,
    pub discrete_fields: Vec<String>,
}

impl StateDef {
    pub fn new(continuous_fields: Vec<String>, discrete_fields: Vec<String>) -> Self {
        Self {
            continuous_fields,
            discrete_fields,
        }
    }

    pub fn num_continuous(&self) -> usize {
        self.continuous_fields.len()
    }
}

/// One declared mode category: a name (`"AgentMode"`) and its ordered set of
/// enum values (`"Normal"`, `"SwitchLeft"`, …). Declaration order across
/// categories fixes the position a category's value occupies in every
/// `ModeTuple` for this controller (§3 invariant iv).
#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModeCategory {
    pub name: String,
    pub values: Vec<String>,
}

impl ModeCategory {
    pub fn new(name: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    pub fn contains(&self, value: &str) -> bool {
        self.values.iter().any(|v| v == value)
    }
}

/// The intermediate representation of one agent's controller (§3):
/// declared mode categories, declared state shape, the decision function's
/// argument signature, guarded mode paths, and asserts.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ControllerIr {
    pub mode_defs: Vec<ModeCategory>,
    pub state_defs: StateDef,
    pub args: Vec<ArgKind>,
    paths: Vec<ModePath>,
    asserts: Vec<Assert>,
}

impl ControllerIr {
    pub fn new(
        mode_defs: Vec<ModeCategory>,
        state_defs: StateDef,
        args: Vec<ArgKind>,
        paths: Vec<ModePath>,
        asserts: Vec<Assert>,
    ) -> Self {
        Self {
            mode_defs,
            state_defs,
            args,
            paths,
            asserts,
        }
    }

    /// Mode paths in declared order (§5 "within an agent, paths are
    /// processed in declared order").
    pub fn get_paths(&self) -> &[ModePath] {
        &self.paths
    }

    /// Asserts in declared order (§4.4 step 2 evaluates them in this order).
    pub fn get_asserts(&self) -> &[Assert] {
        &self.asserts
    }

    /// The declared enum values for mode category at position `index`, or
    /// `None` if there is no such category.
    pub fn mode_values_at(&self, index: usize) -> Option<&[String]> {
        self.mode_defs.get(index).map(|c| c.values.as_slice())
    }

    pub fn num_mode_categories(&self) -> usize {
        self.mode_defs.len()
    }

    /// `true` if every value in `tuple` belongs to its category's declared
    /// enum set and the tuple has one value per declared category (§8
    /// "Successor mode validity").
    pub fn mode_tuple_is_valid(&self, tuple: &ModeTuple) -> bool {
        tuple.len() == self.mode_defs.len()
            && tuple
                .0
                .iter()
                .zip(&self.mode_defs)
                .all(|(v, cat)| cat.contains(v.as_str()))
    }
}

/// An autonomous entity with continuous state and a discrete mode tuple,
/// driven by a controller (§3, GLOSSARY).
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Agent {
    pub id: AgentId,
    pub controller: Arc<ControllerIr>,
    pub init_region: Region,
    pub init_mode: ModeTuple,
    pub static_data: Vec<f64>,
}

impl Agent {
    pub fn new(
        id: AgentId,
        controller: Arc<ControllerIr>,
        init_region: Region,
        init_mode: ModeTuple,
        static_data: Vec<f64>,
    ) -> Self {
        Self {
            id,
            controller,
            init_region,
            init_mode,
            static_data,
        }
    }
}
