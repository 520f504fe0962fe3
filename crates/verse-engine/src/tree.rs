//! The analysis tree (§3 "Analysis Tree Node"): the branching structure
//! `Scenario::simulate`/`Scenario::verify` build and return.

use std::collections::HashMap;
use std::sync::Arc;

use verse_core::{AgentId, ModeTuple, Region};
use verse_ir::Agent;
use verse_transition::{AssertHit, TraceRow};

/// One node of the analysis tree: every agent's state at a branching point,
/// plus the trace accumulated since the node's start (§3).
///
/// Agents are additionally tracked in `order`, a `Vec`, because the
/// transition engine's ordering guarantee (§5 "agents in node's insertion
/// order") cannot be read off a `HashMap`.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnalysisTreeNode {
    pub id: usize,
    pub order: Vec<AgentId>,
    pub agents: HashMap<AgentId, Arc<Agent>>,
    pub mode: HashMap<AgentId, ModeTuple>,
    pub static_data: HashMap<AgentId, Vec<f64>>,
    pub trace: HashMap<AgentId, Vec<TraceRow>>,
    /// The node's starting time, in seconds along the horizon.
    pub start_time: f64,
    /// Present only on the root node of a `verify()` tree, recording each
    /// agent's initial region before the point/interval promotion (§9
    /// "Supplemented features").
    pub init: Option<HashMap<AgentId, Region>>,
    pub assert_hits: Vec<AssertHit>,
    pub children: Vec<usize>,
}

impl AnalysisTreeNode {
    pub fn new(id: usize, start_time: f64) -> Self {
        Self {
            id,
            start_time,
            ..Default::default()
        }
    }

    pub fn push_agent(
        &mut self,
        id: AgentId,
        agent: Arc<Agent>,
        mode: ModeTuple,
        static_data: Vec<f64>,
        trace: Vec<TraceRow>,
    ) {
        self.order.push(id.clone());
        self.agents.insert(id.clone(), agent);
        self.mode.insert(id.clone(), mode);
        self.static_data.insert(id.clone(), static_data);
        self.trace.insert(id, trace);
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// The tree produced by one `simulate()`/`verify()` call: a flat arena of
/// nodes indexed by [`AnalysisTreeNode::id`], rooted at index 0.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnalysisTree {
    pub nodes: Vec<AnalysisTreeNode>,
}

impl AnalysisTree {
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Allocate a fresh node with the next id and return it.
    pub fn alloc(&mut self, start_time: f64) -> usize {
        let id = self.nodes.len();
        self.nodes.push(AnalysisTreeNode::new(id, start_time));
        id
    }

    pub fn node(&self, id: usize) -> &AnalysisTreeNode {
        &self.nodes[id]
    }

    pub fn node_mut(&mut self, id: usize) -> &mut AnalysisTreeNode {
        &mut self.nodes[id]
    }

    pub fn root(&self) -> &AnalysisTreeNode {
        &self.nodes[0]
    }

    /// Every node with no children, in arena order.
    pub fn leaves(&self) -> impl Iterator<Item = &AnalysisTreeNode> {
        self.nodes.iter().filter(|n| n.is_leaf())
    }

    /// Serialize the whole tree as JSON, via `verse-cache`'s export module
    /// (§6 "analysis trees may be serialized as JSON").
    #[cfg(feature = "serde")]
    pub fn to_json(&self) -> serde_json::Result<String> {
        verse_cache::to_json(self)
    }
}
