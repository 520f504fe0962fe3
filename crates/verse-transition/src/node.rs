//! The per-node view the transition engine consumes (§3 "Analysis Tree
//! Node (consumed, not owned)").
//!
//! `verse-engine` owns the full analysis tree; this crate only ever
//! borrows one node's worth of trace data for the duration of a call.

use std::sync::Arc;

use verse_core::{AgentId, Interval, ModeTuple, Rect, Region};
use verse_ir::Agent;
use verse_sensor::{AgentSnapshot, JointState};

/// One row of a continuous trace: a timestamp followed by the declared
/// continuous fields in declared order (§3 invariant i).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TraceRow(pub Vec<f64>);

impl TraceRow {
    pub fn time(&self) -> f64 {
        self.0[0]
    }

    pub fn fields(&self) -> &[f64] {
        &self.0[1..]
    }
}

/// One agent's slot in a node: its controller-bearing [`Agent`], the mode
/// it currently holds, its static data, and its continuous trace.
///
/// Simulation traces hold one [`TraceRow`] per step index; verification
/// traces hold two consecutive rows per step index (lower bound, then
/// upper bound — §3 invariant ii).
pub struct NodeAgent {
    pub agent: Arc<Agent>,
    pub mode: ModeTuple,
    pub static_data: Vec<f64>,
    pub trace: Vec<TraceRow>,
}

/// A snapshot of every agent's state and mode at one point in the
/// simulation/reachability tree (§3). Built by `verse-engine`, read-only to
/// the transition engine.
#[derive(Default)]
pub struct NodeView {
    agents: Vec<NodeAgent>,
}

impl NodeView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Agents are kept in insertion order — the ordering guarantee §5
    /// requires ("agents in node's insertion order").
    pub fn push(&mut self, agent: NodeAgent) {
        self.agents.push(agent);
    }

    pub fn agents(&self) -> &[NodeAgent] {
        &self.agents
    }

    pub fn get(&self, id: &AgentId) -> Option<&NodeAgent> {
        self.agents.iter().find(|a| &a.agent.id == id)
    }

    /// Number of simulation step indices every agent's trace provides
    /// (the shortest trace bounds the loop).
    pub fn num_sim_steps(&self) -> usize {
        self.agents.iter().map(|a| a.trace.len()).min().unwrap_or(0)
    }

    /// Number of verification step indices (each step occupies two rows).
    pub fn num_verify_steps(&self) -> usize {
        self.agents.iter().map(|a| a.trace.len() / 2).min().unwrap_or(0)
    }

    /// Build a point joint state at simulation step `idx`: every agent's
    /// `TraceRow::fields()` at that index, in node insertion order (§4.1
    /// "ordering of `others` lists is deterministic").
    pub fn point_joint_state(&self, idx: usize) -> JointState {
        let mut joint = JointState::new();
        for a in &self.agents {
            let row = &a.trace[idx];
            joint.insert(
                a.agent.id.clone(),
                AgentSnapshot::new(Region::Point(row.fields().to_vec()), a.mode.clone(), a.static_data.clone()),
            );
        }
        joint
    }

    /// Build an interval joint state at verification step `idx`: rows
    /// `2*idx` (lower) and `2*idx + 1` (upper), componentwise.
    pub fn interval_joint_state(&self, idx: usize) -> JointState {
        let mut joint = JointState::new();
        for a in &self.agents {
            let lo = a.trace[2 * idx].fields();
            let hi = a.trace[2 * idx + 1].fields();
            let rect = Rect::new(lo.iter().zip(hi).map(|(&l, &h)| Interval::new(l, h)).collect());
            joint.insert(a.agent.id.clone(), AgentSnapshot::new(Region::Rect(rect), a.mode.clone(), a.static_data.clone()));
        }
        joint
    }
}
