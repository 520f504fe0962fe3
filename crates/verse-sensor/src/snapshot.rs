//! Joint-state snapshots: the per-agent `(state, mode, static_data)` rows
//! `sense()` reads from (§3 "Analysis Tree Node").

use verse_core::{AgentId, ModeTuple, Region};

/// One agent's row in a joint-state snapshot.
#[derive(Clone, Debug)]
pub struct AgentSnapshot {
    pub state: Region,
    pub mode: ModeTuple,
    pub static_data: Vec<f64>,
}

impl AgentSnapshot {
    pub fn new(state: Region, mode: ModeTuple, static_data: Vec<f64>) -> Self {
        Self {
            state,
            mode,
            static_data,
        }
    }
}

/// A snapshot of every agent's state at one time index, in the insertion
/// order `sense()`'s `others` lists must preserve (§4.1 "ordering of
/// `others` lists is deterministic (insertion order of the agent
/// dictionary)"). Backed by a `Vec`, not a `HashMap`, specifically to avoid
/// depending on hash-iteration order for that guarantee.
#[derive(Clone, Debug, Default)]
pub struct JointState(Vec<(AgentId, AgentSnapshot)>);

impl JointState {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Insert or overwrite `id`'s row, preserving its original position on
    /// overwrite and appending on first insertion.
    pub fn insert(&mut self, id: AgentId, snapshot: AgentSnapshot) {
        if let Some(slot) = self.0.iter_mut().find(|(existing, _)| *existing == id) {
            slot.1 = snapshot;
        } else {
            self.0.push((id, snapshot));
        }
    }

    pub fn get(&self, id: &AgentId) -> Option<&AgentSnapshot> {
        self.0.iter().find(|(existing, _)| existing == id).map(|(_, s)| s)
    }

    /// Every row except `ego`'s, in insertion order.
    pub fn others(&self, ego: &AgentId) -> impl Iterator<Item = (&AgentId, &AgentSnapshot)> {
        self.0.iter().filter(move |(id, _)| id != ego).map(|(id, s)| (id, s))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&AgentId, &AgentSnapshot)> {
        self.0.iter().map(|(id, s)| (id, s))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
