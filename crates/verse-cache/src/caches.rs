//! The three interval-tree caches (§4.6).

use std::collections::HashMap;

use verse_core::{AgentId, Interval, ModeTuple, Rect};
use verse_transition::{SimTransition, VerifyTransition};

use crate::segment::{CachedRTTrans, CachedSegment};
use crate::tree::IntervalTree;

type TreeKey = (AgentId, ModeTuple);

/// Simulation segments, keyed by `(agent_id, mode_tuple)`, indexed within
/// that key by a point-indexed nested interval tree with half-width
/// `epsilon` (§4.6, §9 "ε half-width for point-indexed caches").
pub struct SimTraceCache {
    trees: HashMap<TreeKey, IntervalTree<CachedSegment<SimTransition>>>,
    epsilon: f64,
}

impl SimTraceCache {
    pub fn new(epsilon: f64) -> Self {
        Self { trees: HashMap::new(), epsilon }
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// `check_hit(agent, mode, init)` — §4.6, §8 "Cache containment".
    pub fn check_hit(&self, agent: &AgentId, mode: &ModeTuple, init: &[f64]) -> Option<&CachedSegment<SimTransition>> {
        let tree = self.trees.get(&(agent.clone(), mode.clone()))?;
        let query: Vec<Interval> = init.iter().map(|&v| Interval::point(v)).collect();
        tree.check_hit(&query, IntervalTree::<CachedSegment<SimTransition>>::contains_scalar)
    }

    pub fn add_segment(&mut self, agent: AgentId, mode: ModeTuple, init: &[f64], segment: CachedSegment<SimTransition>) {
        let key: Vec<Interval> = init.iter().map(|&v| Interval::new(v - self.epsilon, v + self.epsilon)).collect();
        let dims = key.len();
        self.trees.entry((agent, mode)).or_insert_with(|| IntervalTree::new(dims)).insert(&key, segment);
    }

    pub fn tree(&self, agent: &AgentId, mode: &ModeTuple) -> Option<&IntervalTree<CachedSegment<SimTransition>>> {
        self.trees.get(&(agent.clone(), mode.clone()))
    }

    pub fn tree_mut(&mut self, agent: &AgentId, mode: &ModeTuple) -> Option<&mut IntervalTree<CachedSegment<SimTransition>>> {
        self.trees.get_mut(&(agent.clone(), mode.clone()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &TreeKey> {
        self.trees.keys()
    }
}

/// Reach tubes (flows), keyed by `(agent_id, mode_tuple)`, indexed by a
/// rectangle-containment nested interval tree with exact bounds (§4.6
/// "Reach tubes ... same structure but each dimension's interval is the
/// init rectangle").
pub struct TubeCache {
    trees: HashMap<TreeKey, IntervalTree<CachedSegment<VerifyTransition>>>,
}

impl TubeCache {
    pub fn new() -> Self {
        Self { trees: HashMap::new() }
    }

    pub fn check_hit(&self, agent: &AgentId, mode: &ModeTuple, init: &Rect) -> Option<&CachedSegment<VerifyTransition>> {
        let tree = self.trees.get(&(agent.clone(), mode.clone()))?;
        tree.check_hit(&init.0, IntervalTree::<CachedSegment<VerifyTransition>>::contains_rect)
    }

    pub fn add_segment(&mut self, agent: AgentId, mode: ModeTuple, init: &Rect, segment: CachedSegment<VerifyTransition>) {
        let dims = init.dims();
        self.trees.entry((agent, mode)).or_insert_with(|| IntervalTree::new(dims)).insert(&init.0, segment);
    }

    pub fn tree(&self, agent: &AgentId, mode: &ModeTuple) -> Option<&IntervalTree<CachedSegment<VerifyTransition>>> {
        self.trees.get(&(agent.clone(), mode.clone()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &TreeKey> {
        self.trees.keys()
    }
}

impl Default for TubeCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Reach transitions, keyed the same way as [`TubeCache`] but storing
/// [`CachedRTTrans`] leaves (§4.6 "Reach transitions: same as reach tubes
/// but leaves store `CachedRTTrans`").
pub struct ReachTransCache {
    trees: HashMap<TreeKey, IntervalTree<CachedRTTrans>>,
}

impl ReachTransCache {
    pub fn new() -> Self {
        Self { trees: HashMap::new() }
    }

    pub fn check_hit(&self, agent: &AgentId, mode: &ModeTuple, init: &Rect) -> Option<&CachedRTTrans> {
        let tree = self.trees.get(&(agent.clone(), mode.clone()))?;
        tree.check_hit(&init.0, IntervalTree::<CachedRTTrans>::contains_rect)
    }

    pub fn add_transitions(&mut self, agent: AgentId, mode: ModeTuple, init: &Rect, entry: CachedRTTrans) {
        let dims = init.dims();
        self.trees.entry((agent, mode)).or_insert_with(|| IntervalTree::new(dims)).insert(&init.0, entry);
    }

    pub fn tree(&self, agent: &AgentId, mode: &ModeTuple) -> Option<&IntervalTree<CachedRTTrans>> {
        self.trees.get(&(agent.clone(), mode.clone()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &TreeKey> {
        self.trees.keys()
    }
}

impl Default for ReachTransCache {
    fn default() -> Self {
        Self::new()
    }
}
