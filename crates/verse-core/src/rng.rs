//! Deterministic per-agent RNG.
//!
//! # Determinism strategy
//!
//! Each agent gets its own independent `SmallRng` seeded by:
//!
//!   seed = global_seed XOR (hash(agent_id) * MIXING_CONSTANT)
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio,
//! which spreads distinct agent IDs uniformly across the seed space. Agents
//! never share RNG state, and adding or removing an agent does not disturb
//! the seed of any other agent — a `simulate()` run is reproducible given the
//! same `AnalysisConfig::seed` and the same set of agent names, regardless of
//! registration order.
//!
//! Only used by `simulate()` (§9 "Supplemented features"): it samples one
//! concrete point per agent out of that agent's initial `Region`, since the
//! distilled engine takes only an already-point initial state.

use std::hash::{Hash, Hasher};

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::AgentId;

const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

fn hash_agent_id(agent: &AgentId) -> u64 {
    let mut hasher = std::collections::hash_map::DefaultHasher::new();
    agent.as_str().hash(&mut hasher);
    hasher.finish()
}

/// Per-agent deterministic RNG, one instance per agent for the lifetime of a
/// `simulate()` call.
pub struct AgentRng(SmallRng);

impl AgentRng {
    /// Seed deterministically from the run's global seed and an agent ID.
    pub fn new(global_seed: u64, agent: &AgentId) -> Self {
        let seed = global_seed ^ hash_agent_id(agent).wrapping_mul(MIXING_CONSTANT);
        AgentRng(SmallRng::seed_from_u64(seed))
    }

    /// Sample a concrete point uniformly from an axis-aligned `Rect`, one
    /// coordinate per dimension, in dimension order.
    pub fn sample_rect(&mut self, rect: &crate::interval::Rect) -> Vec<f64> {
        rect.0
            .iter()
            .map(|iv| {
                if iv.is_degenerate() {
                    iv.low
                } else {
                    self.0.gen_range(iv.low..=iv.high)
                }
            })
            .collect()
    }

    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }
}
