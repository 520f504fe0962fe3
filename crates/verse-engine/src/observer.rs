//! `ScenarioObserver` — the "logging" idiom for this codebase: structured
//! callbacks instead of a text logging crate, mirroring
//! `dt_sim::SimObserver`/`dt_output::SimOutputObserver`.

use verse_core::AgentId;
use verse_transition::{AssertHit, SimTransition, VerifyTransition};

/// Callbacks invoked by [`crate::Scenario::simulate`]/[`crate::Scenario::verify`]
/// as each analysis-tree node is processed.
///
/// All methods have default no-op implementations so an implementor only
/// needs to override what it cares about.
pub trait ScenarioObserver {
    /// An assert fired for `agent` at the node currently being analyzed
    /// (§7 "Assert violations: recoverable at the engine boundary").
    fn on_assert_fired(&mut self, _hit: &AssertHit) {}

    /// A guard fired but every reset path's `val` evaluated to an empty
    /// candidate list (§4.3, §7 "No-successor-mode warnings: non-fatal").
    fn on_no_successor_warning(&mut self, _agent: &AgentId) {}

    /// One transition was emitted during simulation.
    fn on_sim_transition(&mut self, _transition: &SimTransition) {}

    /// One transition was emitted during verification.
    fn on_verify_transition(&mut self, _transition: &VerifyTransition) {}

    /// A node finished processing (leaf reached, or children spawned).
    fn on_node_done(&mut self, _node_id: usize) {}
}

/// A [`ScenarioObserver`] that does nothing. Use when you need to call
/// `simulate`/`verify` but don't want callbacks.
pub struct NoopObserver;

impl ScenarioObserver for NoopObserver {}
