//! Transition and outcome types emitted by both engines (§3, §4.4, §4.5).

use verse_core::{AgentId, Destination, HitRange, ModeTuple, Rect, StepIndex};

use crate::assert_check::AssertHit;

/// `(agent_id, src_mode, dst_mode, successor_point, hit_index)` (§3).
#[derive(Clone, Debug, PartialEq)]
pub struct SimTransition {
    pub agent_id: AgentId,
    pub src_mode: ModeTuple,
    pub dst_mode: Destination,
    pub successor_point: Vec<f64>,
    pub hit_index: StepIndex,
}

/// `(agent_id, src_mode, dst_mode, successor_rect, (min_hit, max_hit))` (§3).
#[derive(Clone, Debug, PartialEq)]
pub struct VerifyTransition {
    pub agent_id: AgentId,
    pub src_mode: ModeTuple,
    pub dst_mode: Destination,
    pub successor_rect: Rect,
    pub hit_range: HitRange,
}

/// The result of `get_transition_simulate` (§4.4): asserts take precedence
/// over transitions, and at most one step index ever produces transitions.
#[derive(Clone, Debug, PartialEq)]
pub enum SimOutcome {
    /// An assert fired at `at`; no transitions are produced for this node.
    AssertsFired { hits: Vec<AssertHit>, at: StepIndex },
    /// At least one agent fired a guard at `at`; `transitions` covers every
    /// agent that fired at that same earliest index.
    Transitioned { transitions: Vec<SimTransition>, at: StepIndex },
    /// The trace ran to its end with neither an assert nor a guard firing.
    NoTransition,
}

/// The result of `get_transition_verify` (§4.5, §7): an interval-valid
/// assert precondition fires the same way a point one does during
/// simulation, preempting whatever hits had accumulated up to that step.
#[derive(Clone, Debug, PartialEq)]
pub enum VerifyOutcome {
    /// An assert's precondition is possibly true and its condition is
    /// possibly false somewhere in the box, at step `at`.
    AssertsFired { hits: Vec<AssertHit>, at: StepIndex },
    /// At least one agent produced a hit over the scanned step range.
    Transitioned { transitions: Vec<VerifyTransition> },
    /// The trace ran to its end with neither an assert nor a hit.
    NoTransition,
}
