//! The `Integrator` collaborator (§6): consumed, not implemented, by this
//! crate. Concrete continuous-dynamics integration and reach-tube post-flow
//! are out of scope (§1) — `verse-engine` only defines the trait and ships
//! [`ConstantIntegrator`], a test double that never advances the state.

use verse_core::{AgentId, ModeTuple};
use verse_transition::TraceRow;

/// Advances one agent's continuous state forward in time.
///
/// `init` is the agent's current point (simulation) or the low/high pair of
/// its current interval (verification), one call per agent per node. The
/// returned rows are appended to that agent's trace, continuing from
/// `init`'s timestamp; a real implementation calls out to a numerical
/// solver driven by the controller's declared dynamics (out of scope here).
pub trait Integrator {
    /// Produce `horizon / step` point rows for simulation, starting just
    /// after `init`.
    fn advance(
        &self,
        agent: &AgentId,
        mode: &ModeTuple,
        init: &[f64],
        static_data: &[f64],
        start_time: f64,
        horizon: f64,
        step: f64,
    ) -> Vec<TraceRow>;

    /// Produce `horizon / step` lower/upper row pairs for verification,
    /// starting just after `init_low`/`init_high`.
    fn advance_tube(
        &self,
        agent: &AgentId,
        mode: &ModeTuple,
        init_low: &[f64],
        init_high: &[f64],
        static_data: &[f64],
        start_time: f64,
        horizon: f64,
        step: f64,
    ) -> Vec<TraceRow>;
}

/// Holds a node's state unchanged for the whole horizon — never a real
/// numerical solver (§6 "both OUT OF SCOPE per spec.md §1"). Every produced
/// row repeats the initial point/rect; useful for exercising the transition
/// engine's guard-scanning and branching logic independent of any concrete
/// dynamics.
pub struct ConstantIntegrator;

impl Integrator for ConstantIntegrator {
    fn advance(
        &self,
        _agent: &AgentId,
        _mode: &ModeTuple,
        init: &[f64],
        _static_data: &[f64],
        start_time: f64,
        horizon: f64,
        step: f64,
    ) -> Vec<TraceRow> {
        let steps = (horizon / step).ceil() as usize;
        (1..=steps)
            .map(|i| {
                let mut row = Vec::with_capacity(init.len() + 1);
                row.push(start_time + i as f64 * step);
                row.extend_from_slice(init);
                TraceRow(row)
            })
            .collect()
    }

    fn advance_tube(
        &self,
        _agent: &AgentId,
        _mode: &ModeTuple,
        init_low: &[f64],
        init_high: &[f64],
        _static_data: &[f64],
        start_time: f64,
        horizon: f64,
        step: f64,
    ) -> Vec<TraceRow> {
        let steps = (horizon / step).ceil() as usize;
        let mut rows = Vec::with_capacity(steps * 2);
        for i in 1..=steps {
            let t = start_time + i as f64 * step;
            let mut lo = Vec::with_capacity(init_low.len() + 1);
            lo.push(t);
            lo.extend_from_slice(init_low);
            let mut hi = Vec::with_capacity(init_high.len() + 1);
            hi.push(t);
            hi.extend_from_slice(init_high);
            rows.push(TraceRow(lo));
            rows.push(TraceRow(hi));
        }
        rows
    }
}
