//! Discrete step indexing along a trace, and top-level analysis configuration.
//!
//! A trace is sampled at a fixed `step` (seconds) over a `horizon` (seconds);
//! `StepIndex` is the integer position within that sampling, exactly as
//! `Tick` indexes the teacher framework's tick loop.  Unlike `Tick`,
//! verification traces pack two rows (lower/upper bound) per step (§3
//! invariant ii), so `StepIndex` never indexes a trace row directly — callers
//! multiply by two themselves at the trace boundary, keeping that
//! multiplication in one place (`verse-transition`).

use std::fmt;

/// An index into a node's trace, shared by simulation and verification.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StepIndex(pub usize);

impl StepIndex {
    pub const ZERO: StepIndex = StepIndex(0);

    #[inline]
    pub fn offset(self, n: usize) -> StepIndex {
        StepIndex(self.0 + n)
    }
}

impl fmt::Display for StepIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The inclusive `(min, max)` range of step indices that contributed to a
/// verification transition (§3, §4.5 step 5).
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HitRange {
    pub min: StepIndex,
    pub max: StepIndex,
}

impl HitRange {
    pub fn single(idx: StepIndex) -> Self {
        Self { min: idx, max: idx }
    }

    /// Widen to include `idx`.
    pub fn extend(&mut self, idx: StepIndex) {
        self.min = self.min.min(idx);
        self.max = self.max.max(idx);
    }
}

// ── AnalysisConfig ──────────────────────────────────────────────────────────

/// Top-level configuration for one `simulate()`/`verify()` call.
///
/// Typically constructed directly by the caller of `Scenario::simulate` /
/// `Scenario::verify`; analogous to the teacher framework's `SimConfig`.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnalysisConfig {
    /// Total simulated time to analyze, in seconds.
    pub horizon: f64,

    /// Sampling step, in seconds.  `total_steps = ceil(horizon / step)`.
    pub step: f64,

    /// Half-width used when inserting a point-indexed cache entry (§9).
    /// Widening it increases cache hit rate at the cost of false reuse when
    /// guards are sensitive near the init boundary.
    pub cache_epsilon: f64,

    /// Master RNG seed used to sample a concrete point from each agent's
    /// initial region before simulation (§9 "Supplemented features").
    pub seed: u64,
}

impl AnalysisConfig {
    pub fn new(horizon: f64, step: f64) -> Self {
        Self {
            horizon,
            step,
            cache_epsilon: 1e-4,
            seed: 0,
        }
    }

    /// Total number of sampled steps over the horizon.
    pub fn total_steps(&self) -> usize {
        (self.horizon / self.step).ceil() as usize
    }
}
