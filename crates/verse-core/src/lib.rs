//! `verse-core` — foundational types for the `verse` scenario transition engine.
//!
//! This crate is a dependency of every other `verse-*` crate.  It intentionally
//! has no `verse-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module      | Contents                                                |
//! |-------------|----------------------------------------------------------|
//! | [`ids`]     | `AgentId`                                                |
//! | [`interval`]| `Interval`, `Rect` — axis-aligned interval arithmetic    |
//! | [`mode`]    | `ModeValue`, `ModeTuple`, `Destination`                  |
//! | [`region`]  | `Region` — a point or a rectangle per continuous dimension |
//! | [`step`]    | `StepIndex`, `HitRange`, `AnalysisConfig`                |
//! | [`rng`]     | `AgentRng` (per-agent deterministic RNG)                 |
//! | [`error`]   | `CoreError`, `CoreResult`                                |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|-------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod ids;
pub mod interval;
pub mod mode;
pub mod region;
pub mod rng;
pub mod step;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use ids::AgentId;
pub use interval::{Interval, Rect};
pub use mode::{Destination, ModeTuple, ModeValue};
pub use region::Region;
pub use rng::AgentRng;
pub use step::{AnalysisConfig, HitRange, StepIndex};
