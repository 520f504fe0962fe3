//! `verse-transition` — per-node simulation and verification transition
//! engines: guard scanning with assert precedence (§4.4) and interval hit
//! accumulation with containment cutoff (§4.5).
//!
//! | Module          | Contents                                         |
//! |-----------------|----------------------------------------------------|
//! | [`node`]        | `NodeView`, `NodeAgent`, `TraceRow`               |
//! | [`prepare`]     | `PreparedPath`, `prepare_paths`, `prepare_paths_pruned` |
//! | [`assert_check`]| `AssertHit`, `check_asserts_point/interval`       |
//! | [`transition`]  | `SimTransition`, `VerifyTransition`, `SimOutcome`, `VerifyOutcome` |
//! | [`sensor`]      | `Sensor`, `DefaultSensor`                          |
//! | [`sim`]         | `get_transition_simulate`                          |
//! | [`verify`]      | `get_transition_verify`                            |
//! | [`error`]       | `TransitionError`, `TransitionResult`              |

pub mod assert_check;
pub mod error;
pub mod node;
pub mod prepare;
pub mod sensor;
pub mod sim;
pub mod transition;
pub mod verify;

#[cfg(test)]
mod tests;

pub use assert_check::AssertHit;
pub use error::{TransitionError, TransitionResult};
pub use node::{NodeAgent, NodeView, TraceRow};
pub use prepare::{prepare_paths, prepare_paths_pruned, PreparedPath};
pub use sensor::{DefaultSensor, Sensor};
pub use sim::get_transition_simulate;
pub use transition::{SimOutcome, SimTransition, VerifyOutcome, VerifyTransition};
pub use verify::get_transition_verify;
