//! `verse-sensor` — joint-state snapshots and the `sense()` operation.
//!
//! | Module      | Contents                                               |
//! |-------------|-----------------------------------------------------------|
//! | [`map`]     | `Map` trait, `LaneGeometry`, `MapValue`, `EmptyMap`    |
//! | [`snapshot`]| `AgentSnapshot`, `JointState`                          |
//! | [`sense`]   | `sense()`, `ContTemplate`, `DiscBindings`, `LengthDict`|
//! | [`error`]   | `SensorError`, `SensorResult`                          |

pub mod error;
pub mod map;
pub mod sense;
pub mod snapshot;

#[cfg(test)]
mod tests;

pub use error::{SensorError, SensorResult};
pub use map::{EmptyMap, LaneGeometry, Map, MapValue};
pub use sense::{sense, ContBinding, ContTemplate, DiscBinding, DiscBindings, DiscValue, LengthDict};
pub use snapshot::{AgentSnapshot, JointState};
