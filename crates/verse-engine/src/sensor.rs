//! `Sensor` — the pluggable collaborator behind `Scenario::set_sensor` (§6).
//!
//! Defined in `verse-transition` (every per-step call site in its `sim`/
//! `verify` modules takes `&dyn Sensor` directly) and re-exported here so
//! `Scenario` can expose the `set_sensor` hook the exposed interface names,
//! for embedding applications that sense differently (e.g. injecting
//! synthetic noise for testing).

pub use verse_transition::{DefaultSensor, Sensor};
