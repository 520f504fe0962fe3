//! The pluggable sensing collaborator threaded through both transition
//! engines (§6 `Scenario::set_sensor`).
//!
//! `verse_sensor::sense` is a free function, but every per-step call site in
//! [`crate::sim`]/[`crate::verify`] takes `&dyn Sensor` instead of calling it
//! directly, so an embedding application's custom sensor (injected noise,
//! recorded fixtures, ...) actually participates in guard evaluation,
//! resets, and assert checking rather than only a one-time pre-flight check.

use verse_ir::Agent;
use verse_sensor::{sense, ContTemplate, DiscBindings, JointState, LengthDict, SensorResult};

pub trait Sensor: Send + Sync {
    fn sense(&self, agent: &Agent, joint: &JointState) -> SensorResult<(ContTemplate, DiscBindings, LengthDict)>;
}

/// The default sensor: `verse_sensor::sense` with no modification.
pub struct DefaultSensor;

impl Sensor for DefaultSensor {
    fn sense(&self, agent: &Agent, joint: &JointState) -> SensorResult<(ContTemplate, DiscBindings, LengthDict)> {
        sense(agent, joint)
    }
}
