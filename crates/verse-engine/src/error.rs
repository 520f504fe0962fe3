//! The top-level error type returned by `Scenario::simulate`/`Scenario::verify`.

use thiserror::Error;
use verse_core::AgentId;
use verse_sensor::SensorError;
use verse_transition::TransitionError;

/// Errors a [`crate::Scenario`] call can return (§7).
#[derive(Debug, Error)]
pub enum EngineError {
    /// Bad init count, unknown agent id, or a mode value not in its
    /// declared enum set (§7 "Configuration errors ... fatal").
    #[error("configuration error: {0}")]
    Config(String),

    #[error("no agent registered with id {0}")]
    UnknownAgent(AgentId),

    #[error(transparent)]
    Transition(#[from] TransitionError),

    #[error(transparent)]
    Sensor(#[from] SensorError),
}

pub type EngineResult<T> = Result<T, EngineError>;
