use thiserror::Error;

use verse_core::AgentId;
use verse_guard::GuardError;
use verse_reset::ResetError;
use verse_sensor::SensorError;

/// Errors abort the whole node (§7 "guard-structure errors ... fatal for
/// the node"). Every variant that can be attributed to a specific agent and
/// path carries that context, per §7's "naming the agent and path".
#[derive(Debug, Error)]
pub enum TransitionError {
    #[error(transparent)]
    Sensor(#[from] SensorError),

    #[error("agent {agent}, path {var:?}: {source}")]
    Guard {
        agent: AgentId,
        var: String,
        #[source]
        source: GuardError,
    },

    #[error("agent {agent}, path {var:?}: {source}")]
    Reset {
        agent: AgentId,
        var: String,
        #[source]
        source: ResetError,
    },
}

pub type TransitionResult<T> = Result<T, TransitionError>;
