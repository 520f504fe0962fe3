use thiserror::Error;
use verse_core::AgentId;

#[derive(Debug, Error)]
pub enum SensorError {
    #[error("agent {0} has no row in the joint-state snapshot")]
    EgoNotFound(AgentId),
}

pub type SensorResult<T> = Result<T, SensorError>;
