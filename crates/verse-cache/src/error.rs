//! The cache crate's error type (§7 "Controller shape mismatch during
//! incremental diff: fatal — the caller must rebuild the cache").

use thiserror::Error;
use verse_core::AgentId;

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("agent {agent}: controller argument signature changed between old and new controller; rebuild the cache")]
    ArgSignatureMismatch { agent: AgentId },

    #[error("agent {agent}: controller declares a different set of output variables; rebuild the cache")]
    OutputVariableSetMismatch { agent: AgentId },
}

pub type CacheResult<T> = Result<T, CacheError>;
