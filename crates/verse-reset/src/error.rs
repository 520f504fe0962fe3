use thiserror::Error;

use verse_guard::GuardError;

#[derive(Debug, Error)]
pub enum ResetError {
    #[error("reset targets undeclared variable {0:?}")]
    UnknownTargetVariable(String),

    #[error("continuous reset for {var:?} produced more than one value; only discrete resets may be nondeterministic")]
    NondeterministicContinuousReset { var: String },

    #[error(transparent)]
    Guard(#[from] GuardError),
}

pub type ResetResult<T> = Result<T, ResetError>;
