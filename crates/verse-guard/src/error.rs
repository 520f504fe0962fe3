use thiserror::Error;

#[derive(Debug, Error)]
pub enum GuardError {
    #[error("unknown function {0:?} (not in the evaluator whitelist)")]
    UnknownFunction(String),

    #[error("function {name:?} expects {expected} argument(s), got {got}")]
    ArityMismatch { name: String, expected: usize, got: usize },

    #[error("{0}: interval argument is not interval-monotonic")]
    UnsupportedIntervalFunction(String),

    #[error("{context}: value type mismatch")]
    TypeMismatch { context: String },

    #[error("unbound variable {0:?}")]
    UnboundVariable(String),

    #[error("empty guard list")]
    EmptyGuardList,
}

pub type GuardResult<T> = Result<T, GuardError>;
