//! Controller IR construction errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IrError {
    #[error("mode category {0:?} declared twice")]
    DuplicateModeCategory(String),

    #[error("init mode tuple has {got} values, controller declares {expected} categories")]
    InitModeLengthMismatch { expected: usize, got: usize },

    #[error("init mode value {value:?} not declared in category {category:?}")]
    InitModeValueUnknown { category: String, value: String },

    #[error("init region has {got} continuous dimensions, controller declares {expected}")]
    InitRegionDimMismatch { expected: usize, got: usize },
}

pub type IrResult<T> = Result<T, IrError>;
