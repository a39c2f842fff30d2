use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ChartError {
    /// Malformed construction parameters or out-of-range call arguments.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A data value does not match the expected dimension/numeric shape.
    #[error("invalid data format: {0}")]
    InvalidDataFormat(String),

    #[error("permission denied: {0}")]
    PermissionDenied(String),

    #[error("serialization failed: {0}")]
    Serialization(String),
}
