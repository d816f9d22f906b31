//! Error types for filter operations.

use thiserror::Error;

/// Error type for filter operations.
///
/// Cancellation is not an error: a cancelled pass yields `None`.
#[derive(Error, Debug)]
pub enum OpsError {
    /// Kernel failed construction-time validation.
    #[error("invalid kernel: {0}")]
    InvalidKernel(String),

    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Invalid dimensions specified.
    #[error("invalid dimensions: {0}")]
    InvalidDimensions(String),

    /// Pixel buffer error.
    #[error(transparent)]
    Core(#[from] pfx_core::Error),

    /// Background worker could not be started or died.
    #[error("worker failed: {0}")]
    Worker(String),
}

/// Result type for filter operations.
pub type OpsResult<T> = Result<T, OpsError>;
