//! Error types for the lane filter.

use thiserror::Error;

use crate::config::ConfigLoadError;

/// Lane filter error type
#[derive(Error, Debug)]
pub enum FilterError {
    /// The prior covariance matrix is singular or not positive definite.
    #[error("Singular prior covariance (det = {det})")]
    SingularCovariance {
        /// Determinant of the rejected covariance matrix
        det: f32,
    },

    /// Configuration file could not be loaded or parsed.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigLoadError),
}

/// Convenience alias for filter results
pub type Result<T> = std::result::Result<T, FilterError>;
