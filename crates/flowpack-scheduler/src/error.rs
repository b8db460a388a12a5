//! Selector error types.

use thiserror::Error;

/// Result type alias for selection operations.
pub type SelectorResult<T> = Result<T, SelectorError>;

/// Errors that can occur while configuring or running job selection.
///
/// An error from `select_jobs` tells the caller to fall back to its own
/// default admission policy. "No job fits" is not an error — it is an
/// empty selection.
#[derive(Debug, Error)]
pub enum SelectorError {
    #[error("greediness must be within [0, 1], got {0}")]
    GreedinessOutOfRange(f64),

    #[error("job {job}: resource {resource} must be numeric to count against capacity")]
    NonNumericDemand { job: String, resource: String },
}
