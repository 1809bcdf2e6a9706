//! Error types for the encoding and ranking pipeline.

use thiserror::Error;

/// Errors raised while turning a request payload into ranked careers
///
/// `Validation` is a per-request condition surfaced back to the caller;
/// `ModelContract` indicates a deployment or versioning bug between the
/// engine and the classifier artifact.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Request payload was structurally malformed
    #[error("Invalid request payload: {0}")]
    Validation(String),

    /// The classifier's declared schema and actual output disagree
    #[error("Model contract violation: expected {declared} class probabilities, got {actual}")]
    ModelContract { declared: usize, actual: usize },
}
