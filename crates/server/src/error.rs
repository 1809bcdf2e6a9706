//! Request-level error taxonomy for the recommendation service.

use pipeline::PipelineError;
use scorer_client::ScorerError;
use thiserror::Error;

/// Faults a single request can surface.
///
/// Every variant becomes a failure response at the service boundary; none
/// are fatal to the process, and nothing is retried.
#[derive(Error, Debug)]
pub enum RecommendError {
    /// Malformed request shape; a per-request caller fault
    #[error("{0}")]
    Validation(String),

    /// The classifier's declared schema and actual output disagree; a
    /// deployment/versioning bug, not a per-request condition
    #[error("{0}")]
    ModelContract(String),

    /// The scoring call itself failed
    #[error("Scoring failed: {0}")]
    Scoring(String),
}

impl From<PipelineError> for RecommendError {
    fn from(err: PipelineError) -> Self {
        match err {
            PipelineError::Validation(_) => RecommendError::Validation(err.to_string()),
            PipelineError::ModelContract { .. } => RecommendError::ModelContract(err.to_string()),
        }
    }
}

impl From<ScorerError> for RecommendError {
    fn from(err: ScorerError) -> Self {
        match err {
            // A wrong-length probability vector is the same contract fault
            // the ranker guards against
            ScorerError::InvalidResponse(_) => RecommendError::ModelContract(err.to_string()),
            _ => RecommendError::Scoring(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipeline_errors_map_by_kind() {
        let validation: RecommendError =
            PipelineError::Validation("`subjects` must be a list of strings".to_string()).into();
        assert!(matches!(validation, RecommendError::Validation(_)));

        let contract: RecommendError = PipelineError::ModelContract {
            declared: 6,
            actual: 3,
        }
        .into();
        assert!(matches!(contract, RecommendError::ModelContract(_)));
    }

    #[test]
    fn test_scorer_errors_map_by_kind() {
        let contract: RecommendError =
            ScorerError::InvalidResponse("wrong length".to_string()).into();
        assert!(matches!(contract, RecommendError::ModelContract(_)));

        let scoring: RecommendError = ScorerError::ScoringError("service down".to_string()).into();
        assert!(matches!(scoring, RecommendError::Scoring(_)));
    }
}
