//! Ranking of classifier output into top-K career recommendations.

use crate::error::PipelineError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::debug;

/// Number of career recommendations returned by default
pub const DEFAULT_TOP_K: usize = 5;

/// A candidate career paired with the classifier's confidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareerRecommendation {
    pub career: String,
    /// Probability in [0, 1] assigned by the classifier
    pub confidence: f32,
}

/// Pairs career classes with probabilities and selects the top K.
#[derive(Debug, Clone)]
pub struct PredictionRanker {
    top_k: usize,
}

impl PredictionRanker {
    /// Create a ranker returning the default top 5.
    pub fn new() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
        }
    }

    /// Create a ranker with a custom cutoff.
    pub fn with_top_k(top_k: usize) -> Self {
        Self { top_k }
    }

    /// Rank a probability distribution into recommendations.
    ///
    /// ## Algorithm
    /// 1. Pair each declared class with its probability
    /// 2. Sort descending by probability; the sort is stable, so exact
    ///    ties keep the model's native class order
    /// 3. Truncate to the top K (or fewer if fewer classes are declared)
    ///
    /// # Errors
    /// `ModelContract` if the probability vector length does not match the
    /// declared class list. That is a deployment/versioning fault, never
    /// retried.
    pub fn rank(
        &self,
        classes: &[String],
        probabilities: &[f32],
    ) -> Result<Vec<CareerRecommendation>, PipelineError> {
        if probabilities.len() != classes.len() {
            return Err(PipelineError::ModelContract {
                declared: classes.len(),
                actual: probabilities.len(),
            });
        }

        let mut ranked: Vec<CareerRecommendation> = classes
            .iter()
            .zip(probabilities)
            .map(|(career, &confidence)| CareerRecommendation {
                career: career.clone(),
                confidence,
            })
            .collect();

        ranked.sort_by(|a, b| {
            b.confidence
                .partial_cmp(&a.confidence)
                .unwrap_or(Ordering::Equal)
        });
        ranked.truncate(self.top_k);

        debug!(
            "Ranked {} classes into {} recommendations",
            classes.len(),
            ranked.len()
        );
        Ok(ranked)
    }
}

impl Default for PredictionRanker {
    fn default() -> Self {
        Self::new()
    }
}
