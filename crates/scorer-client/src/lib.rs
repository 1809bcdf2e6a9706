//! Client for the career scoring service that hosts the trained classifier.
//!
//! The classifier artifact is opaque to this engine; the service wraps it
//! behind two operations:
//! - `DescribeModel`: the feature columns and career classes the model
//!   declares
//! - `ScoreRecord`: a probability distribution over those classes for one
//!   feature record
//!
//! This crate provides the `Scorer` trait (the seam the rest of the engine
//! programs against) and `GrpcScorer`, the tonic-based implementation that
//! fetches the model schema once at connect time.

use anyhow::{Context, Result};
use catalog::ModelSchema;
use thiserror::Error;
use tonic::transport::Channel;
use tracing::{debug, error, info};

// Include the generated protobuf code
pub mod careers {
    tonic::include_proto!("careers");
}

use careers::career_scorer_client::CareerScorerClient;
use careers::{DescribeModelRequest, ScoreRecordRequest};

/// Errors that can occur when interacting with the scoring service
#[derive(Error, Debug)]
pub enum ScorerError {
    #[error("Failed to connect to scoring service: {0}")]
    ConnectionError(String),

    #[error("Failed to score feature record: {0}")]
    ScoringError(String),

    #[error("Invalid response from scoring service: {0}")]
    InvalidResponse(String),
}

/// The classifier's probability-output capability behind an interface.
///
/// ## Design Note
/// - `Send + Sync` allows one scorer to be shared across concurrent
///   request handlers
/// - The scorer is assumed deterministic and idempotent, so callers never
///   retry a failed score
#[tonic::async_trait]
pub trait Scorer: Send + Sync {
    /// The feature columns and career classes the model declares.
    fn schema(&self) -> &ModelSchema;

    /// Score one feature record.
    ///
    /// # Arguments
    /// * `values` - Feature values aligned to the declared column order
    ///
    /// # Returns
    /// One probability per declared class, in the model's native class
    /// order.
    async fn score(&self, values: &[f32]) -> Result<Vec<f32>, ScorerError>;
}

/// gRPC-backed scorer.
///
/// Wraps the auto-generated client and carries the model schema fetched at
/// connect time, so per-request scoring needs no schema round-trips.
pub struct GrpcScorer {
    client: CareerScorerClient<Channel>,
    service_addr: String,
    schema: ModelSchema,
}

impl GrpcScorer {
    /// Connect to the scoring service and fetch the model schema.
    ///
    /// # Arguments
    /// * `addr` - Address of the gRPC service (e.g., "http://localhost:50051")
    ///
    /// # Returns
    /// A connected scorer carrying the model's declared schema
    pub async fn connect(addr: impl Into<String>) -> Result<Self> {
        let addr = addr.into();
        info!("Connecting to career scoring service at {}", addr);

        let channel = Channel::from_shared(addr.clone())
            .context("Creating channel from address")?
            .connect()
            .await
            .context("Connecting to scoring service")?;

        let mut client = CareerScorerClient::new(channel);
        let response = client
            .describe_model(tonic::Request::new(DescribeModelRequest {}))
            .await
            .context("Fetching model schema")?
            .into_inner();

        let schema = ModelSchema::new(response.feature_columns, response.classes);
        info!(
            "Model declares {} feature columns and {} career classes",
            schema.num_features(),
            schema.num_classes()
        );

        Ok(GrpcScorer {
            client,
            service_addr: addr,
            schema,
        })
    }

    /// Get the address of the scoring service this client is connected to.
    pub fn service_address(&self) -> &str {
        &self.service_addr
    }
}

#[tonic::async_trait]
impl Scorer for GrpcScorer {
    fn schema(&self) -> &ModelSchema {
        &self.schema
    }

    async fn score(&self, values: &[f32]) -> Result<Vec<f32>, ScorerError> {
        debug!("Scoring a {}-column feature record", values.len());

        let request = tonic::Request::new(ScoreRecordRequest {
            values: values.to_vec(),
        });

        // Generated clients take `&mut self`; clone the channel handle per call
        let mut client = self.client.clone();
        let response = client.score_record(request).await.map_err(|e| {
            error!("gRPC error while scoring record: {}", e);
            ScorerError::ScoringError(e.to_string())
        })?;

        let probabilities = response.into_inner().probabilities;

        if probabilities.len() != self.schema.num_classes() {
            error!(
                "Mismatch in number of probabilities returned: expected {}, got {}",
                self.schema.num_classes(),
                probabilities.len()
            );
            return Err(ScorerError::InvalidResponse(
                "Number of probabilities does not match declared class count".into(),
            ));
        }
        Ok(probabilities)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// In-process scorer used to verify the trait is object-safe and
    /// usable through `Arc<dyn Scorer>` the way request handlers hold it.
    struct FixedScorer {
        schema: ModelSchema,
        probabilities: Vec<f32>,
    }

    #[tonic::async_trait]
    impl Scorer for FixedScorer {
        fn schema(&self) -> &ModelSchema {
            &self.schema
        }

        async fn score(&self, _values: &[f32]) -> Result<Vec<f32>, ScorerError> {
            Ok(self.probabilities.clone())
        }
    }

    #[tokio::test]
    async fn test_scorer_trait_object() {
        let scorer: std::sync::Arc<dyn Scorer> = std::sync::Arc::new(FixedScorer {
            schema: ModelSchema::new(
                vec!["q_1".to_string()],
                vec!["engineer".to_string(), "teacher".to_string()],
            ),
            probabilities: vec![0.7, 0.3],
        });

        assert_eq!(scorer.schema().num_classes(), 2);
        let probabilities = scorer.score(&[1.0]).await.unwrap();
        assert_eq!(probabilities, vec![0.7, 0.3]);
    }
}
