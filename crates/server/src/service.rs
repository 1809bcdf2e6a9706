//! # Recommendation Service
//!
//! This module coordinates the per-request pipeline:
//! 1. Validate the request payload shape
//! 2. Encode the payload into a model-aligned feature record
//! 3. Score the record against the classifier
//! 4. Rank class probabilities and select the top 5
//!
//! The service is built once at startup around immutable shared state (the
//! subject catalog, the model schema, the scorer connection) and handles
//! each request statelessly, so concurrent requests need no locking.

use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use serde_json::Value;
use tracing::{info, warn};

use catalog::{ModelSchema, SubjectCatalog};
use pipeline::{CareerRecommendation, FeatureEncoder, PredictionRanker, RecommendRequest};
use scorer_client::{GrpcScorer, Scorer};

use crate::error::RecommendError;
use crate::response::RecommendResponse;

/// Coordinates the encode -> score -> rank pipeline for each request.
#[derive(Clone)]
pub struct RecommendationService {
    catalog: Arc<SubjectCatalog>,
    schema: Arc<ModelSchema>,
    encoder: FeatureEncoder,
    ranker: PredictionRanker,
    scorer: Arc<dyn Scorer>,
}

impl RecommendationService {
    /// Connect to a scoring service and build the request pipeline around
    /// the schema the model declares.
    ///
    /// # Arguments
    /// * `catalog` - The known-subject vocabulary
    /// * `scorer_addr` - Address of the gRPC scoring service
    pub async fn connect(
        catalog: Arc<SubjectCatalog>,
        scorer_addr: impl Into<String>,
    ) -> Result<Self> {
        let scorer = GrpcScorer::connect(scorer_addr).await?;
        Ok(Self::with_scorer(catalog, Arc::new(scorer)))
    }

    /// Build the service around an already-constructed scorer.
    ///
    /// The encoder and ranker are derived from the scorer's declared
    /// schema, so the whole pipeline agrees on column order and classes.
    pub fn with_scorer(catalog: Arc<SubjectCatalog>, scorer: Arc<dyn Scorer>) -> Self {
        let schema = Arc::new(scorer.schema().clone());
        let encoder = FeatureEncoder::new(catalog.clone(), schema.clone());
        let ranker = PredictionRanker::new();

        Self {
            catalog,
            schema,
            encoder,
            ranker,
            scorer,
        }
    }

    /// The subject vocabulary this service encodes against
    pub fn catalog(&self) -> &SubjectCatalog {
        &self.catalog
    }

    /// The model schema this service is aligned to
    pub fn schema(&self) -> &ModelSchema {
        &self.schema
    }

    /// Run one request through the pipeline.
    ///
    /// # Returns
    /// Up to 5 career recommendations sorted by confidence (highest first)
    pub async fn recommend(
        &self,
        payload: &Value,
    ) -> Result<Vec<CareerRecommendation>, RecommendError> {
        let start_time = Instant::now();

        // Validate payload shape
        let request = RecommendRequest::from_value(payload)?;
        info!(
            "Validated request: {} subjects, {} interest answers",
            request.subjects.len(),
            request.interests.len()
        );

        // Encode into the model's column order
        let record = self.encoder.encode(&request);
        info!("Encoded feature record with {} columns", record.len());

        // Score against the classifier
        let probabilities = self.scorer.score(record.values()).await?;
        info!(
            "Scored record against {} career classes",
            probabilities.len()
        );

        // Rank and select top recommendations
        let recommendations = self.ranker.rank(self.schema.classes(), &probabilities)?;
        info!(
            "Selected top {} recommendations in {:.2?}",
            recommendations.len(),
            start_time.elapsed()
        );

        Ok(recommendations)
    }

    /// Request boundary: every fault becomes a failure envelope.
    ///
    /// Requests are isolated; no fault here is fatal to the process.
    pub async fn handle(&self, payload: &Value) -> RecommendResponse {
        match self.recommend(payload).await {
            Ok(recommendations) => RecommendResponse::success(recommendations),
            Err(err) => {
                warn!("Request failed: {}", err);
                RecommendResponse::failure(err.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::{INTEREST_QUESTION_COUNT, interest_column};
    use pipeline::{DEFAULT_EMPLOYMENT_RATE_COLUMN, DEFAULT_SECTOR_COLUMN};
    use scorer_client::ScorerError;
    use scorer_client::careers::career_scorer_server::{CareerScorer, CareerScorerServer};
    use scorer_client::careers::{
        DescribeModelRequest, DescribeModelResponse, ScoreRecordRequest, ScoreRecordResponse,
    };
    use serde_json::json;
    use tokio::net::TcpListener;
    use tokio_stream::wrappers::TcpListenerStream;
    use tonic::transport::Server;
    use tonic::{Request, Response, Status};

    // ============================================================================
    // Test Fixtures
    // ============================================================================

    fn test_columns() -> Vec<String> {
        let catalog = SubjectCatalog::default();
        let mut columns: Vec<String> = catalog.subjects().to_vec();
        columns.extend((1..=INTEREST_QUESTION_COUNT).map(interest_column));
        columns.push(DEFAULT_SECTOR_COLUMN.to_string());
        columns.push(DEFAULT_EMPLOYMENT_RATE_COLUMN.to_string());
        columns
    }

    fn test_classes() -> Vec<String> {
        [
            "software engineer",
            "doctor",
            "teacher",
            "accountant",
            "lawyer",
            "nurse",
        ]
        .iter()
        .map(|label| label.to_string())
        .collect()
    }

    // ============================================================================
    // Mock Scoring Service
    // ============================================================================

    /// Mock scorer that returns a deterministic distribution for testing
    #[derive(Default)]
    struct MockCareerScorer;

    #[tonic::async_trait]
    impl CareerScorer for MockCareerScorer {
        async fn describe_model(
            &self,
            _request: Request<DescribeModelRequest>,
        ) -> Result<Response<DescribeModelResponse>, Status> {
            Ok(Response::new(DescribeModelResponse {
                feature_columns: test_columns(),
                classes: test_classes(),
            }))
        }

        async fn score_record(
            &self,
            request: Request<ScoreRecordRequest>,
        ) -> Result<Response<ScoreRecordResponse>, Status> {
            let values = &request.get_ref().values;
            if values.len() != test_columns().len() {
                return Err(Status::invalid_argument("unexpected column count"));
            }

            // Deterministic pseudo-distribution: later classes get more
            // weight the more indicators are active, so rankings shift
            // with the input without any randomness
            let active: f32 = values.iter().sum();
            let mut weights: Vec<f32> = (0..test_classes().len())
                .map(|class| 1.0 + class as f32 * (1.0 + active))
                .collect();
            let total: f32 = weights.iter().sum();
            for weight in &mut weights {
                *weight /= total;
            }

            Ok(Response::new(ScoreRecordResponse {
                probabilities: weights,
            }))
        }
    }

    /// Start a mock scoring service on a random port
    async fn start_mock_scoring_service() -> (String, tokio::task::JoinHandle<()>) {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock scoring service");

        let addr = listener.local_addr().expect("Failed to get local address");
        let service = CareerScorerServer::new(MockCareerScorer);

        let handle = tokio::spawn(async move {
            Server::builder()
                .add_service(service)
                .serve_with_incoming(TcpListenerStream::new(listener))
                .await
                .expect("Mock scoring service failed");
        });

        (format!("http://{}", addr), handle)
    }

    /// Create a service wired to the mock scorer
    async fn build_test_service() -> (RecommendationService, tokio::task::JoinHandle<()>) {
        let (addr, handle) = start_mock_scoring_service().await;

        let service = RecommendationService::connect(Arc::new(SubjectCatalog::default()), addr)
            .await
            .expect("Failed to connect to mock scoring service");

        (service, handle)
    }

    // ============================================================================
    // Integration Tests: full pipeline over gRPC
    // ============================================================================

    #[tokio::test]
    async fn test_connect_aligns_to_declared_schema() {
        let (service, handle) = build_test_service().await;

        assert_eq!(service.schema().num_features(), test_columns().len());
        assert_eq!(service.schema().num_classes(), 6);

        handle.abort();
    }

    #[tokio::test]
    async fn test_recommend_returns_sorted_top_five() {
        let (service, handle) = build_test_service().await;

        let payload = json!({
            "subjects": ["Mathematics", "Physics"],
            "interests": {"1": "yes", "2": "no"}
        });

        let recommendations = service.recommend(&payload).await.expect("recommend failed");

        assert_eq!(recommendations.len(), 5, "six classes truncate to top 5");
        for pair in recommendations.windows(2) {
            assert!(pair[0].confidence >= pair[1].confidence);
        }
        for recommendation in &recommendations {
            assert!((0.0..=1.0).contains(&recommendation.confidence));
        }

        handle.abort();
    }

    #[tokio::test]
    async fn test_handle_wraps_success_envelope() {
        let (service, handle) = build_test_service().await;

        let payload = json!({
            "subjects": ["Computer Science"],
            "interests": {"17": "yes"}
        });

        let response = service.handle(&payload).await;

        assert!(response.success);
        assert_eq!(response.recommendations.len(), 5);
        assert!(response.error.is_none());

        handle.abort();
    }

    #[tokio::test]
    async fn test_empty_payload_still_ranks() {
        let (service, handle) = build_test_service().await;

        let payload = json!({
            "subjects": [],
            "interests": {}
        });

        let response = service.handle(&payload).await;

        assert!(response.success, "all-zero vector is still scoreable");
        assert_eq!(response.recommendations.len(), 5);

        handle.abort();
    }

    #[tokio::test]
    async fn test_malformed_subjects_yields_validation_failure() {
        let (service, handle) = build_test_service().await;

        let payload = json!({
            "subjects": "Mathematics",
            "interests": {}
        });

        let response = service.handle(&payload).await;

        assert!(!response.success);
        assert!(response.recommendations.is_empty());
        let message = response.error.expect("failure must carry a message");
        assert!(message.contains("subjects"));

        handle.abort();
    }

    #[tokio::test]
    async fn test_unknown_subjects_do_not_fail() {
        let (service, handle) = build_test_service().await;

        let payload = json!({
            "subjects": ["Alchemy", "Divination"],
            "interests": {"50": "yes"}
        });

        let response = service.handle(&payload).await;

        assert!(
            response.success,
            "unknown subjects and out-of-range ids are tolerated"
        );

        handle.abort();
    }

    // ============================================================================
    // Unit Tests: error boundary with in-process scorers
    // ============================================================================

    /// Scorer whose output length disagrees with its declared classes
    struct ContractViolatingScorer {
        schema: ModelSchema,
    }

    #[tonic::async_trait]
    impl Scorer for ContractViolatingScorer {
        fn schema(&self) -> &ModelSchema {
            &self.schema
        }

        async fn score(&self, _values: &[f32]) -> Result<Vec<f32>, ScorerError> {
            // Declares 3 classes, returns 2 probabilities
            Ok(vec![0.6, 0.4])
        }
    }

    /// Scorer whose scoring call always fails
    struct FailingScorer {
        schema: ModelSchema,
    }

    #[tonic::async_trait]
    impl Scorer for FailingScorer {
        fn schema(&self) -> &ModelSchema {
            &self.schema
        }

        async fn score(&self, _values: &[f32]) -> Result<Vec<f32>, ScorerError> {
            Err(ScorerError::ScoringError("scoring service down".to_string()))
        }
    }

    fn three_class_schema() -> ModelSchema {
        ModelSchema::new(
            test_columns(),
            vec![
                "engineer".to_string(),
                "teacher".to_string(),
                "nurse".to_string(),
            ],
        )
    }

    #[tokio::test]
    async fn test_contract_violation_yields_failure() {
        let service = RecommendationService::with_scorer(
            Arc::new(SubjectCatalog::default()),
            Arc::new(ContractViolatingScorer {
                schema: three_class_schema(),
            }),
        );

        let response = service
            .handle(&json!({"subjects": [], "interests": {}}))
            .await;

        assert!(!response.success);
        let message = response.error.expect("failure must carry a message");
        assert!(message.contains("contract"));
    }

    #[tokio::test]
    async fn test_scoring_fault_yields_failure() {
        let service = RecommendationService::with_scorer(
            Arc::new(SubjectCatalog::default()),
            Arc::new(FailingScorer {
                schema: three_class_schema(),
            }),
        );

        let response = service
            .handle(&json!({"subjects": [], "interests": {}}))
            .await;

        assert!(!response.success);
        assert!(response.error.is_some());
    }
}
