//! Pipeline for encoding student answers and ranking classifier output.
//!
//! This crate provides:
//! - `RecommendRequest` payload validation
//! - `FeatureEncoder` for building model-ready feature records
//! - `PredictionRanker` for turning probability distributions into top-K
//!   career recommendations
//!
//! ## Architecture
//! A request flows through three stages:
//! 1. `RecommendRequest::from_value` validates the payload shape
//! 2. `FeatureEncoder::encode` assembles and schema-aligns the record
//! 3. The record is scored externally, and `PredictionRanker::rank` pairs
//!    the resulting probabilities with class labels and truncates to top 5
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::{FeatureEncoder, PredictionRanker, RecommendRequest};
//!
//! let request = RecommendRequest::from_value(&payload)?;
//! let encoder = FeatureEncoder::new(catalog.clone(), schema.clone());
//! let record = encoder.encode(&request);
//!
//! let probabilities = scorer.score(record.values()).await?;
//! let ranked = PredictionRanker::new().rank(schema.classes(), &probabilities)?;
//! ```

pub mod error;
pub mod features;
pub mod payload;
pub mod ranker;

// Re-export main types
pub use error::PipelineError;
pub use features::{
    DEFAULT_EMPLOYMENT_RATE_COLUMN, DEFAULT_EMPLOYMENT_RATE_VALUE, DEFAULT_SECTOR_COLUMN,
    DEFAULT_SECTOR_VALUE, FeatureEncoder, FeatureRecord,
};
pub use payload::RecommendRequest;
pub use ranker::{CareerRecommendation, DEFAULT_TOP_K, PredictionRanker};
