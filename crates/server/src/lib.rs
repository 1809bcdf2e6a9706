//! Server crate for the career recommendation engine.
//!
//! This crate contains the request-level service that coordinates payload
//! validation, feature encoding, scoring, and ranking, plus the response
//! envelope and error taxonomy surfaced to callers.

pub mod error;
pub mod response;
pub mod service;

pub use error::RecommendError;
pub use response::RecommendResponse;
pub use service::RecommendationService;
