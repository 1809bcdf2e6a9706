//! Response envelope returned to the caller.

use pipeline::CareerRecommendation;
use serde::{Deserialize, Serialize};

/// Outcome of one recommendation request: a success flag plus either the
/// ranked careers or a human-readable error message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendResponse {
    pub success: bool,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub recommendations: Vec<CareerRecommendation>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RecommendResponse {
    /// Build a success envelope around ranked recommendations.
    pub fn success(recommendations: Vec<CareerRecommendation>) -> Self {
        Self {
            success: true,
            recommendations,
            error: None,
        }
    }

    /// Build a failure envelope carrying an error message.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            recommendations: Vec::new(),
            error: Some(message.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_envelope_shape() {
        let response = RecommendResponse::success(vec![CareerRecommendation {
            career: "software engineer".to_string(),
            confidence: 0.81,
        }]);

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["recommendations"][0]["career"], "software engineer");
        assert!(
            json.get("error").is_none(),
            "success envelope must not carry an error field"
        );
    }

    #[test]
    fn test_failure_envelope_shape() {
        let response = RecommendResponse::failure("Invalid request payload");

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "Invalid request payload");
        assert!(
            json.get("recommendations").is_none(),
            "failure envelope must not carry recommendations"
        );
    }
}
