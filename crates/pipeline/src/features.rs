//! Feature encoding for career prediction.
//!
//! This module converts a validated request payload into the fixed-width
//! numeric feature record the classifier was trained on.

use crate::payload::RecommendRequest;
use catalog::{INTEREST_QUESTION_COUNT, ModelSchema, SubjectCatalog, interest_column};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Column name of the sector indicator placeholder
pub const DEFAULT_SECTOR_COLUMN: &str = "sector_Other";

/// Value of the sector indicator placeholder (always flags "Other")
pub const DEFAULT_SECTOR_VALUE: f32 = 1.0;

/// Column name of the employment-rate placeholder
pub const DEFAULT_EMPLOYMENT_RATE_COLUMN: &str = "employment_rate";

/// Value of the employment-rate placeholder
pub const DEFAULT_EMPLOYMENT_RATE_VALUE: f32 = 0.0;

/// The ordered numeric vector handed to the classifier.
///
/// Values are aligned to the model's declared column order; the length
/// always equals `ModelSchema::num_features()`.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRecord {
    values: Vec<f32>,
}

impl FeatureRecord {
    /// Feature values in the model's declared column order
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Number of columns in the record
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True if the record has no columns
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Encodes request payloads into model-ready feature records.
///
/// The encoder is a pure function of its input and the two static schemas
/// (subject catalog, model schema); it holds no per-request state and can
/// be shared freely across concurrent requests.
#[derive(Debug, Clone)]
pub struct FeatureEncoder {
    catalog: Arc<SubjectCatalog>,
    schema: Arc<ModelSchema>,

    // Placeholder fields awaiting future enrichment; overridable so a
    // retrained model can rename them without touching the encoder.
    sector_column: String,
    sector_value: f32,
    employment_rate_column: String,
    employment_rate_value: f32,
}

impl FeatureEncoder {
    /// Create an encoder with the default placeholder fields.
    pub fn new(catalog: Arc<SubjectCatalog>, schema: Arc<ModelSchema>) -> Self {
        Self {
            catalog,
            schema,
            sector_column: DEFAULT_SECTOR_COLUMN.to_string(),
            sector_value: DEFAULT_SECTOR_VALUE,
            employment_rate_column: DEFAULT_EMPLOYMENT_RATE_COLUMN.to_string(),
            employment_rate_value: DEFAULT_EMPLOYMENT_RATE_VALUE,
        }
    }

    /// Override the sector placeholder field.
    pub fn with_sector(mut self, column: impl Into<String>, value: f32) -> Self {
        self.sector_column = column.into();
        self.sector_value = value;
        self
    }

    /// Override the employment-rate placeholder field.
    pub fn with_employment_rate(mut self, column: impl Into<String>, value: f32) -> Self {
        self.employment_rate_column = column.into();
        self.employment_rate_value = value;
        self
    }

    /// Encode a request into a feature record.
    ///
    /// ## Algorithm
    /// 1. One-hot the supplied subjects over the full catalog vocabulary
    ///    (case-insensitive; unknown subjects are silently dropped)
    /// 2. Resolve all 30 interest indicators ("yes" in any case -> 1,
    ///    anything else or absent -> 0)
    /// 3. Append the sector and employment-rate placeholder fields
    /// 4. Reconcile against the model's declared columns: required columns
    ///    not assembled default to 0, assembled fields the model doesn't
    ///    require are dropped, and the result follows the declared order
    ///    exactly
    pub fn encode(&self, request: &RecommendRequest) -> FeatureRecord {
        let mut assembled: HashMap<String, f32> = HashMap::new();

        // One-hot subject indicators over the whole vocabulary
        for subject in self.catalog.subjects() {
            assembled.insert(subject.clone(), 0.0);
        }
        let mut recognized = 0usize;
        for subject in &request.subjects {
            let normalized = subject.to_lowercase();
            if self.catalog.contains(&normalized) {
                assembled.insert(normalized, 1.0);
                recognized += 1;
            }
        }

        // Interest indicators, one per question id
        for id in 1..=INTEREST_QUESTION_COUNT {
            let answered = request
                .interests
                .get(&id)
                .map(|response| normalize_response(response))
                .unwrap_or(0.0);
            assembled.insert(interest_column(id), answered);
        }

        // Placeholder fields, constant until real enrichment data exists
        assembled.insert(self.sector_column.clone(), self.sector_value);
        assembled.insert(
            self.employment_rate_column.clone(),
            self.employment_rate_value,
        );

        // Align to the model's declared column order
        let values = self
            .schema
            .feature_columns()
            .iter()
            .map(|column| assembled.get(column).copied().unwrap_or(0.0))
            .collect();

        debug!(
            "Encoded {} of {} supplied subjects into a {}-column record",
            recognized,
            request.subjects.len(),
            self.schema.num_features()
        );

        FeatureRecord { values }
    }
}

/// Normalize a textual survey response to a binary indicator.
///
/// "yes" in any letter case maps to 1; every other string maps to 0.
fn normalize_response(response: &str) -> f32 {
    if response.eq_ignore_ascii_case("yes") {
        1.0
    } else {
        0.0
    }
}
