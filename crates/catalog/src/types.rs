//! Core schema types for the career recommendation engine.
//!
//! This module defines the two static schemas every request is encoded
//! against:
//! - `SubjectCatalog`: the fixed vocabulary of known school subjects
//! - `ModelSchema`: the feature columns and career classes the classifier
//!   declares
//!
//! Both are built once at process start and shared immutably across
//! requests.

use serde::Serialize;
use std::collections::HashMap;

// =============================================================================
// Interest Questions
// =============================================================================

/// Identifier for a survey interest question (1..=30)
pub type QuestionId = u32;

/// Number of interest questions in the survey
pub const INTEREST_QUESTION_COUNT: QuestionId = 30;

/// Feature column name for an interest question
///
/// Example: `interest_column(7)` -> `"q_7"`
pub fn interest_column(id: QuestionId) -> String {
    format!("q_{}", id)
}

/// Display text for the 30 survey questions, indexed by `id - 1`.
///
/// These back the survey UI and the `questions` CLI command; only the
/// yes/no answers participate in feature encoding.
pub const INTEREST_QUESTIONS: [&str; INTEREST_QUESTION_COUNT as usize] = [
    "Do you enjoy solving problems and thinking logically?",
    "Do you like helping people with their health or emotions?",
    "Do you enjoy teaching, mentoring, or guiding others?",
    "Would you like to start or manage a business?",
    "Are you interested in working with machines, electronics, or fixing things?",
    "Do you enjoy creating art, music, or visual designs?",
    "Are you interested in writing, reading, or telling stories?",
    "Do you want to travel and explore new cultures?",
    "Are you passionate about justice, laws, or human rights?",
    "Would you like to work with money, budgeting, or finance?",
    "Do you enjoy working outdoors or with nature?",
    "Do you want to help improve your community or country?",
    "Do you like managing people, schedules, or resources?",
    "Are you interested in understanding how the human body works?",
    "Do you enjoy building or designing physical structures?",
    "Would you like to protect others and enforce rules?",
    "Are you passionate about computers, coding, or software?",
    "Do you want to make discoveries in science or research?",
    "Are you interested in the economy, trade, or entrepreneurship?",
    "Do you enjoy using social media or creating online content?",
    "Would you like to work with animals?",
    "Are you interested in fashion, beauty, or personal care?",
    "Do you like helping people with personal issues?",
    "Do you enjoy working with numbers and patterns?",
    "Would you like to work in the media or entertainment industry?",
    "Are you passionate about the environment and sustainability?",
    "Do you enjoy making or fixing electronic gadgets?",
    "Do you want to help children learn and grow?",
    "Would you like to explore space or aviation?",
    "Are you interested in using AI or robotics to solve problems?",
];

/// Look up the display text for a question identifier.
///
/// Returns `None` for identifiers outside 1..=30.
pub fn interest_question(id: QuestionId) -> Option<&'static str> {
    if (1..=INTEREST_QUESTION_COUNT).contains(&id) {
        Some(INTEREST_QUESTIONS[(id - 1) as usize])
    } else {
        None
    }
}

// =============================================================================
// Subject Catalog
// =============================================================================

/// Subjects offered in the Cameroon GCE curriculum, lowercase.
///
/// This is the built-in default vocabulary; deployments can load a
/// different catalog file instead.
pub const DEFAULT_SUBJECTS: [&str; 32] = [
    "english",
    "french",
    "general paper",
    "religious studies",
    "philosophy",
    "logic",
    "mathematics",
    "further mathematics",
    "physics",
    "chemistry",
    "biology",
    "computer science",
    "ict",
    "geology",
    "technical drawing",
    "food science",
    "nutrition",
    "agricultural science",
    "physical education",
    "environmental management",
    "history",
    "geography",
    "literature",
    "education",
    "art",
    "music",
    "economics",
    "accounting",
    "business mathematics",
    "management",
    "law",
    "commerce",
];

/// The fixed, ordered vocabulary of known subjects.
///
/// Subject names are stored lowercase; membership tests are
/// case-insensitive. The catalog order defines the one-hot layout the
/// encoder assembles before reconciling against the model schema.
#[derive(Debug, Clone, Serialize)]
pub struct SubjectCatalog {
    /// Subjects in catalog order, lowercase
    subjects: Vec<String>,

    /// Lookup index from subject name to catalog position
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl SubjectCatalog {
    /// Build a catalog from an ordered list of subject names.
    ///
    /// Names are lowercased; duplicates (after lowercasing) keep their
    /// first position.
    pub fn new<I, S>(subjects: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut ordered = Vec::new();
        let mut index = HashMap::new();

        for subject in subjects {
            let normalized = subject.into().to_lowercase();
            if !index.contains_key(&normalized) {
                index.insert(normalized.clone(), ordered.len());
                ordered.push(normalized);
            }
        }

        Self {
            subjects: ordered,
            index,
        }
    }

    /// All known subjects in catalog order
    pub fn subjects(&self) -> &[String] {
        &self.subjects
    }

    /// Case-insensitive membership test
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(&name.to_lowercase())
    }

    /// Position of a subject in the catalog order, case-insensitive
    pub fn position(&self, name: &str) -> Option<usize> {
        self.index.get(&name.to_lowercase()).copied()
    }

    /// Number of subjects in the catalog
    pub fn len(&self) -> usize {
        self.subjects.len()
    }

    /// True if the catalog has no subjects
    pub fn is_empty(&self) -> bool {
        self.subjects.is_empty()
    }
}

impl Default for SubjectCatalog {
    fn default() -> Self {
        Self::new(DEFAULT_SUBJECTS)
    }
}

// =============================================================================
// Model Schema
// =============================================================================

/// The classifier's declared input and output schema.
///
/// The model artifact is opaque; all the engine knows about it is the
/// ordered feature columns it expects and the ordered career classes it
/// predicts. Every encoded record must match `feature_columns` exactly,
/// and every probability vector must match `classes` in length and order.
#[derive(Debug, Clone, Serialize)]
pub struct ModelSchema {
    /// Required input columns, in the exact order the model expects
    feature_columns: Vec<String>,

    /// Career class labels, in the model's native enumeration order
    classes: Vec<String>,

    /// Lookup index from column name to position
    #[serde(skip)]
    column_index: HashMap<String, usize>,
}

impl ModelSchema {
    /// Build a schema from the model's declared columns and classes.
    pub fn new(feature_columns: Vec<String>, classes: Vec<String>) -> Self {
        let column_index = feature_columns
            .iter()
            .enumerate()
            .map(|(position, column)| (column.clone(), position))
            .collect();

        Self {
            feature_columns,
            classes,
            column_index,
        }
    }

    /// Required input columns in model order
    pub fn feature_columns(&self) -> &[String] {
        &self.feature_columns
    }

    /// Career class labels in the model's native order
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Position of a column in the required order
    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.column_index.get(column).copied()
    }

    /// Number of required input columns
    pub fn num_features(&self) -> usize {
        self.feature_columns.len()
    }

    /// Number of declared career classes
    pub fn num_classes(&self) -> usize {
        self.classes.len()
    }
}
