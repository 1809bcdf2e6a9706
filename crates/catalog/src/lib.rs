//! # Catalog Crate
//!
//! Static schemas for the career recommendation engine.
//!
//! ## Main Components
//!
//! - **types**: `SubjectCatalog` (known-subject vocabulary), `ModelSchema`
//!   (the classifier's declared columns and classes), interest-question
//!   constants
//! - **parser**: Load subject catalog files
//! - **error**: Error types for catalog loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use catalog::{SubjectCatalog, interest_column};
//!
//! // Built-in vocabulary
//! let catalog = SubjectCatalog::default();
//! assert!(catalog.contains("Mathematics"));
//!
//! // Or load a deployment-specific catalog file
//! let catalog = catalog::load_subject_catalog(Path::new("data/subjects.txt"))?;
//!
//! println!("{} subjects, first interest column: {}", catalog.len(), interest_column(1));
//! ```

// Public modules
pub mod error;
pub mod parser;
pub mod types;

// Re-export commonly used types for convenience
pub use error::{CatalogError, Result};
pub use parser::load_subject_catalog;
pub use types::{
    // Type aliases
    QuestionId,
    // Core types
    SubjectCatalog,
    ModelSchema,
    // Constants and helpers
    DEFAULT_SUBJECTS,
    INTEREST_QUESTIONS,
    INTEREST_QUESTION_COUNT,
    interest_column,
    interest_question,
};
