//! Search Error Types
//!
//! Outcomes of a word search other than a non-empty question list.

use std::time::Duration;

use thiserror::Error;

use crate::core::input_validator::ValidationError;
use crate::database::WordDbError;

/// Word search errors
#[derive(Error, Debug)]
pub enum SearchError {
    /// Malformed criteria. Never coerced.
    #[error("Invalid search: {0}")]
    InvalidInput(String),

    /// A valid query that matched nothing.
    #[error("Query returns no results.")]
    NoResults,

    #[error("Tag lookup timed out after {0:?}")]
    TagTimeout(Duration),

    #[error("Tag lookup failed: {0}")]
    TagSource(#[from] TagSourceError),

    #[error(transparent)]
    Store(#[from] WordDbError),
}

impl SearchError {
    /// Whether the same query may succeed if simply retried.
    pub fn is_retryable(&self) -> bool {
        matches!(self, SearchError::TagTimeout(_))
    }

    pub fn is_no_results(&self) -> bool {
        matches!(self, SearchError::NoResults)
    }
}

impl From<ValidationError> for SearchError {
    fn from(e: ValidationError) -> Self {
        SearchError::InvalidInput(e.to_string())
    }
}

/// Errors raised by a tag source
#[derive(Error, Debug)]
pub enum TagSourceError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Tag source unavailable: {0}")]
    Unavailable(String),
}

/// Result type alias for search operations
pub type Result<T> = std::result::Result<T, SearchError>;
