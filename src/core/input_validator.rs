//! Input Validator Module
//!
//! Validation for the untrusted values that reach query construction:
//! lexicon names (which become file names), tag labels and user identities.

use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Input exceeds maximum length of {max} characters")]
    TooLong { max: usize },

    #[error("Input is empty")]
    Empty,

    #[error("Invalid characters detected: {0}")]
    InvalidCharacters(String),

    #[error("Potential path traversal detected")]
    PathTraversal,

    #[error("Input contains null bytes")]
    NullByte,
}

pub type Result<T> = std::result::Result<T, ValidationError>;

static LEXICON_NAME: OnceLock<Regex> = OnceLock::new();

fn lexicon_name_pattern() -> &'static Regex {
    LEXICON_NAME.get_or_init(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("static pattern compiles"))
}

// ============================================================================
// Input Validator
// ============================================================================

/// Validation limits for query inputs
#[derive(Debug, Clone)]
pub struct InputValidator {
    /// Maximum lexicon name length
    max_lexicon_length: usize,
    /// Maximum tag label length
    max_tag_length: usize,
    /// Maximum user identity length
    max_user_length: usize,
}

impl Default for InputValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl InputValidator {
    pub fn new() -> Self {
        Self {
            max_lexicon_length: 64,
            max_tag_length: 100,
            max_user_length: 150,
        }
    }

    /// Validate a lexicon name. Names map directly onto dataset file names,
    /// so only ASCII letters, digits, `_` and `-` are allowed.
    pub fn validate_lexicon_name(&self, name: &str) -> Result<()> {
        self.check_common(name, self.max_lexicon_length)?;

        if self.detect_path_traversal(name) {
            return Err(ValidationError::PathTraversal);
        }

        if !lexicon_name_pattern().is_match(name) {
            let bad: String = name
                .chars()
                .filter(|c| !(c.is_ascii_alphanumeric() || *c == '_' || *c == '-'))
                .collect();
            return Err(ValidationError::InvalidCharacters(bad));
        }

        Ok(())
    }

    /// Validate a tag label. Labels are free text but must be non-blank.
    pub fn validate_tag(&self, tag: &str) -> Result<()> {
        self.check_common(tag, self.max_tag_length)?;
        if tag.trim().is_empty() {
            return Err(ValidationError::Empty);
        }
        Ok(())
    }

    /// Validate a user identity.
    pub fn validate_user(&self, user: &str) -> Result<()> {
        self.check_common(user, self.max_user_length)?;
        if user.trim().is_empty() {
            return Err(ValidationError::Empty);
        }
        Ok(())
    }

    fn check_common(&self, input: &str, max: usize) -> Result<()> {
        if input.is_empty() {
            return Err(ValidationError::Empty);
        }
        if input.contains('\0') {
            return Err(ValidationError::NullByte);
        }
        if input.chars().count() > max {
            return Err(ValidationError::TooLong { max });
        }
        Ok(())
    }

    fn detect_path_traversal(&self, input: &str) -> bool {
        let lower = input.to_lowercase();
        let patterns = ["..", "/", "\\", "%2e%2e", "%2f", "%5c", "~"];
        patterns.iter().any(|p| lower.contains(p))
    }
}
