//! Search Criteria
//!
//! Composable query descriptors. A query is a list of criteria; different
//! kinds are ANDed together, and the tags inside one tag filter are ORed.
//! Building criteria performs no I/O. [`SearchQuery::from_criteria`] checks the
//! list and produces the form the orchestrator executes.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::{Result, SearchError};
use crate::core::input_validator::InputValidator;

// ============================================================================
// Criteria
// ============================================================================

/// Inclusive integer range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: i64,
    pub max: i64,
}

impl Bounds {
    pub fn contains(&self, value: i64) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

/// Alphagrams tagged by `user` with any of `tags`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagFilter {
    pub tags: Vec<String>,
    pub user: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SearchCriterion {
    Lexicon { name: String },
    Length(Bounds),
    ProbabilityRange(Bounds),
    HasTags(TagFilter),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CriterionKind {
    Lexicon,
    Length,
    ProbabilityRange,
    HasTags,
}

impl CriterionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CriterionKind::Lexicon => "lexicon",
            CriterionKind::Length => "length",
            CriterionKind::ProbabilityRange => "probability range",
            CriterionKind::HasTags => "tag filter",
        }
    }
}

impl SearchCriterion {
    pub fn lexicon(name: impl Into<String>) -> Self {
        SearchCriterion::Lexicon { name: name.into() }
    }

    /// Word length range; `min == max` selects one length.
    pub fn length(min: i64, max: i64) -> Self {
        SearchCriterion::Length(Bounds { min, max })
    }

    pub fn probability_range(min: i64, max: i64) -> Self {
        SearchCriterion::ProbabilityRange(Bounds { min, max })
    }

    /// Tag filter. Duplicate labels are dropped, first occurrence wins.
    pub fn has_tags<S: AsRef<str>>(tags: &[S], user: impl Into<String>) -> Self {
        let mut unique: Vec<String> = Vec::with_capacity(tags.len());
        for tag in tags {
            if !unique.iter().any(|t| t == tag.as_ref()) {
                unique.push(tag.as_ref().to_string());
            }
        }
        SearchCriterion::HasTags(TagFilter {
            tags: unique,
            user: user.into(),
        })
    }

    pub fn kind(&self) -> CriterionKind {
        match self {
            SearchCriterion::Lexicon { .. } => CriterionKind::Lexicon,
            SearchCriterion::Length(_) => CriterionKind::Length,
            SearchCriterion::ProbabilityRange(_) => CriterionKind::ProbabilityRange,
            SearchCriterion::HasTags(_) => CriterionKind::HasTags,
        }
    }
}

// ============================================================================
// Validated Query
// ============================================================================

/// A checked criterion list, ready to execute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    pub lexicon: String,
    pub length: Bounds,
    pub probability: Option<Bounds>,
    pub tags: Option<TagFilter>,
}

fn set_once<T>(slot: &mut Option<T>, value: T, kind: CriterionKind) -> Result<()> {
    if slot.is_some() {
        return Err(SearchError::InvalidInput(format!(
            "Only one {} criterion is allowed",
            kind.as_str()
        )));
    }
    *slot = Some(value);
    Ok(())
}

/// Longest word length any lexicon carries.
pub const MAX_WORD_LENGTH: i64 = 15;

fn check_bounds(bounds: Bounds, kind: CriterionKind) -> Result<Bounds> {
    let too_long = kind == CriterionKind::Length && bounds.max > MAX_WORD_LENGTH;
    if bounds.min < 1 || bounds.min > bounds.max || too_long {
        return Err(SearchError::InvalidInput(format!(
            "Invalid {} {} - {}",
            kind.as_str(),
            bounds.min,
            bounds.max
        )));
    }
    Ok(bounds)
}

impl SearchQuery {
    /// Validate a criterion list.
    ///
    /// Requires exactly one lexicon and one length criterion, allows at most
    /// one probability range and one tag filter.
    pub fn from_criteria(criteria: &[SearchCriterion]) -> Result<Self> {
        let validator = InputValidator::new();
        let mut lexicon = None;
        let mut length = None;
        let mut probability = None;
        let mut tags = None;

        for criterion in criteria {
            let kind = criterion.kind();
            match criterion {
                SearchCriterion::Lexicon { name } => {
                    validator.validate_lexicon_name(name)?;
                    set_once(&mut lexicon, name.clone(), kind)?;
                }
                SearchCriterion::Length(bounds) => {
                    set_once(&mut length, check_bounds(*bounds, kind)?, kind)?;
                }
                SearchCriterion::ProbabilityRange(bounds) => {
                    set_once(&mut probability, check_bounds(*bounds, kind)?, kind)?;
                }
                SearchCriterion::HasTags(filter) => {
                    if filter.tags.is_empty() {
                        return Err(SearchError::InvalidInput(
                            "Tag filter needs at least one tag".to_string(),
                        ));
                    }
                    validator.validate_user(&filter.user)?;
                    for tag in &filter.tags {
                        validator.validate_tag(tag)?;
                    }
                    set_once(&mut tags, filter.clone(), kind)?;
                }
            }
        }

        let lexicon = lexicon.ok_or_else(|| {
            SearchError::InvalidInput("A lexicon criterion is required".to_string())
        })?;
        let length = length.ok_or_else(|| {
            SearchError::InvalidInput("A length criterion is required".to_string())
        })?;

        Ok(Self {
            lexicon,
            length,
            probability,
            tags,
        })
    }

    /// Human-readable list name, e.g. `CSW15 8s (523 - 784)`.
    pub fn display_name(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ", self.lexicon)?;
        if self.length.min == self.length.max {
            write!(f, "{}s", self.length.min)?;
        } else {
            write!(f, "{}-{}s", self.length.min, self.length.max)?;
        }
        if let Some(p) = &self.probability {
            write!(f, " ({} - {})", p.min, p.max)?;
        }
        if let Some(t) = &self.tags {
            write!(f, " [{}]", t.tags.join(", "))?;
        }
        Ok(())
    }
}
