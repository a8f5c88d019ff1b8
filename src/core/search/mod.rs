//! Word Search Module
//!
//! Turns a list of search criteria into a list of quiz questions:
//!
//! - `criteria`: criterion descriptors and the validated [`SearchQuery`]
//! - `tags`: the [`TagSource`] trait plus in-memory and SQLite readers
//! - `engine`: the [`WordSearch`] orchestrator
//! - `error`: [`SearchError`], including the no-results outcome

pub mod criteria;
pub mod engine;
pub mod error;
pub mod tags;

pub use criteria::{Bounds, CriterionKind, SearchCriterion, SearchQuery, TagFilter, MAX_WORD_LENGTH};
pub use engine::{WordSearch, DEFAULT_TAG_TIMEOUT};
pub use error::{SearchError, TagSourceError};
pub use tags::{MemoryTagSource, SqliteTagSource, TagSource};
