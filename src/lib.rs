/// Alphagram Search - quiz generation engine for word-anagram games
///
/// Core library providing per-lexicon word/alphagram stores, composable
/// search criteria, and tag-filtered question retrieval.

pub mod config;
pub mod core;
pub mod database;

#[cfg(test)]
mod tests;

pub use crate::core::search::{SearchCriterion, SearchError, SearchQuery, WordSearch};
pub use crate::database::{Alphagram, LexiconStores, Question, Questions, Word, WordDb, WordDbError};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
