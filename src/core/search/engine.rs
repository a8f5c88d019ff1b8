//! Word Search Orchestrator
//!
//! Executes one criterion list end to end: validate, resolve the lexicon
//! store, scan, filter by tags, and refuse empty results.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, instrument};

use super::criteria::{Bounds, SearchCriterion, SearchQuery, TagFilter};
use super::error::{Result, SearchError};
use super::tags::TagSource;
use crate::config::AppConfig;
use crate::database::{AlphagramOps, LexiconStores, QuestionOps, Questions, WordDb};

/// Default bound on a tag source call.
pub const DEFAULT_TAG_TIMEOUT: Duration = Duration::from_secs(5);

/// Probability ceiling used when a query has no probability criterion.
const PROBABILITY_UNBOUNDED: i64 = i64::MAX;

/// Search orchestrator over a set of lexicon stores and a tag source.
pub struct WordSearch {
    stores: Arc<LexiconStores>,
    tags: Arc<dyn TagSource>,
    tag_timeout: Duration,
}

impl WordSearch {
    pub fn new(stores: Arc<LexiconStores>, tags: Arc<dyn TagSource>) -> Self {
        Self {
            stores,
            tags,
            tag_timeout: DEFAULT_TAG_TIMEOUT,
        }
    }

    /// Build from configuration: store directory, pool size and tag timeout.
    pub fn from_config(config: &AppConfig, tags: Arc<dyn TagSource>) -> Self {
        let stores = LexiconStores::with_max_connections(
            config.word_db_dir(),
            config.words.max_connections,
        );
        Self::new(Arc::new(stores), tags).with_tag_timeout(config.tag_timeout())
    }

    pub fn with_tag_timeout(mut self, timeout: Duration) -> Self {
        self.tag_timeout = timeout;
        self
    }

    pub fn stores(&self) -> &Arc<LexiconStores> {
        &self.stores
    }

    /// Run a search.
    ///
    /// With a probability range the result is in probability order, one
    /// length at a time in ascending length. Tag-only queries are ordered by
    /// (length, probability, alphagram). An empty result is
    /// [`SearchError::NoResults`].
    #[instrument(skip_all, fields(criteria = criteria.len()))]
    pub async fn search(&self, criteria: &[SearchCriterion]) -> Result<Questions> {
        let query = SearchQuery::from_criteria(criteria)?;
        self.execute(&query).await
    }

    /// Run an already validated query.
    #[instrument(skip_all, fields(query = %query))]
    pub async fn execute(&self, query: &SearchQuery) -> Result<Questions> {
        let db = self.stores.get(&query.lexicon).await?;

        let questions = match (&query.probability, &query.tags) {
            (Some(probability), tags) => {
                let mut questions = scan_lengths(&db, query.length, *probability).await?;
                if let Some(filter) = tags {
                    let tagged = self.tagged_alphagrams(&query.lexicon, filter).await?;
                    let before = questions.size();
                    questions.retain_alphagrams(&tagged);
                    debug!(before, after = questions.size(), tagged = tagged.len(), "Applied tag filter");
                }
                questions
            }
            (None, Some(filter)) => {
                let tagged = self.tagged_alphagrams(&query.lexicon, filter).await?;
                questions_for_tagged(&db, query.length, tagged).await?
            }
            (None, None) => {
                let everything = Bounds {
                    min: 1,
                    max: PROBABILITY_UNBOUNDED,
                };
                scan_lengths(&db, query.length, everything).await?
            }
        };

        if questions.is_empty() {
            info!("Search returned no results");
            return Err(SearchError::NoResults);
        }
        info!(questions = questions.size(), "Search complete");
        Ok(questions)
    }

    /// Ask the tag source for matching alphagrams, bounded by the timeout.
    async fn tagged_alphagrams(&self, lexicon: &str, filter: &TagFilter) -> Result<HashSet<String>> {
        let lookup = self
            .tags
            .matching_alphagrams(&filter.user, lexicon, &filter.tags);
        let tagged = tokio::time::timeout(self.tag_timeout, lookup)
            .await
            .map_err(|_| SearchError::TagTimeout(self.tag_timeout))??;
        debug!(user = %filter.user, tags = ?filter.tags, matched = tagged.len(), "Resolved tags");
        Ok(tagged)
    }
}

/// Grouped probability scan over every length in `lengths`, ascending.
async fn scan_lengths(db: &WordDb, lengths: Bounds, probability: Bounds) -> Result<Questions> {
    let mut questions = Questions::new();
    for length in lengths.min..=lengths.max {
        questions.extend(
            db.questions_for_probability_range(probability.min, probability.max, length)
                .await?,
        );
    }
    Ok(questions)
}

/// Questions for a tagged set. Alphagrams the store does not know, or outside
/// the length range, are dropped.
async fn questions_for_tagged(db: &WordDb, lengths: Bounds, tagged: HashSet<String>) -> Result<Questions> {
    if tagged.is_empty() {
        return Ok(Questions::new());
    }
    let tagged: Vec<String> = tagged.into_iter().collect();
    // alphagrams_data returns (length, probability) order.
    let records: Vec<_> = db
        .alphagrams_data(&tagged)
        .await?
        .into_iter()
        .filter(|a| lengths.contains(a.length))
        .collect();
    Ok(db.questions(&records).await?)
}
