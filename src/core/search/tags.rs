//! Tag Sources
//!
//! The tag store belongs to the caller; searches only read from it through
//! [`TagSource`]. Two readers are provided: an in-process map and a reader
//! over an `alphagram_tags(user, lexicon, tag, alphagram)` SQLite table.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use sqlx::sqlite::SqlitePool;
use sqlx::{QueryBuilder, Sqlite};
use tokio::sync::RwLock;

use super::error::TagSourceError;
use crate::database::BIND_CHUNK;

/// Read access to user-owned alphagram tags.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TagSource: Send + Sync {
    /// Alphagrams in `lexicon` that `user` tagged with any of `tags`.
    async fn matching_alphagrams(
        &self,
        user: &str,
        lexicon: &str,
        tags: &[String],
    ) -> Result<HashSet<String>, TagSourceError>;
}

// ============================================================================
// In-memory source
// ============================================================================

type TagKey = (String, String);

/// Tags held in process, keyed by (user, lexicon).
#[derive(Debug, Default)]
pub struct MemoryTagSource {
    tags: RwLock<HashMap<TagKey, HashMap<String, HashSet<String>>>>,
}

impl MemoryTagSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach `tag` to `alphagram` for `user` in `lexicon`.
    pub async fn tag(&self, user: &str, lexicon: &str, tag: &str, alphagram: &str) {
        self.tags
            .write()
            .await
            .entry((user.to_string(), lexicon.to_string()))
            .or_default()
            .entry(tag.to_string())
            .or_default()
            .insert(alphagram.to_string());
    }

    /// Number of (tag, alphagram) assignments held.
    pub async fn len(&self) -> usize {
        self.tags
            .read()
            .await
            .values()
            .flat_map(|by_tag| by_tag.values())
            .map(HashSet::len)
            .sum()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl TagSource for MemoryTagSource {
    async fn matching_alphagrams(
        &self,
        user: &str,
        lexicon: &str,
        tags: &[String],
    ) -> Result<HashSet<String>, TagSourceError> {
        let store = self.tags.read().await;
        let Some(by_tag) = store.get(&(user.to_string(), lexicon.to_string())) else {
            return Ok(HashSet::new());
        };
        Ok(tags
            .iter()
            .filter_map(|t| by_tag.get(t))
            .flatten()
            .cloned()
            .collect())
    }
}

// ============================================================================
// SQLite source
// ============================================================================

/// Reads tag assignments from an externally owned database.
#[derive(Debug, Clone)]
pub struct SqliteTagSource {
    pool: SqlitePool,
}

impl SqliteTagSource {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TagSource for SqliteTagSource {
    async fn matching_alphagrams(
        &self,
        user: &str,
        lexicon: &str,
        tags: &[String],
    ) -> Result<HashSet<String>, TagSourceError> {
        if tags.is_empty() {
            return Ok(HashSet::new());
        }

        let mut alphagrams = HashSet::new();
        for chunk in tags.chunks(BIND_CHUNK) {
            let mut qb: QueryBuilder<Sqlite> =
                QueryBuilder::new("SELECT DISTINCT alphagram FROM alphagram_tags WHERE user = ");
            qb.push_bind(user.to_string());
            qb.push(" AND lexicon = ");
            qb.push_bind(lexicon.to_string());
            qb.push(" AND tag IN (");
            let mut list = qb.separated(", ");
            for tag in chunk {
                list.push_bind(tag.clone());
            }
            list.push_unseparated(")");

            let found: Vec<String> = qb
                .build_query_scalar::<String>()
                .fetch_all(&self.pool)
                .await?;
            alphagrams.extend(found);
        }
        Ok(alphagrams)
    }
}
