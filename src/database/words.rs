//! Word lookups
//!
//! Point and batch lookups against the `words` table.

use sqlx::{QueryBuilder, Sqlite};

use super::models::{Word, WordRow};
use super::{Result, WordDb};

/// Bound parameters per IN list.
pub(crate) const BIND_CHUNK: usize = 500;

pub(crate) const WORD_COLUMNS: &str = "word, alphagram, definition, front_hooks, back_hooks, \
     inner_front_hook, inner_back_hook, lexicon_symbols";

/// Extension trait for word lookups
pub trait WordOps {
    fn word_data(&self, word: &str) -> impl std::future::Future<Output = Result<Option<Word>>> + Send;
    fn words_data<S: AsRef<str> + Sync>(&self, words: &[S]) -> impl std::future::Future<Output = Result<Vec<Word>>> + Send;
    fn words_for_alphagram(&self, alphagram: &str) -> impl std::future::Future<Output = Result<Vec<Word>>> + Send;
}

impl WordOps for WordDb {
    async fn word_data(&self, word: &str) -> Result<Option<Word>> {
        let row = sqlx::query_as::<_, WordRow>(&format!(
            "SELECT {WORD_COLUMNS} FROM words WHERE word = ?"
        ))
        .bind(word)
        .fetch_optional(self.pool())
        .await?;
        Ok(row.map(Word::from))
    }

    /// Batch lookup. Results are ordered by spelling, not input order, and
    /// words missing from the lexicon are omitted.
    async fn words_data<S: AsRef<str> + Sync>(&self, words: &[S]) -> Result<Vec<Word>> {
        let mut found = Vec::with_capacity(words.len());
        for chunk in words.chunks(BIND_CHUNK) {
            let mut qb: QueryBuilder<Sqlite> =
                QueryBuilder::new(format!("SELECT {WORD_COLUMNS} FROM words WHERE word IN ("));
            let mut list = qb.separated(", ");
            for word in chunk {
                list.push_bind(word.as_ref().to_string());
            }
            list.push_unseparated(")");

            let rows = qb
                .build_query_as::<WordRow>()
                .fetch_all(self.pool())
                .await?;
            found.extend(rows.into_iter().map(Word::from));
        }
        found.sort_by(|a, b| a.word.cmp(&b.word));
        Ok(found)
    }

    async fn words_for_alphagram(&self, alphagram: &str) -> Result<Vec<Word>> {
        let rows = sqlx::query_as::<_, WordRow>(&format!(
            "SELECT {WORD_COLUMNS} FROM words WHERE alphagram = ?"
        ))
        .bind(alphagram)
        .fetch_all(self.pool())
        .await?;
        Ok(rows.into_iter().map(Word::from).collect())
    }
}
