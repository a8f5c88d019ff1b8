//! Alphagram lookups
//!
//! Probability-rank lookups and scans against the `alphagrams` table.

use serde_json::Value;
use sqlx::{QueryBuilder, Sqlite};
use tracing::warn;

use super::models::Alphagram;
use super::words::BIND_CHUNK;
use super::{Result, WordDb, WordDbError};

const ALPHAGRAM_COLUMNS: &str = "alphagram, probability, combinations, length";

/// Extension trait for alphagram lookups
pub trait AlphagramOps {
    fn alphagram_data(&self, alphagram: &str) -> impl std::future::Future<Output = Result<Option<Alphagram>>> + Send;
    fn alphagrams_data<S: AsRef<str> + Sync>(&self, alphagrams: &[S]) -> impl std::future::Future<Output = Result<Vec<Alphagram>>> + Send;
    fn probability(&self, alphagram: &str) -> impl std::future::Future<Output = Result<i64>> + Send;
    fn alphagrams_by_length(&self, length: i64) -> impl std::future::Future<Output = Result<Vec<Alphagram>>> + Send;
    fn alphagrams_by_probability_range(&self, probability_min: i64, probability_max: i64, length: i64) -> impl std::future::Future<Output = Result<Vec<Alphagram>>> + Send;
    fn alphagrams_by_probability_list(&self, probabilities: &[Value], length: i64) -> impl std::future::Future<Output = Result<Vec<Alphagram>>> + Send;
}

/// Validate an untrusted probability list: every element must be a JSON
/// integer. Floats, numeric strings, booleans and nulls are rejected.
pub fn parse_probability_list(values: &[Value]) -> Result<Vec<i64>> {
    values
        .iter()
        .map(|v| match v {
            Value::Number(n) if n.is_i64() || n.is_u64() => n.as_i64().ok_or_else(|| {
                WordDbError::InvalidInput(format!("Probability out of range: {n}"))
            }),
            other => Err(WordDbError::InvalidInput(format!(
                "Every probability must be an integer, got {other}"
            ))),
        })
        .collect()
}

impl AlphagramOps for WordDb {
    async fn alphagram_data(&self, alphagram: &str) -> Result<Option<Alphagram>> {
        let record = sqlx::query_as::<_, Alphagram>(&format!(
            "SELECT {ALPHAGRAM_COLUMNS} FROM alphagrams WHERE alphagram = ?"
        ))
        .bind(alphagram)
        .fetch_optional(self.pool())
        .await?;
        Ok(record)
    }

    /// Batch lookup ordered by (length, probability). Unknown alphagrams are
    /// omitted.
    async fn alphagrams_data<S: AsRef<str> + Sync>(&self, alphagrams: &[S]) -> Result<Vec<Alphagram>> {
        let mut found = Vec::with_capacity(alphagrams.len());
        for chunk in alphagrams.chunks(BIND_CHUNK) {
            let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new(format!(
                "SELECT {ALPHAGRAM_COLUMNS} FROM alphagrams WHERE alphagram IN ("
            ));
            let mut list = qb.separated(", ");
            for alphagram in chunk {
                list.push_bind(alphagram.as_ref().to_string());
            }
            list.push_unseparated(")");

            found.extend(
                qb.build_query_as::<Alphagram>()
                    .fetch_all(self.pool())
                    .await?,
            );
        }
        found.sort_by(|a, b| {
            (a.length, a.probability, &a.alphagram).cmp(&(b.length, b.probability, &b.alphagram))
        });
        Ok(found)
    }

    /// Probability rank of an alphagram.
    ///
    /// Alphagrams with blank placeholders have no row and yield
    /// [`WordDbError::NotFound`].
    async fn probability(&self, alphagram: &str) -> Result<i64> {
        let probability: Option<i64> =
            sqlx::query_scalar("SELECT probability FROM alphagrams WHERE alphagram = ?")
                .bind(alphagram)
                .fetch_optional(self.pool())
                .await?;
        probability.ok_or_else(|| WordDbError::NotFound(format!("alphagram {alphagram}")))
    }

    async fn alphagrams_by_length(&self, length: i64) -> Result<Vec<Alphagram>> {
        let records = sqlx::query_as::<_, Alphagram>(&format!(
            "SELECT {ALPHAGRAM_COLUMNS} FROM alphagrams WHERE length = ? ORDER BY probability"
        ))
        .bind(length)
        .fetch_all(self.pool())
        .await?;
        Ok(records)
    }

    async fn alphagrams_by_probability_range(
        &self,
        probability_min: i64,
        probability_max: i64,
        length: i64,
    ) -> Result<Vec<Alphagram>> {
        let records = sqlx::query_as::<_, Alphagram>(&format!(
            "SELECT {ALPHAGRAM_COLUMNS} FROM alphagrams \
             WHERE length = ? AND probability BETWEEN ? AND ? ORDER BY probability"
        ))
        .bind(length)
        .bind(probability_min)
        .bind(probability_max)
        .fetch_all(self.pool())
        .await?;
        Ok(records)
    }

    async fn alphagrams_by_probability_list(&self, probabilities: &[Value], length: i64) -> Result<Vec<Alphagram>> {
        let probabilities = parse_probability_list(probabilities).inspect_err(|e| {
            warn!(error = %e, "Rejected probability list");
        })?;
        if probabilities.is_empty() {
            return Ok(Vec::new());
        }

        let mut found = Vec::with_capacity(probabilities.len());
        for chunk in probabilities.chunks(BIND_CHUNK) {
            let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new(format!(
                "SELECT {ALPHAGRAM_COLUMNS} FROM alphagrams WHERE length = "
            ));
            qb.push_bind(length);
            qb.push(" AND probability IN (");
            let mut list = qb.separated(", ");
            for probability in chunk {
                list.push_bind(*probability);
            }
            list.push_unseparated(")");

            found.extend(
                qb.build_query_as::<Alphagram>()
                    .fetch_all(self.pool())
                    .await?,
            );
        }
        found.sort_by_key(|a| a.probability);
        Ok(found)
    }
}
