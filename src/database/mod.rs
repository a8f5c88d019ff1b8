//! Lexicon Database Module
//!
//! Read-only access to the per-lexicon word/alphagram SQLite datasets.
//!
//! Each lexicon ships as `<word_db_dir>/<lexicon>.db` with two tables:
//!
//! - `words(word, alphagram, definition, front_hooks, back_hooks,
//!   inner_front_hook, inner_back_hook, lexicon_symbols)`
//! - `alphagrams(alphagram, probability, combinations, length)`
//!
//! The datasets are generated elsewhere and never written here. Operations are
//! grouped into extension traits on [`WordDb`]: [`WordOps`], [`AlphagramOps`]
//! and [`QuestionOps`].

mod alphagrams;
mod lexicons;
pub mod models;
mod questions;
mod words;

use std::path::{Path, PathBuf};

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::Row;
use tracing::{debug, info};

pub use alphagrams::AlphagramOps;
pub use lexicons::LexiconStores;
pub use models::{alphagrammize, Alphagram, AsAlphagram, Question, Questions, Word};
pub use questions::QuestionOps;
#[cfg(test)]
pub(crate) use questions::{group_rows, JoinedRow};
pub use words::WordOps;
pub(crate) use words::BIND_CHUNK;

// ============================================================================
// Error Types
// ============================================================================

/// Errors from lexicon database operations
#[derive(Debug, thiserror::Error)]
pub enum WordDbError {
    /// The dataset could not be opened. Fatal for the lexicon.
    #[error("Failed to open lexicon database {path}: {reason}")]
    Open { path: PathBuf, reason: String },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

pub type Result<T> = std::result::Result<T, WordDbError>;

/// Tables every lexicon dataset must provide.
const REQUIRED_TABLES: [&str; 2] = ["words", "alphagrams"];

/// Default pool size for one lexicon.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 4;

// ============================================================================
// WordDb
// ============================================================================

/// Handle to one lexicon's dataset.
///
/// Cloning is cheap and shares the underlying pool.
#[derive(Debug, Clone)]
pub struct WordDb {
    pool: SqlitePool,
    path: PathBuf,
}

impl WordDb {
    /// Open a lexicon dataset read-only with the default pool size.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with(path, DEFAULT_MAX_CONNECTIONS).await
    }

    /// Open a lexicon dataset read-only.
    ///
    /// Fails with [`WordDbError::Open`] when the file is missing, cannot be
    /// read as SQLite, or lacks the `words`/`alphagrams` tables.
    pub async fn open_with(path: impl AsRef<Path>, max_connections: u32) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let open_err = |reason: String| WordDbError::Open {
            path: path.clone(),
            reason,
        };

        if !path.is_file() {
            return Err(open_err("file does not exist".to_string()));
        }

        let options = SqliteConnectOptions::new()
            .filename(&path)
            .read_only(true)
            .create_if_missing(false);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections.max(1))
            .connect_with(options)
            .await
            .map_err(|e| open_err(e.to_string()))?;

        let db = Self {
            pool,
            path: path.clone(),
        };
        if let Err(e) = db.verify_schema().await {
            db.close().await;
            return Err(open_err(e.to_string()));
        }

        info!(path = %db.path.display(), max_connections, "Opened lexicon database");
        Ok(db)
    }

    async fn verify_schema(&self) -> std::result::Result<(), sqlx::Error> {
        let rows = sqlx::query("SELECT name FROM sqlite_master WHERE type = 'table'")
            .fetch_all(&self.pool)
            .await?;
        let tables: Vec<String> = rows
            .iter()
            .filter_map(|row| row.try_get::<String, _>("name").ok())
            .collect();

        for required in REQUIRED_TABLES {
            if !tables.iter().any(|t| t == required) {
                return Err(sqlx::Error::Protocol(format!("missing table `{required}`")));
            }
        }
        debug!(path = %self.path.display(), "Lexicon schema verified");
        Ok(())
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Close all pooled connections.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}
