//! Lexicon registry
//!
//! Opens each lexicon's dataset once and shares the pooled handle between
//! queries.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::info;

use super::{Result, WordDb, DEFAULT_MAX_CONNECTIONS};

/// Lazily opened lexicon databases, keyed by lexicon name.
#[derive(Debug)]
pub struct LexiconStores {
    word_db_dir: PathBuf,
    max_connections: u32,
    stores: RwLock<HashMap<String, Arc<WordDb>>>,
}

impl LexiconStores {
    pub fn new(word_db_dir: impl Into<PathBuf>) -> Self {
        Self::with_max_connections(word_db_dir, DEFAULT_MAX_CONNECTIONS)
    }

    pub fn with_max_connections(word_db_dir: impl Into<PathBuf>, max_connections: u32) -> Self {
        Self {
            word_db_dir: word_db_dir.into(),
            max_connections,
            stores: RwLock::new(HashMap::new()),
        }
    }

    pub fn word_db_dir(&self) -> &Path {
        &self.word_db_dir
    }

    /// Dataset path for a lexicon. The name must already be validated.
    pub fn path_for(&self, lexicon: &str) -> PathBuf {
        self.word_db_dir.join(format!("{lexicon}.db"))
    }

    /// Get the store for a lexicon, opening it on first use.
    ///
    /// A failed open is not cached; the next call tries again. Concurrent
    /// first calls may each open the file; one handle is kept.
    pub async fn get(&self, lexicon: &str) -> Result<Arc<WordDb>> {
        if let Some(db) = self.stores.read().await.get(lexicon) {
            return Ok(Arc::clone(db));
        }

        // Open with no lock held so lookups on other lexicons are never
        // queued behind a slow open.
        let opened = Arc::new(WordDb::open_with(self.path_for(lexicon), self.max_connections).await?);

        let (db, duplicate) = match self.stores.write().await.entry(lexicon.to_string()) {
            Entry::Occupied(entry) => (Arc::clone(entry.get()), Some(opened)),
            Entry::Vacant(entry) => (Arc::clone(entry.insert(opened)), None),
        };

        match duplicate {
            // Another task registered this lexicon first.
            Some(extra) => extra.close().await,
            None => info!(lexicon, "Registered lexicon store"),
        }
        Ok(db)
    }

    /// Names of the lexicons opened so far.
    pub async fn open_lexicons(&self) -> Vec<String> {
        let mut names: Vec<String> = self.stores.read().await.keys().cloned().collect();
        names.sort();
        names
    }

    /// Close every open store and forget it.
    pub async fn close_all(&self) {
        let drained: Vec<Arc<WordDb>> = self.stores.write().await.drain().map(|(_, db)| db).collect();
        for db in drained {
            db.close().await;
        }
    }
}
