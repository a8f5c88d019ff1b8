//! Lexical Entity Records
//!
//! Words and alphagrams as stored in a lexicon database.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Sort the letters of a word into its canonical alphagram form.
pub fn alphagrammize(word: &str) -> String {
    let mut letters: Vec<char> = word.chars().flat_map(char::to_uppercase).collect();
    letters.sort_unstable();
    letters.into_iter().collect()
}

// ============================================================================
// Word
// ============================================================================

/// One playable word and its metadata.
///
/// Text fields are never absent: missing values in the dataset become empty
/// strings when the row is converted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Word {
    pub word: String,
    pub alphagram: String,
    pub definition: String,
    pub front_hooks: String,
    pub back_hooks: String,
    pub inner_front_hook: bool,
    pub inner_back_hook: bool,
    pub lexicon_symbols: String,
}

impl Word {
    /// A bare word with no metadata; the alphagram is derived from the spelling.
    pub fn new(word: impl Into<String>) -> Self {
        let word = word.into();
        Self {
            alphagram: alphagrammize(&word),
            word,
            definition: String::new(),
            front_hooks: String::new(),
            back_hooks: String::new(),
            inner_front_hook: false,
            inner_back_hook: false,
            lexicon_symbols: String::new(),
        }
    }

    pub fn with_definition(mut self, definition: impl Into<String>) -> Self {
        self.definition = definition.into();
        self
    }

    pub fn with_hooks(mut self, front: impl Into<String>, back: impl Into<String>) -> Self {
        self.front_hooks = front.into();
        self.back_hooks = back.into();
        self
    }
}

/// Raw `words` row, nullable columns as stored.
#[derive(Debug, Clone, FromRow)]
pub struct WordRow {
    pub word: String,
    pub alphagram: String,
    pub definition: Option<String>,
    pub front_hooks: Option<String>,
    pub back_hooks: Option<String>,
    pub inner_front_hook: Option<i64>,
    pub inner_back_hook: Option<i64>,
    pub lexicon_symbols: Option<String>,
}

impl From<WordRow> for Word {
    fn from(row: WordRow) -> Self {
        Self {
            word: row.word,
            alphagram: row.alphagram,
            definition: row.definition.unwrap_or_default(),
            front_hooks: row.front_hooks.unwrap_or_default(),
            back_hooks: row.back_hooks.unwrap_or_default(),
            inner_front_hook: row.inner_front_hook == Some(1),
            inner_back_hook: row.inner_back_hook == Some(1),
            lexicon_symbols: row.lexicon_symbols.unwrap_or_default(),
        }
    }
}

// ============================================================================
// Alphagram
// ============================================================================

/// Alphagram record with its probability rank within (lexicon, length).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Alphagram {
    pub alphagram: String,
    pub probability: i64,
    pub combinations: i64,
    pub length: i64,
}

/// Anything that names an alphagram: plain strings or full records.
pub trait AsAlphagram {
    fn alphagram_str(&self) -> &str;

    /// Probability rank when the value already carries one.
    fn known_probability(&self) -> Option<i64> {
        None
    }
}

impl AsAlphagram for str {
    fn alphagram_str(&self) -> &str {
        self
    }
}

impl AsAlphagram for String {
    fn alphagram_str(&self) -> &str {
        self
    }
}

impl AsAlphagram for &str {
    fn alphagram_str(&self) -> &str {
        self
    }
}

impl AsAlphagram for Alphagram {
    fn alphagram_str(&self) -> &str {
        &self.alphagram
    }

    fn known_probability(&self) -> Option<i64> {
        Some(self.probability)
    }
}
