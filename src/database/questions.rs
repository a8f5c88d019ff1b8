//! Question retrieval
//!
//! Builds fully populated questions (alphagram plus all of its words).
//! [`QuestionOps::questions_for_probability_range`] does it with one joined
//! scan; [`QuestionOps::questions`] issues one query per alphagram and is only
//! meant for short lists.

use sqlx::FromRow;
use tracing::{debug, instrument};

use super::models::{AsAlphagram, Question, Questions, Word, WordRow};
use super::words::WordOps;
use super::{Result, WordDb};

/// One row of the words x alphagrams join.
#[derive(Debug, Clone, FromRow)]
pub(crate) struct JoinedRow {
    #[sqlx(flatten)]
    pub word: WordRow,
    pub probability: i64,
}

/// Extension trait for question retrieval
pub trait QuestionOps {
    fn questions_for_probability_range(&self, probability_min: i64, probability_max: i64, length: i64) -> impl std::future::Future<Output = Result<Questions>> + Send;
    fn questions<A: AsAlphagram + Sync>(&self, alphagrams: &[A]) -> impl std::future::Future<Output = Result<Questions>> + Send;
}

/// Group rows that are already contiguous per alphagram into questions.
///
/// Emits one question per run of equal alphagram values, in row order. The
/// open group is flushed after the last row.
pub(crate) fn group_rows<I>(rows: I) -> Questions
where
    I: IntoIterator<Item = JoinedRow>,
{
    let mut questions = Questions::new();
    let mut current: Option<(String, i64)> = None;
    let mut words: Vec<Word> = Vec::new();

    for row in rows {
        let probability = row.probability;
        let word = Word::from(row.word);

        let same_group = matches!(&current, Some((alphagram, _)) if *alphagram == word.alphagram);
        if !same_group {
            if let Some((alphagram, prob)) = current.take() {
                questions.append(
                    Question::new(alphagram, std::mem::take(&mut words)).with_probability(Some(prob)),
                );
            }
            current = Some((word.alphagram.clone(), probability));
        }
        words.push(word);
    }

    if let Some((alphagram, prob)) = current {
        questions.append(Question::new(alphagram, words).with_probability(Some(prob)));
    }
    questions
}

impl QuestionOps for WordDb {
    /// All questions of one length within a probability range, ordered by
    /// probability ascending.
    ///
    /// Probability is a property of the alphagram, so ordering by it keeps the
    /// rows of each alphagram contiguous; the alphagram tie-breaker keeps that
    /// true even for datasets with duplicate ranks.
    #[instrument(skip(self), fields(path = %self.path().display()))]
    async fn questions_for_probability_range(
        &self,
        probability_min: i64,
        probability_max: i64,
        length: i64,
    ) -> Result<Questions> {
        let rows = sqlx::query_as::<_, JoinedRow>(
            r#"
            SELECT words.word, words.alphagram, words.definition, words.front_hooks,
                   words.back_hooks, words.inner_front_hook, words.inner_back_hook,
                   words.lexicon_symbols, alphagrams.probability
            FROM words
            INNER JOIN alphagrams ON words.alphagram = alphagrams.alphagram
            WHERE alphagrams.length = ? AND alphagrams.probability BETWEEN ? AND ?
            ORDER BY alphagrams.probability, words.alphagram
            "#,
        )
        .bind(length)
        .bind(probability_min)
        .bind(probability_max)
        .fetch_all(self.pool())
        .await?;

        let row_count = rows.len();
        let questions = group_rows(rows);
        debug!(rows = row_count, questions = questions.size(), "Grouped probability range scan");
        Ok(questions)
    }

    async fn questions<A: AsAlphagram + Sync>(&self, alphagrams: &[A]) -> Result<Questions> {
        let mut questions = Questions::new();
        for alphagram in alphagrams {
            let key = alphagram.alphagram_str();
            let words = self.words_for_alphagram(key).await?;
            questions.append(Question::new(key, words).with_probability(alphagram.known_probability()));
        }
        Ok(questions)
    }
}
