//! Question Records
//!
//! A question is one alphagram plus every word that spells it. `Questions`
//! keeps them in retrieval order and knows how to serialize for the client.

use std::collections::HashSet;

use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use super::lexical::Word;

// ============================================================================
// Question
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub alphagram: String,
    /// Unknown when the question was built from a bare alphagram string.
    pub probability: Option<i64>,
    pub answers: Vec<Word>,
}

/// Full client form of one answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerFull {
    pub word: String,
    #[serde(rename = "def")]
    pub definition: String,
    #[serde(rename = "f_hooks")]
    pub front_hooks: String,
    #[serde(rename = "b_hooks")]
    pub back_hooks: String,
    pub symbols: String,
    #[serde(rename = "f_inner")]
    pub inner_front_hook: bool,
    #[serde(rename = "b_inner")]
    pub inner_back_hook: bool,
}

/// Full client form of a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionFull {
    pub question: String,
    pub probability: Option<i64>,
    pub answers: Vec<AnswerFull>,
}

/// Minimal client form: alphagram and bare answer words.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionMinimal {
    pub q: String,
    pub a: Vec<String>,
}

impl Question {
    pub fn new(alphagram: impl Into<String>, answers: Vec<Word>) -> Self {
        Self {
            alphagram: alphagram.into(),
            probability: None,
            answers,
        }
    }

    pub fn with_probability(mut self, probability: Option<i64>) -> Self {
        self.probability = probability;
        self
    }

    /// Replace the answers with metadata-free words.
    pub fn set_answers_from_word_list<S: AsRef<str>>(&mut self, words: &[S]) {
        self.answers = words.iter().map(|w| Word::new(w.as_ref())).collect();
    }

    pub fn to_full(&self) -> QuestionFull {
        QuestionFull {
            question: self.alphagram.clone(),
            probability: self.probability,
            answers: self
                .answers
                .iter()
                .map(|w| AnswerFull {
                    word: w.word.clone(),
                    definition: w.definition.clone(),
                    front_hooks: w.front_hooks.clone(),
                    back_hooks: w.back_hooks.clone(),
                    symbols: w.lexicon_symbols.clone(),
                    inner_front_hook: w.inner_front_hook,
                    inner_back_hook: w.inner_back_hook,
                })
                .collect(),
        }
    }

    pub fn to_minimal(&self) -> QuestionMinimal {
        QuestionMinimal {
            q: self.alphagram.clone(),
            a: self.answers.iter().map(|w| w.word.clone()).collect(),
        }
    }
}

// ============================================================================
// Questions
// ============================================================================

/// Ordered collection of questions, in retrieval order unless shuffled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Questions {
    questions: Vec<Question>,
}

impl Questions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, question: Question) {
        self.questions.push(question);
    }

    pub fn extend(&mut self, other: Questions) {
        self.questions.extend(other.questions);
    }

    pub fn size(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn clear(&mut self) {
        self.questions.clear();
    }

    pub fn shuffle(&mut self) {
        self.questions.shuffle(&mut rand::thread_rng());
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Question> {
        self.questions.iter()
    }

    /// Alphagram strings in collection order.
    pub fn alphagram_strings(&self) -> Vec<String> {
        self.questions.iter().map(|q| q.alphagram.clone()).collect()
    }

    /// Drop every question whose alphagram is not in `keep`; order is preserved.
    pub fn retain_alphagrams(&mut self, keep: &HashSet<String>) {
        self.questions.retain(|q| keep.contains(&q.alphagram));
    }

    pub fn to_full(&self) -> Vec<QuestionFull> {
        self.questions.iter().map(Question::to_full).collect()
    }

    pub fn to_minimal(&self) -> Vec<QuestionMinimal> {
        self.questions.iter().map(Question::to_minimal).collect()
    }

    /// Minimal form as JSON text.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.to_minimal())
    }
}

impl From<Vec<Question>> for Questions {
    fn from(questions: Vec<Question>) -> Self {
        Self { questions }
    }
}

impl IntoIterator for Questions {
    type Item = Question;
    type IntoIter = std::vec::IntoIter<Question>;

    fn into_iter(self) -> Self::IntoIter {
        self.questions.into_iter()
    }
}

impl<'a> IntoIterator for &'a Questions {
    type Item = &'a Question;
    type IntoIter = std::slice::Iter<'a, Question>;

    fn into_iter(self) -> Self::IntoIter {
        self.questions.iter()
    }
}
