//! Lexicon Database Tests
