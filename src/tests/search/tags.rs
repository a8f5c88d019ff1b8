//! Tag Source Tests

use std::collections::HashSet;
use std::sync::Arc;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tempfile::TempDir;

use crate::core::search::{MemoryTagSource, SearchCriterion, SqliteTagSource, TagSource, WordSearch};
use crate::tests::common::{create_some_tags, LexiconFixture};

fn labels(tags: &[&str]) -> Vec<String> {
    tags.iter().map(|t| t.to_string()).collect()
}

fn set(alphagrams: &[&str]) -> HashSet<String> {
    alphagrams.iter().map(|a| a.to_string()).collect()
}

/// A tag database in the layout the tag store writes.
async fn create_tag_db(dir: &TempDir) -> SqlitePool {
    let options = SqliteConnectOptions::new()
        .filename(dir.path().join("tags.db"))
        .create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .expect("Failed to create tag database");

    sqlx::raw_sql(
        r#"
        CREATE TABLE alphagram_tags (
            user TEXT NOT NULL,
            lexicon TEXT NOT NULL,
            tag TEXT NOT NULL,
            alphagram TEXT NOT NULL
        );
        INSERT INTO alphagram_tags VALUES
            ('cesar', 'CSW15', 'D4', 'AELMOSTU'),
            ('cesar', 'CSW15', 'D1', 'EIMNOPRS'),
            ('cesar', 'America', 'D5', 'AEILT'),
            ('cesar', 'America', 'D5', 'CEILNOPR'),
            ('cesar', 'America', 'D2', 'CINOZ'),
            ('cesar', 'America', 'D3', 'AEEGLNOT'),
            ('user_4113', 'America', 'D3', 'DEHIOPRT'),
            ('user_4113', 'America', 'D4', 'CEILNOPR');
        "#,
    )
    .execute(&pool)
    .await
    .expect("Failed to seed tag database");
    pool
}

#[tokio::test]
async fn test_memory_source_scoped_by_user_and_lexicon() {
    let tags = MemoryTagSource::new();
    create_some_tags(&tags).await;
    assert_eq!(tags.len().await, 8);

    let found = tags
        .matching_alphagrams("cesar", "America", &labels(&["D5"]))
        .await
        .expect("Lookup failed");
    assert_eq!(found, set(&["AEILT", "CEILNOPR"]));

    let found = tags
        .matching_alphagrams("user_4113", "America", &labels(&["D5"]))
        .await
        .expect("Lookup failed");
    assert!(found.is_empty());

    let found = tags
        .matching_alphagrams("cesar", "CSW15", &labels(&["D5"]))
        .await
        .expect("Lookup failed");
    assert!(found.is_empty());
}

#[tokio::test]
async fn test_memory_source_ors_tags() {
    let tags = MemoryTagSource::new();
    assert!(tags.is_empty().await);
    create_some_tags(&tags).await;

    let found = tags
        .matching_alphagrams("cesar", "America", &labels(&["D2", "D3", "D4", "D5"]))
        .await
        .expect("Lookup failed");
    assert_eq!(found, set(&["AEILT", "CEILNOPR", "CINOZ", "AEEGLNOT"]));
}

#[tokio::test]
async fn test_memory_source_retagging_is_idempotent() {
    let tags = MemoryTagSource::new();
    tags.tag("cesar", "CSW15", "D4", "AELMOSTU").await;
    tags.tag("cesar", "CSW15", "D4", "AELMOSTU").await;
    assert_eq!(tags.len().await, 1);
}

#[tokio::test]
async fn test_sqlite_source_matches_memory_source() {
    let dir = TempDir::new().expect("Failed to create temp directory");
    let pool = create_tag_db(&dir).await;
    let sqlite = SqliteTagSource::new(pool);
    let memory = MemoryTagSource::new();
    create_some_tags(&memory).await;

    let cases: [(&str, &str, &[&str]); 4] = [
        ("cesar", "America", &["D2", "D5"]),
        ("cesar", "CSW15", &["D4"]),
        ("user_4113", "America", &["D3", "D4"]),
        ("cesar", "America", &["D9"]),
    ];
    for (user, lexicon, tag_labels) in cases {
        let from_db = sqlite
            .matching_alphagrams(user, lexicon, &labels(tag_labels))
            .await
            .expect("Lookup failed");
        let from_memory = memory
            .matching_alphagrams(user, lexicon, &labels(tag_labels))
            .await
            .expect("Lookup failed");
        assert_eq!(from_db, from_memory, "{user}/{lexicon}/{tag_labels:?}");
    }
}

#[tokio::test]
async fn test_sqlite_source_empty_tag_list() {
    let dir = TempDir::new().expect("Failed to create temp directory");
    let sqlite = SqliteTagSource::new(create_tag_db(&dir).await);

    let found = sqlite
        .matching_alphagrams("cesar", "America", &[])
        .await
        .expect("Lookup failed");
    assert!(found.is_empty());
}

#[tokio::test]
async fn test_sqlite_source_long_tag_list() {
    let dir = TempDir::new().expect("Failed to create temp directory");
    let sqlite = SqliteTagSource::new(create_tag_db(&dir).await);

    // More labels than SQLite accepts as bound parameters in one statement.
    let mut tag_labels: Vec<String> = (0..40_000).map(|i| format!("T{i}")).collect();
    tag_labels.push("D5".to_string());
    tag_labels.insert(0, "D2".to_string());

    let found = sqlite
        .matching_alphagrams("cesar", "America", &tag_labels)
        .await
        .expect("Lookup failed");
    assert_eq!(found, set(&["AEILT", "CEILNOPR", "CINOZ"]));
}

#[tokio::test]
async fn test_sqlite_source_missing_table_is_error() {
    let dir = TempDir::new().expect("Failed to create temp directory");
    let options = SqliteConnectOptions::new()
        .filename(dir.path().join("empty.db"))
        .create_if_missing(true);
    let pool = SqlitePool::connect_with(options)
        .await
        .expect("Failed to create database");
    let sqlite = SqliteTagSource::new(pool);

    let result = sqlite
        .matching_alphagrams("cesar", "America", &labels(&["D5"]))
        .await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_search_with_sqlite_tags() {
    let fixture = LexiconFixture::standard().await;
    let dir = TempDir::new().expect("Failed to create temp directory");
    let sqlite = SqliteTagSource::new(create_tag_db(&dir).await);
    let search = WordSearch::new(fixture.stores(), Arc::new(sqlite));

    let questions = search
        .search(&[
            SearchCriterion::lexicon("America"),
            SearchCriterion::length(8, 8),
            SearchCriterion::has_tags(&["D2", "D3", "D4", "D5"], "cesar"),
        ])
        .await
        .expect("Search failed");
    assert_eq!(questions.alphagram_strings(), vec!["AEEGLNOT", "CEILNOPR"]);
}
