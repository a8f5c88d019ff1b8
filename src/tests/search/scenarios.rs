//! End-to-end search scenarios over the fixture lexicons.

use std::sync::Arc;

use crate::core::search::{MemoryTagSource, SearchCriterion, SearchError};
use crate::database::models::AnswerFull;
use crate::tests::common::{create_some_tags, massive_entries, LexiconFixture, SOULMATE_DEFINITION};

async fn tagged_fixture() -> (LexiconFixture, Arc<MemoryTagSource>) {
    let fixture = LexiconFixture::standard().await;
    let tags = Arc::new(MemoryTagSource::new());
    create_some_tags(&tags).await;
    (fixture, tags)
}

#[tokio::test]
async fn test_tag_search() {
    let (fixture, tags) = tagged_fixture().await;
    let search = fixture.search(tags);

    let questions = search
        .search(&[
            SearchCriterion::lexicon("CSW15"),
            SearchCriterion::length(8, 8),
            SearchCriterion::has_tags(&["D4"], "cesar"),
        ])
        .await
        .expect("Search failed");

    assert_eq!(questions.size(), 1);
    let full = questions.to_full();
    assert_eq!(full[0].question, "AELMOSTU");
    assert_eq!(full[0].probability, Some(2477));
    assert_eq!(
        full[0].answers,
        vec![AnswerFull {
            word: "SOULMATE".to_string(),
            definition: SOULMATE_DEFINITION.to_string(),
            front_hooks: String::new(),
            back_hooks: "S".to_string(),
            symbols: String::new(),
            inner_front_hook: false,
            inner_back_hook: false,
        }]
    );
    assert!(!full[0].answers[0].definition.is_empty());
}

#[tokio::test]
async fn test_multiple_tags_are_ored() {
    let (fixture, tags) = tagged_fixture().await;
    let search = fixture.search(tags);

    let questions = search
        .search(&[
            SearchCriterion::lexicon("America"),
            SearchCriterion::length(5, 5),
            SearchCriterion::has_tags(&["D2", "D5"], "cesar"),
        ])
        .await
        .expect("Search failed");

    // CEILNOPR is tagged D5 too, but has 8 letters.
    assert_eq!(questions.alphagram_strings(), vec!["AEILT", "CINOZ"]);
}

#[tokio::test]
async fn test_tag_list() {
    let (fixture, tags) = tagged_fixture().await;
    let search = fixture.search(tags);

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

#[tokio::test]
async fn test_tags_belong_to_one_user() {
    let (fixture, tags) = tagged_fixture().await;
    let search = fixture.search(tags);

    let questions = search
        .search(&[
            SearchCriterion::lexicon("America"),
            SearchCriterion::length(8, 8),
            SearchCriterion::has_tags(&["D3", "D4"], "user_4113"),
        ])
        .await
        .expect("Search failed");

    assert_eq!(questions.alphagram_strings(), vec!["CEILNOPR", "DEHIOPRT"]);
}

#[tokio::test]
async fn test_tag_search_no_results() {
    let (fixture, tags) = tagged_fixture().await;
    let search = fixture.search(tags);

    let err = search
        .search(&[
            SearchCriterion::lexicon("America"),
            SearchCriterion::length(8, 8),
            SearchCriterion::has_tags(&["D4"], "cesar"),
        ])
        .await
        .unwrap_err();

    assert!(err.is_no_results(), "got {err:?}");
    assert_eq!(err.to_string(), "Query returns no results.");
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn test_massive_probability_and_tag_search() {
    let entries = massive_entries();
    let fixture = LexiconFixture::new(&[("America", entries.clone())]).await;
    let tags = Arc::new(MemoryTagSource::new());
    let search = fixture.search(Arc::clone(&tags));

    let questions = search
        .search(&[
            SearchCriterion::lexicon("America"),
            SearchCriterion::length(8, 8),
            SearchCriterion::probability_range(5001, 8500),
        ])
        .await
        .expect("Search failed");
    assert_eq!(questions.size(), 3500);
    assert_eq!(questions.questions()[0].probability, Some(5001));
    assert_eq!(questions.questions()[3499].probability, Some(8500));

    for entry in &entries {
        tags.tag("cesar", "America", "D4", &entry.alphagram.alphagram).await;
    }

    let questions = search
        .search(&[
            SearchCriterion::lexicon("America"),
            SearchCriterion::length(8, 8),
            SearchCriterion::probability_range(5001, 7500),
            SearchCriterion::has_tags(&["D4"], "cesar"),
        ])
        .await
        .expect("Search failed");
    assert_eq!(questions.size(), 2500);

    let ranks: Vec<i64> = questions.iter().filter_map(|q| q.probability).collect();
    assert_eq!(ranks.len(), 2500);
    assert!(ranks.windows(2).all(|w| w[0] < w[1]));
}

#[tokio::test]
async fn test_probability_filter_intersects_tags() {
    let (fixture, tags) = tagged_fixture().await;
    let search = fixture.search(tags);

    let questions = search
        .search(&[
            SearchCriterion::lexicon("America"),
            SearchCriterion::length(8, 8),
            SearchCriterion::probability_range(1, 1000),
            SearchCriterion::has_tags(&["D3", "D5"], "cesar"),
        ])
        .await
        .expect("Search failed");

    // CEILNOPR (1500) is tagged but outside the range.
    assert_eq!(questions.alphagram_strings(), vec!["AEEGLNOT"]);
}

#[tokio::test]
async fn test_minimal_output() {
    let fixture = LexiconFixture::standard().await;
    let search = fixture.search(Arc::new(MemoryTagSource::new()));

    let questions = search
        .search(&[
            SearchCriterion::lexicon("America"),
            SearchCriterion::length(5, 5),
            SearchCriterion::probability_range(1, 10),
        ])
        .await
        .expect("Search failed");

    let json = questions.to_json().expect("Serialization failed");
    let value: serde_json::Value = serde_json::from_str(&json).expect("Invalid JSON");
    assert_eq!(value[0]["q"], "AELRT");
    let mut answers: Vec<String> = value[0]["a"]
        .as_array()
        .expect("answers array")
        .iter()
        .filter_map(|w| w.as_str().map(str::to_string))
        .collect();
    answers.sort();
    assert_eq!(answers, vec!["ALERT", "ALTER", "LATER"]);
}

#[tokio::test]
async fn test_unknown_lexicon_is_store_error() {
    let fixture = LexiconFixture::standard().await;
    let search = fixture.search(Arc::new(MemoryTagSource::new()));

    let err = search
        .search(&[SearchCriterion::lexicon("FISE2"), SearchCriterion::length(8, 8)])
        .await
        .unwrap_err();
    assert!(matches!(err, SearchError::Store(_)), "got {err:?}");
    assert!(!err.is_no_results());
}
