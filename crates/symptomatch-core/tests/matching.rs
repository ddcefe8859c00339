//! Ranking behaviour of the disease matcher.

mod common;

use symptomatch_core::loader::load_index;

#[test]
fn test_cough_and_fever_matches_flu() {
    let index = common::flu_eczema_index();
    let results = index.matcher().match_symptoms("cough and fever", 1);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].disease, "Flu");
}

#[test]
fn test_result_count_is_min_of_k_and_corpus() {
    let index = common::flu_eczema_index();
    for k in 0..5 {
        let results = index.matcher().match_symptoms("itching", k);
        assert_eq!(results.len(), k.min(index.len()), "k = {k}");
    }
}

#[test]
fn test_empty_query_never_fails() {
    let index = common::flu_eczema_index();
    let results = index.matcher().match_symptoms("", 2);
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].disease, "Flu");
    assert_eq!(results[1].disease, "Eczema");
    assert!(results.iter().all(|m| m.probability == "0.0%"));
}

#[tokio::test]
async fn test_fixture_ranking() {
    let index = load_index(&common::fixture_data()).await.unwrap();
    let matcher = index.matcher();

    let flu = matcher.match_symptoms("I have a high fever and a bad cough", 3);
    assert_eq!(flu[0].disease, "Influenza");

    let gerd = matcher.match_symptoms("Heartburn and acid in my throat", 3);
    assert_eq!(gerd[0].disease, "Gastroesophageal reflux disease");

    // The unlabeled row is still rankable, under the fallback name
    let joints = matcher.match_symptoms("stiff joints in the mornings", 1);
    assert_eq!(joints[0].disease, "Unknown");
}

#[tokio::test]
async fn test_fixture_ordering_and_idempotence() {
    let index = load_index(&common::fixture_data()).await.unwrap();
    let matcher = index.matcher();
    let query = "sneezing with a runny nose and a cough";

    let first = matcher.match_symptoms(query, 5);
    let second = matcher.match_symptoms(query, 5);
    assert_eq!(first, second);
    assert_eq!(first[0].disease, "Common Cold");
    for pair in first.windows(2) {
        assert!(pair[0].similarity >= pair[1].similarity);
    }
}
