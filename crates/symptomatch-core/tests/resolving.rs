//! Tiered disease-name resolution end to end.

mod common;

use pretty_assertions::assert_eq;
use symptomatch_core::loader::load_index;
use symptomatch_core::report::{explanation_message, NOT_RECOGNIZED_MESSAGE};
use symptomatch_core::ResolveTier;

#[test]
fn test_flu_resolves_to_its_example() {
    let index = common::flu_eczema_index();
    let r = index.resolver().resolve("flu", None).unwrap();
    assert_eq!(r.tier, ResolveTier::ExactKey);
    assert!(r.example_text.contains("fever and cough"));
}

#[test]
fn test_typo_resolves_via_fuzzy_key() {
    let index = common::flu_eczema_index();
    let r = index.resolver().resolve("Flue", None).unwrap();
    assert_eq!(r.tier, ResolveTier::FuzzyKey);
    assert_eq!(r.display_name, "Flu");
}

#[test]
fn test_garbage_without_raw_input_is_not_found() {
    let index = common::flu_eczema_index();
    assert_eq!(index.resolver().resolve("zzzzqqqq", None), None);
    assert_eq!(explanation_message(None), NOT_RECOGNIZED_MESSAGE);
}

#[tokio::test]
async fn test_fixture_tiers() {
    let index = load_index(&common::fixture_data()).await.unwrap();
    let resolver = index.resolver();

    let exact = resolver.resolve("common cold!!", None).unwrap();
    assert_eq!(exact.tier, ResolveTier::ExactKey);
    assert_eq!(exact.display_name, "Common Cold");

    // The hyphen is dropped without leaving a space, so the key is
    // "commoncold", which still shares every character with "common_cold"
    let hyphenated = resolver.resolve("Common-Cold!!", None).unwrap();
    assert_eq!(hyphenated.tier, ResolveTier::FuzzyKey);
    assert_eq!(hyphenated.label, 2);

    let by_name = resolver
        .resolve("GERD", Some("gastroesophagal reflux disease"))
        .unwrap();
    assert_eq!(by_name.tier, ResolveTier::FuzzyName);
    assert_eq!(by_name.display_name, "Gastroesophageal Reflux Disease");
    assert!(by_name.example_text.starts_with("i have been experiencing a burning sensation"));
}

#[tokio::test]
async fn test_fixture_inconsistencies_are_misses_or_empty() {
    let index = load_index(&common::fixture_data()).await.unwrap();
    let resolver = index.resolver();

    // Mapped but absent from the corpus
    assert_eq!(resolver.resolve("Chicken pox", None), None);

    // Present with an empty example text: found, not a miss
    let arthritis = resolver.resolve("arthritis", None).unwrap();
    assert_eq!(arthritis.example_text, "");
}

#[tokio::test]
async fn test_explanation_for_resolved_disease() {
    let index = load_index(&common::fixture_data()).await.unwrap();
    let r = index.resolver().resolve("Psoriasis", None);
    let message = explanation_message(r.as_ref());
    assert!(message.starts_with("Here’s a real-world symptom description related to Psoriasis:\n\n> "));
    assert!(message.ends_with("covered in dry, scaly patches."));
}
