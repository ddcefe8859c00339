//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use symptomatch_common::DataConfig;
use symptomatch_core::{Corpus, DiseaseIndex, DiseaseMapping};

/// Two-disease index used in the service documentation.
pub fn flu_eczema_index() -> DiseaseIndex {
    DiseaseIndex::build(
        Corpus::from_pairs([("fever and cough", 0), ("skin rash and itching", 1)]),
        DiseaseMapping::from_pairs([("Flu", 0), ("Eczema", 1)]),
    )
    .expect("fixture index builds")
}

/// Paths of the on-disk fixture corpus and mapping.
pub fn fixture_data() -> DataConfig {
    let dir = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures");
    DataConfig {
        corpus_path: format!("{dir}/symptom-disease.csv").into(),
        mapping_path: format!("{dir}/mapping.json").into(),
    }
}
