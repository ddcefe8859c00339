//! Startup loading of the corpus and mapping files.
//!
//! File reads are async; parsing and the index build run synchronously once
//! both files are in memory. Any failure here means the service must not
//! start.

use std::path::Path;

use symptomatch_common::{DataConfig, Result, SymptomatchError};
use tracing::info;

use crate::corpus::{Corpus, DiseaseMapping};
use crate::index::DiseaseIndex;

/// Load the labeled symptom corpus from a CSV file.
pub async fn load_corpus(path: impl AsRef<Path>) -> Result<Corpus> {
    let path = path.as_ref();
    let bytes = tokio::fs::read(path).await.map_err(|e| {
        SymptomatchError::Config(format!("cannot read corpus {}: {e}", path.display()))
    })?;
    let corpus = Corpus::from_csv_reader(bytes.as_slice())?;
    info!("Loaded {} corpus rows from {}", corpus.len(), path.display());
    Ok(corpus)
}

/// Load the disease name → label mapping from a JSON file.
pub async fn load_mapping(path: impl AsRef<Path>) -> Result<DiseaseMapping> {
    let path = path.as_ref();
    let json = tokio::fs::read_to_string(path).await.map_err(|e| {
        SymptomatchError::Config(format!("cannot read mapping {}: {e}", path.display()))
    })?;
    let mapping = DiseaseMapping::from_json_str(&json)?;
    info!("Loaded {} disease names from {}", mapping.len(), path.display());
    Ok(mapping)
}

/// Read both data files and build the index.
pub async fn load_index(data: &DataConfig) -> Result<DiseaseIndex> {
    let (corpus, mapping) = tokio::try_join!(
        load_corpus(&data.corpus_path),
        load_mapping(&data.mapping_path)
    )?;
    DiseaseIndex::build(corpus, mapping)
}
