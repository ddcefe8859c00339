//! The immutable disease index shared by the matcher and the resolver.
//!
//! Built exactly once at startup from a [`Corpus`] and a [`DiseaseMapping`];
//! every query afterwards only reads it. Share it as `Arc<DiseaseIndex>`.

use std::collections::{HashMap, HashSet};

use symptomatch_common::{Result, SymptomatchError};
use tracing::{info, warn};

use crate::corpus::{Corpus, CorpusRecord, DiseaseMapping, Label};
use crate::matcher::DiseaseMatcher;
use crate::normalise::normalise_disease_key;
use crate::resolver::DiseaseResolver;
use crate::tfidf::{SparseVector, TfIdfVectorizer};

#[derive(Debug, Clone)]
pub struct DiseaseIndex {
    corpus: Corpus,
    vectorizer: TfIdfVectorizer,
    /// One normalised TF-IDF vector per corpus row, index-aligned with `corpus`
    doc_vectors: Vec<SparseVector>,
    mapping: DiseaseMapping,
    /// Lower-cased original names, index-aligned with `mapping.entries()`
    names_lower: Vec<String>,
    label_to_name: HashMap<Label, String>,
    key_to_label: HashMap<String, Label>,
    /// Distinct normalised keys in first-seen mapping order
    keys: Vec<String>,
    /// Row of the first corpus record carrying each label
    first_row: HashMap<Label, usize>,
}

impl DiseaseIndex {
    /// Build the index.
    ///
    /// An empty corpus, an empty mapping or a corpus without a single
    /// token is a configuration error. Normalised-key collisions and
    /// label/corpus inconsistencies are tolerated and logged.
    pub fn build(corpus: Corpus, mapping: DiseaseMapping) -> Result<Self> {
        if corpus.is_empty() {
            return Err(SymptomatchError::EmptyCorpus);
        }
        if mapping.is_empty() {
            return Err(SymptomatchError::EmptyMapping);
        }

        let texts: Vec<&str> = corpus.texts().collect();
        let (vectorizer, doc_vectors) = TfIdfVectorizer::fit(&texts)?;
        debug_assert_eq!(doc_vectors.len(), corpus.len());

        let mut label_to_name = HashMap::with_capacity(mapping.len());
        let mut key_to_label: HashMap<String, Label> = HashMap::with_capacity(mapping.len());
        let mut key_owner: HashMap<String, &str> = HashMap::new();
        let mut keys = Vec::with_capacity(mapping.len());
        let mut names_lower = Vec::with_capacity(mapping.len());

        for (name, label) in mapping.entries() {
            label_to_name.insert(*label, name.clone());
            names_lower.push(name.to_lowercase());

            let key = normalise_disease_key(name);
            // Last write wins on collision
            if let Some(previous) = key_owner.insert(key.clone(), name.as_str()) {
                warn!(
                    "Disease names '{}' and '{}' both normalise to '{}'; keeping '{}'",
                    previous, name, key, name
                );
            } else {
                keys.push(key.clone());
            }
            key_to_label.insert(key, *label);
        }

        let mut first_row = HashMap::new();
        for (row, record) in corpus.records().iter().enumerate() {
            if let Some(label) = record.label {
                first_row.entry(label).or_insert(row);
            }
        }

        let mapped: HashSet<Label> = label_to_name.keys().copied().collect();
        let without_examples = mapped.iter().filter(|l| !first_row.contains_key(*l)).count();
        if without_examples > 0 {
            warn!("{} mapped disease label(s) have no corpus example", without_examples);
        }
        let unmapped = first_row.keys().filter(|l| !mapped.contains(*l)).count();
        if unmapped > 0 {
            warn!("{} corpus label(s) are missing from the disease mapping", unmapped);
        }

        info!(
            "Disease index built: {} documents, {} terms, {} diseases, {} lookup keys",
            corpus.len(),
            vectorizer.vocabulary_len(),
            mapping.len(),
            keys.len()
        );

        Ok(Self {
            corpus,
            vectorizer,
            doc_vectors,
            mapping,
            names_lower,
            label_to_name,
            key_to_label,
            keys,
            first_row,
        })
    }

    pub fn matcher(&self) -> DiseaseMatcher<'_> {
        DiseaseMatcher::new(self)
    }

    pub fn resolver(&self) -> DiseaseResolver<'_> {
        DiseaseResolver::new(self)
    }

    // ── Accessors ─────────────────────────────────────────────────────────────

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    pub fn vectorizer(&self) -> &TfIdfVectorizer {
        &self.vectorizer
    }

    pub fn document_vectors(&self) -> &[SparseVector] {
        &self.doc_vectors
    }

    pub fn mapping(&self) -> &DiseaseMapping {
        &self.mapping
    }

    /// Canonical disease name for a label.
    pub fn disease_name(&self, label: Label) -> Option<&str> {
        self.label_to_name.get(&label).map(String::as_str)
    }

    /// Label for an already-normalised key.
    pub fn label_for_key(&self, key: &str) -> Option<Label> {
        self.key_to_label.get(key).copied()
    }

    /// Distinct normalised keys, in first-seen mapping order.
    pub fn normalised_keys(&self) -> &[String] {
        &self.keys
    }

    /// `(lower-cased name, original name, label)` for every mapping entry.
    pub fn names_lower(&self) -> impl Iterator<Item = (&str, &str, Label)> {
        self.names_lower
            .iter()
            .zip(self.mapping.entries())
            .map(|(lower, (name, label))| (lower.as_str(), name.as_str(), *label))
    }

    /// First corpus record (by corpus order) carrying `label`.
    pub fn first_example(&self, label: Label) -> Option<&CorpusRecord> {
        self.first_row.get(&label).and_then(|&row| self.corpus.get(row))
    }

    pub fn len(&self) -> usize {
        self.corpus.len()
    }

    pub fn is_empty(&self) -> bool {
        self.corpus.is_empty()
    }

    pub fn disease_count(&self) -> usize {
        self.mapping.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DiseaseIndex {
        DiseaseIndex::build(
            Corpus::from_pairs([
                ("fever and cough", 0),
                ("skin rash and itching", 1),
                ("dry cough at night", 0),
            ]),
            DiseaseMapping::from_pairs([("Flu", 0), ("Eczema", 1)]),
        )
        .unwrap()
    }

    #[test]
    fn test_build_derives_lookups() {
        let index = sample();
        assert_eq!(index.len(), 3);
        assert_eq!(index.disease_count(), 2);
        assert_eq!(index.disease_name(1), Some("Eczema"));
        assert_eq!(index.disease_name(9), None);
        assert_eq!(index.label_for_key("flu"), Some(0));
        assert_eq!(index.normalised_keys(), &["flu".to_string(), "eczema".to_string()]);
        assert_eq!(index.document_vectors().len(), index.corpus().len());
    }

    #[test]
    fn test_first_example_follows_corpus_order() {
        let index = sample();
        assert_eq!(index.first_example(0).unwrap().text, "fever and cough");
        assert!(index.first_example(42).is_none());
    }

    #[test]
    fn test_empty_inputs_are_fatal() {
        let err = DiseaseIndex::build(Corpus::default(), DiseaseMapping::from_pairs([("Flu", 0)]))
            .unwrap_err();
        assert!(matches!(err, SymptomatchError::EmptyCorpus));

        let err = DiseaseIndex::build(Corpus::from_pairs([("fever", 0)]), DiseaseMapping::default())
            .unwrap_err();
        assert!(matches!(err, SymptomatchError::EmptyMapping));
    }

    #[test]
    fn test_malformed_rows_keep_alignment() {
        let corpus = Corpus::new(vec![
            CorpusRecord::new(Some("fever and cough"), Some(0)),
            CorpusRecord::new(None, None),
            CorpusRecord::new(Some("rash"), None),
        ]);
        let index = DiseaseIndex::build(corpus, DiseaseMapping::from_pairs([("Flu", 0)])).unwrap();
        assert_eq!(index.document_vectors().len(), 3);
        assert!(index.document_vectors()[1].is_zero());
    }

    #[test]
    fn test_key_collision_last_write_wins() {
        let index = DiseaseIndex::build(
            Corpus::from_pairs([("sneezing", 2), ("runny nose", 5)]),
            DiseaseMapping::from_pairs([("Common Cold", 2), ("common-cold", 5), ("COMMON COLD", 7)]),
        )
        .unwrap();
        // "Common Cold" and "COMMON COLD" share a key; "common-cold" is "commoncold"
        assert_eq!(index.label_for_key("common_cold"), Some(7));
        assert_eq!(index.label_for_key("commoncold"), Some(5));
        assert_eq!(index.normalised_keys().len(), 2);
        // The inverse map still names every label
        assert_eq!(index.disease_name(2), Some("Common Cold"));
    }

    #[test]
    fn test_index_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<DiseaseIndex>();
    }
}
