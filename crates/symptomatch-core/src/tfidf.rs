//! TF-IDF vectorizer over the symptom corpus.
//!
//! Weighting follows the classic smoothed scheme:
//!
//! - tokens are runs of two or more word characters, lower-cased
//! - tf(t, d)  = raw count of t in d
//! - idf(t)    = ln((1 + n) / (1 + df(t))) + 1
//! - every vector is L2-normalised, so cosine similarity reduces to a dot
//!   product; the zero vector stays zero
//!
//! The vocabulary and IDF weights are fixed by [`TfIdfVectorizer::fit`];
//! [`TfIdfVectorizer::transform`] only reads them.

use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::OnceLock;

use regex::Regex;
use symptomatch_common::{Result, SymptomatchError};

fn token_pattern() -> &'static Regex {
    static TOKEN: OnceLock<Regex> = OnceLock::new();
    TOKEN.get_or_init(|| Regex::new(r"\b\w\w+\b").expect("token pattern is a valid regex"))
}

/// Split text into lower-cased terms.
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    token_pattern()
        .find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Sparse vector as `(term index, weight)` pairs sorted by term index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    entries: Vec<(usize, f64)>,
}

impl SparseVector {
    /// Build from unordered entries; zero weights are dropped.
    pub fn from_entries(mut entries: Vec<(usize, f64)>) -> Self {
        entries.retain(|&(_, w)| w != 0.0);
        entries.sort_by_key(|&(i, _)| i);
        Self { entries }
    }

    pub fn entries(&self) -> &[(usize, f64)] {
        &self.entries
    }

    pub fn is_zero(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn norm(&self) -> f64 {
        self.entries.iter().map(|&(_, w)| w * w).sum::<f64>().sqrt()
    }

    /// Scale to unit length in place. The zero vector is left as is.
    pub fn normalise(&mut self) {
        let norm = self.norm();
        if norm > 0.0 {
            for (_, w) in &mut self.entries {
                *w /= norm;
            }
        }
    }

    /// Dot product by merge-walking both sorted entry lists.
    pub fn dot(&self, other: &SparseVector) -> f64 {
        let (a, b) = (&self.entries, &other.entries);
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0;
        while i < a.len() && j < b.len() {
            match a[i].0.cmp(&b[j].0) {
                Ordering::Less => i += 1,
                Ordering::Greater => j += 1,
                Ordering::Equal => {
                    sum += a[i].1 * b[j].1;
                    i += 1;
                    j += 1;
                }
            }
        }
        sum
    }
}

/// Cosine similarity. Defined as 0.0 when either side is the zero vector.
pub fn cosine_similarity(a: &SparseVector, b: &SparseVector) -> f64 {
    let denom = a.norm() * b.norm();
    if denom == 0.0 {
        return 0.0;
    }
    a.dot(b) / denom
}

/// Fitted TF-IDF model. Immutable once built.
#[derive(Debug, Clone)]
pub struct TfIdfVectorizer {
    /// term → dimension index (dimensions follow sorted term order)
    vocabulary: HashMap<String, usize>,
    /// IDF weight per dimension
    idf: Vec<f64>,
}

impl TfIdfVectorizer {
    /// Fit vocabulary and IDF weights on `documents` and return the model
    /// together with the normalised vector of every document, in order.
    ///
    /// Fails with [`SymptomatchError::EmptyVocabulary`] when no document
    /// contains a single token.
    pub fn fit<S: AsRef<str>>(documents: &[S]) -> Result<(Self, Vec<SparseVector>)> {
        let tokenized: Vec<Vec<String>> = documents.iter().map(|d| tokenize(d.as_ref())).collect();

        let mut doc_freq: HashMap<&str, usize> = HashMap::new();
        for tokens in &tokenized {
            let unique: HashSet<&str> = tokens.iter().map(String::as_str).collect();
            for term in unique {
                *doc_freq.entry(term).or_insert(0) += 1;
            }
        }

        if doc_freq.is_empty() {
            return Err(SymptomatchError::EmptyVocabulary);
        }

        let terms: BTreeSet<&str> = doc_freq.keys().copied().collect();
        let n = documents.len() as f64;

        let mut vocabulary = HashMap::with_capacity(terms.len());
        let mut idf = Vec::with_capacity(terms.len());
        for (idx, term) in terms.into_iter().enumerate() {
            let df = doc_freq[term] as f64;
            idf.push(((1.0 + n) / (1.0 + df)).ln() + 1.0);
            vocabulary.insert(term.to_string(), idx);
        }

        let model = Self { vocabulary, idf };
        let vectors = tokenized.iter().map(|tokens| model.weigh(tokens)).collect();
        Ok((model, vectors))
    }

    /// Project text onto the fitted vocabulary. Unknown terms are dropped,
    /// so the result may be the zero vector.
    pub fn transform(&self, text: &str) -> SparseVector {
        self.weigh(&tokenize(text))
    }

    fn weigh(&self, tokens: &[String]) -> SparseVector {
        let mut counts: HashMap<usize, f64> = HashMap::new();
        for token in tokens {
            if let Some(&idx) = self.vocabulary.get(token) {
                *counts.entry(idx).or_insert(0.0) += 1.0;
            }
        }

        let mut vector = SparseVector::from_entries(
            counts
                .into_iter()
                .map(|(idx, tf)| (idx, tf * self.idf[idx]))
                .collect(),
        );
        vector.normalise();
        vector
    }

    pub fn vocabulary_len(&self) -> usize {
        self.vocabulary.len()
    }

    /// IDF weight of a term, if it is in the vocabulary.
    pub fn idf(&self, term: &str) -> Option<f64> {
        self.vocabulary.get(term).map(|&idx| self.idf[idx])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fit(docs: &[&str]) -> (TfIdfVectorizer, Vec<SparseVector>) {
        TfIdfVectorizer::fit(docs).unwrap()
    }

    #[test]
    fn test_tokenize_drops_single_chars_and_punctuation() {
        assert_eq!(
            tokenize("I have a Fever, cough & 2 headaches!"),
            vec!["have", "fever", "cough", "headaches"]
        );
        assert!(tokenize("").is_empty());
        assert!(tokenize("a b c !").is_empty());
    }

    #[test]
    fn test_smoothed_idf() {
        let (model, _) = fit(&["fever cough", "fever rash"]);
        // n = 2; "fever" in both docs, "cough" in one
        assert!((model.idf("fever").unwrap() - 1.0).abs() < 1e-12);
        let expected = (3.0f64 / 2.0).ln() + 1.0;
        assert!((model.idf("cough").unwrap() - expected).abs() < 1e-12);
        assert_eq!(model.idf("headache"), None);
        assert_eq!(model.vocabulary_len(), 3);
    }

    #[test]
    fn test_document_vectors_are_unit_length() {
        let (_, vectors) = fit(&["fever and cough", "skin rash and itching", "fever fever chills"]);
        for v in &vectors {
            assert!((v.norm() - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_word_order_irrelevant() {
        let (model, vectors) = fit(&["fever and cough", "skin rash and itching"]);
        let q = model.transform("cough and fever");
        assert!((cosine_similarity(&q, &vectors[0]) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_out_of_vocabulary_query_is_zero() {
        let (model, vectors) = fit(&["fever and cough"]);
        let q = model.transform("xylophone zebra");
        assert!(q.is_zero());
        assert_eq!(cosine_similarity(&q, &vectors[0]), 0.0);
        assert_eq!(q.dot(&vectors[0]), 0.0);
    }

    #[test]
    fn test_transform_does_not_grow_vocabulary() {
        let (model, _) = fit(&["fever and cough"]);
        let before = model.vocabulary_len();
        let _ = model.transform("brand new words entirely");
        assert_eq!(model.vocabulary_len(), before);
    }

    #[test]
    fn test_empty_vocabulary_rejected() {
        let err = TfIdfVectorizer::fit(&["", "a", "!"]).unwrap_err();
        assert!(matches!(err, SymptomatchError::EmptyVocabulary));
    }

    #[test]
    fn test_sparse_dot_merges_indices() {
        let a = SparseVector::from_entries(vec![(3, 2.0), (0, 1.0), (7, 0.0)]);
        let b = SparseVector::from_entries(vec![(0, 4.0), (5, 1.0), (3, 0.5)]);
        assert_eq!(a.entries(), &[(0, 1.0), (3, 2.0)]);
        assert!((a.dot(&b) - 5.0).abs() < 1e-12);
    }
}
