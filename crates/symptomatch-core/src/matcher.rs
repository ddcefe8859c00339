//! Ranked symptom → disease matching.
//!
//! Scores every corpus document against the query by cosine similarity of
//! TF-IDF vectors and returns the best `top_k`, highest first. Documents
//! with equal scores keep corpus order.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::index::DiseaseIndex;
use crate::tfidf::cosine_similarity;

/// Fallback disease name for labels missing from the mapping.
pub const UNKNOWN_DISEASE: &str = "Unknown";

/// Default number of corpus characters quoted in a match reason.
pub const DEFAULT_SNIPPET_CHARS: usize = 80;

/// One ranked candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiseaseMatch {
    /// Canonical disease name, or "Unknown"
    pub disease: String,
    /// Similarity as a percentage string, e.g. "87.5%"
    pub probability: String,
    /// Quote of the matched corpus text
    pub reason: String,
    /// Raw cosine similarity in [0, 1]
    pub similarity: f64,
    /// Corpus row of the matched document
    pub row: usize,
}

#[derive(Debug, Clone, Copy)]
pub struct DiseaseMatcher<'a> {
    index: &'a DiseaseIndex,
    snippet_chars: usize,
}

impl<'a> DiseaseMatcher<'a> {
    pub fn new(index: &'a DiseaseIndex) -> Self {
        Self { index, snippet_chars: DEFAULT_SNIPPET_CHARS }
    }

    pub fn with_snippet_chars(mut self, snippet_chars: usize) -> Self {
        self.snippet_chars = snippet_chars;
        self
    }

    /// Cosine similarity of the query against every corpus document, in
    /// corpus order. All zeros when the query shares no term with the
    /// vocabulary.
    pub fn similarities(&self, query: &str) -> Vec<f64> {
        let query = query.trim().to_lowercase();
        let q = self.index.vectorizer().transform(&query);
        self.index
            .document_vectors()
            .iter()
            .map(|doc| cosine_similarity(&q, doc))
            .collect()
    }

    /// Top `top_k` diseases for free-text symptoms, highest similarity first.
    ///
    /// Returns `min(top_k, corpus size)` results, even when every score is 0.
    pub fn match_symptoms(&self, query: &str, top_k: usize) -> Vec<DiseaseMatch> {
        let mut ranked: Vec<(usize, f64)> = self.similarities(query).into_iter().enumerate().collect();
        // Stable sort: equal scores stay in corpus order
        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
        ranked.truncate(top_k);

        let results: Vec<DiseaseMatch> = ranked
            .into_iter()
            .map(|(row, similarity)| self.describe(row, similarity))
            .collect();

        debug!(
            "Matched {:?} → {:?}",
            query,
            results.iter().map(|m| (&m.disease, &m.probability)).collect::<Vec<_>>()
        );
        results
    }

    fn describe(&self, row: usize, similarity: f64) -> DiseaseMatch {
        let record = &self.index.corpus().records()[row];
        let disease = record
            .label
            .and_then(|label| self.index.disease_name(label))
            .unwrap_or(UNKNOWN_DISEASE)
            .to_string();
        let snippet: String = record.text.chars().take(self.snippet_chars).collect();

        DiseaseMatch {
            disease,
            probability: format_probability(similarity),
            reason: format!("Matched against: '{snippet}...'"),
            similarity,
            row,
        }
    }
}

/// `similarity × 100` rounded to two decimals, rendered in its shortest
/// form with at least one decimal place: 0.875 → "87.5%", 0.0 → "0.0%".
///
/// Rounding works on the exact binary value and breaks exact ties to even,
/// so 0.125 rounds to 0.12.
pub fn format_probability(similarity: f64) -> String {
    let rounded = format!("{:.2}", similarity * 100.0);
    let percent: f64 = rounded.parse().unwrap_or(0.0);
    if percent.fract() == 0.0 {
        format!("{percent:.1}%")
    } else {
        format!("{percent}%")
    }
}
