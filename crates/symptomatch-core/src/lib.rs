//! symptomatch-core — Symptom-to-disease matching engine.
//!
//! - Corpus and disease mapping loading (CSV / JSON)
//! - One-time TF-IDF index build
//! - Ranked disease matching by cosine similarity
//! - Tiered disease-name resolution (exact key, fuzzy key, fuzzy raw name)
//! - Chat-ready rendering of results

pub mod normalise;
pub mod corpus;
pub mod tfidf;
pub mod index;
pub mod loader;
pub mod matcher;
pub mod resolver;
pub mod report;

// Re-export commonly used types
pub use corpus::{Corpus, CorpusRecord, DiseaseMapping, Label};
pub use index::DiseaseIndex;
pub use matcher::{DiseaseMatch, DiseaseMatcher};
pub use resolver::{DiseaseResolver, Resolution, ResolveTier};
pub use symptomatch_common::{Result, SymptomatchError};
