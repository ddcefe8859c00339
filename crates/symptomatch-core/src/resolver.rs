//! Tiered disease-name resolution.
//!
//! Maps a possibly imprecise disease name to the first corpus example of
//! that disease. Tiers are tried in a fixed order and the first hit wins:
//!
//! ```text
//! START → ExactKey → FuzzyKey → FuzzyName (only with raw input) → not found
//! ```
//!
//! - `ExactKey`:  normalised key present in the key index
//! - `FuzzyKey`:  closest normalised key by matching-block ratio ≥ cutoff
//! - `FuzzyName`: closest original disease name (case-insensitive) to the
//!   caller's raw input, same cutoff
//!
//! Every call is independent; nothing is cached between calls.

use difflib::sequencematcher::SequenceMatcher;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::corpus::Label;
use crate::index::DiseaseIndex;
use crate::normalise::{display_name, normalise_disease_key};

/// Default minimum similarity ratio for a fuzzy match.
pub const DEFAULT_FUZZY_CUTOFF: f64 = 0.6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolveTier {
    ExactKey,
    FuzzyKey,
    FuzzyName,
}

impl ResolveTier {
    /// Tier to try after this one fails.
    pub fn next(self) -> Option<Self> {
        match self {
            Self::ExactKey => Some(Self::FuzzyKey),
            Self::FuzzyKey => Some(Self::FuzzyName),
            Self::FuzzyName => None,
        }
    }
}

/// A successfully resolved disease.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resolution {
    /// Tier that produced the match
    pub tier: ResolveTier,
    pub label: Label,
    /// Normalised key that matched, e.g. "common_cold"
    pub matched_key: String,
    /// Presentation form of the key, e.g. "Common Cold"
    pub display_name: String,
    /// First corpus text bearing the label, trimmed
    pub example_text: String,
}

/// Outcome of one tier attempt.
struct TierHit {
    tier: ResolveTier,
    key: String,
    label: Label,
}

#[derive(Debug, Clone, Copy)]
pub struct DiseaseResolver<'a> {
    index: &'a DiseaseIndex,
    cutoff: f64,
}

impl<'a> DiseaseResolver<'a> {
    pub fn new(index: &'a DiseaseIndex) -> Self {
        Self { index, cutoff: DEFAULT_FUZZY_CUTOFF }
    }

    pub fn with_cutoff(mut self, cutoff: f64) -> Self {
        self.cutoff = cutoff;
        self
    }

    /// Resolve `disease_key` to a corpus example.
    ///
    /// `raw_input` enables the last tier. Returns `None` when no tier
    /// matches, or when the matched label has no corpus example.
    pub fn resolve(&self, disease_key: &str, raw_input: Option<&str>) -> Option<Resolution> {
        let key = normalise_disease_key(disease_key);

        let mut state = Some(ResolveTier::ExactKey);
        while let Some(tier) = state {
            if let Some(hit) = self.attempt(tier, &key, raw_input) {
                debug!("Resolved {:?} via {:?} → {:?}", disease_key, hit.tier, hit.key);
                return self.finish(hit);
            }
            state = tier.next();
        }

        debug!("No disease matched {:?}", disease_key);
        None
    }

    fn attempt(&self, tier: ResolveTier, key: &str, raw_input: Option<&str>) -> Option<TierHit> {
        match tier {
            ResolveTier::ExactKey => self.index.label_for_key(key).map(|label| TierHit {
                tier,
                key: key.to_string(),
                label,
            }),

            ResolveTier::FuzzyKey => {
                let keys = self.index.normalised_keys().iter().map(String::as_str);
                let (best, _) = closest_match(key, keys, self.cutoff)?;
                let label = self.index.label_for_key(best)?;
                Some(TierHit { tier, key: best.to_string(), label })
            }

            ResolveTier::FuzzyName => {
                let raw = raw_input?.to_lowercase();
                let names: Vec<(&str, &str, Label)> = self.index.names_lower().collect();
                let (best, _) = closest_match(&raw, names.iter().map(|(lower, _, _)| *lower), self.cutoff)?;
                // Map back through the original mapping, not the lossy key index
                let (_, original, label) = names.iter().find(|(lower, _, _)| *lower == best)?;
                Some(TierHit {
                    tier,
                    key: normalise_disease_key(original),
                    label: *label,
                })
            }
        }
    }

    fn finish(&self, hit: TierHit) -> Option<Resolution> {
        let Some(record) = self.index.first_example(hit.label) else {
            warn!(
                "Disease key '{}' resolved to label {} which has no corpus example",
                hit.key, hit.label
            );
            return None;
        };

        Some(Resolution {
            tier: hit.tier,
            label: hit.label,
            display_name: display_name(&hit.key),
            matched_key: hit.key,
            example_text: record.text.trim().to_string(),
        })
    }
}

/// Closest candidate by [`similarity_ratio`], if it reaches `cutoff`.
/// On equal scores the lexicographically greatest candidate wins.
pub fn closest_match<'c, I>(word: &str, candidates: I, cutoff: f64) -> Option<(&'c str, f64)>
where
    I: IntoIterator<Item = &'c str>,
{
    let cutoff = cutoff as f32;
    let mut best: Option<(&'c str, f32)> = None;
    for candidate in candidates {
        // Candidate first, query second; the block search is not symmetric
        let score = similarity_ratio(candidate, word);
        if score < cutoff {
            continue;
        }
        let better = match best {
            None => true,
            Some((top, top_score)) => score > top_score || (score == top_score && candidate > top),
        };
        if better {
            best = Some((candidate, score));
        }
    }
    best.map(|(candidate, score)| (candidate, f64::from(score)))
}

/// Ratcliff/Obershelp similarity `2·M / T` over characters, where `M` is
/// the total size of the matching blocks and `T` the combined length.
pub fn similarity_ratio(a: &str, b: &str) -> f32 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let mut matcher = SequenceMatcher::new(a.as_slice(), b.as_slice());
    matcher.ratio()
}
