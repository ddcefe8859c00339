//! Configuration loading for Symptomatch.
//! Reads symptomatch.toml from the current directory or the path in SYMPTOMATCH_CONFIG.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Result, SymptomatchError};

/// Default config file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "symptomatch.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub matcher: MatcherConfig,
    #[serde(default)]
    pub resolver: ResolverConfig,
}

// ── Data files ────────────────────────────────────────────────────────────────

/// Locations of the static inputs read once at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Labeled symptom corpus (CSV with `text` and `label` columns)
    #[serde(default = "default_corpus_path")]
    pub corpus_path: PathBuf,

    /// Disease name → label mapping (JSON object)
    #[serde(default = "default_mapping_path")]
    pub mapping_path: PathBuf,
}

fn default_corpus_path()  -> PathBuf { PathBuf::from("data/symptom-disease-train-dataset.csv") }
fn default_mapping_path() -> PathBuf { PathBuf::from("data/mapping.json") }

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            corpus_path: default_corpus_path(),
            mapping_path: default_mapping_path(),
        }
    }
}

// ── Matcher ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatcherConfig {
    /// Number of candidate diseases returned per query
    #[serde(default = "default_top_k")]
    pub top_k: usize,

    /// Characters of the matched corpus text quoted in each reason
    #[serde(default = "default_snippet_chars")]
    pub snippet_chars: usize,
}

fn default_top_k()         -> usize { 3 }
fn default_snippet_chars() -> usize { 80 }

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            top_k: default_top_k(),
            snippet_chars: default_snippet_chars(),
        }
    }
}

// ── Resolver ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Minimum similarity ratio (0.0 - 1.0) for a fuzzy disease-name match
    #[serde(default = "default_fuzzy_cutoff")]
    pub fuzzy_cutoff: f64,
}

fn default_fuzzy_cutoff() -> f64 { 0.6 }

impl Default for ResolverConfig {
    fn default() -> Self {
        Self { fuzzy_cutoff: default_fuzzy_cutoff() }
    }
}


impl Config {
    /// Load configuration.
    ///
    /// Honors a `.env` file, then checks the SYMPTOMATCH_CONFIG env var. An
    /// explicitly named file must exist; a missing default file falls back to
    /// built-in defaults. SYMPTOMATCH_CORPUS / SYMPTOMATCH_MAPPING override
    /// the data paths either way.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Like [`Config::load`], but an explicit `path` takes precedence over
    /// SYMPTOMATCH_CONFIG and the default file.
    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        let _ = dotenvy::dotenv();

        let explicit = path
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os("SYMPTOMATCH_CONFIG").map(PathBuf::from));

        let mut config = match explicit {
            Some(path) => Self::from_path(&path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::from_path(DEFAULT_CONFIG_FILE)?
            }
            None => {
                tracing::info!("No {} found, using built-in defaults", DEFAULT_CONFIG_FILE);
                Self::default()
            }
        };

        config.apply_overrides(
            std::env::var("SYMPTOMATCH_CORPUS").ok(),
            std::env::var("SYMPTOMATCH_MAPPING").ok(),
        );
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a specific TOML file. The file must exist.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SymptomatchError::Config(format!(
                "Config file not found: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!("Configuration read from {}", path.display());
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Replace the data paths with explicitly supplied values.
    pub fn apply_overrides(&mut self, corpus: Option<String>, mapping: Option<String>) {
        if let Some(path) = corpus.filter(|p| !p.trim().is_empty()) {
            self.data.corpus_path = PathBuf::from(path);
        }
        if let Some(path) = mapping.filter(|p| !p.trim().is_empty()) {
            self.data.mapping_path = PathBuf::from(path);
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.matcher.top_k == 0 {
            return Err(SymptomatchError::Config(
                "matcher.top_k must be at least 1".to_string(),
            ));
        }
        let cutoff = self.resolver.fuzzy_cutoff;
        if !(0.0..=1.0).contains(&cutoff) {
            return Err(SymptomatchError::Config(format!(
                "resolver.fuzzy_cutoff must lie in [0, 1], got {cutoff}"
            )));
        }
        Ok(())
    }
}
