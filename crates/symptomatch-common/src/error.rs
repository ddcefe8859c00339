use thiserror::Error;

#[derive(Debug, Error)]
pub enum SymptomatchError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Symptom corpus is empty")]
    EmptyCorpus,

    #[error("Disease mapping is empty")]
    EmptyMapping,

    #[error("Symptom corpus produced an empty vocabulary")]
    EmptyVocabulary,
}

pub type Result<T> = std::result::Result<T, SymptomatchError>;
