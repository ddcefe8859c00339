//! symptomatch-common — Shared errors and configuration used across all Symptomatch crates.

pub mod error;
pub mod config;

// Re-export commonly used types
pub use config::{Config, DataConfig, MatcherConfig, ResolverConfig};
pub use error::{Result, SymptomatchError};
