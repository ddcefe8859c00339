//! Symptomatch — symptom-to-disease matching from the command line.
//! Entry point for the `symptomatch` binary.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use symptomatch_common::Config;
use symptomatch_core::loader::load_index;
use symptomatch_core::report::{explanation_message, symptom_report};
use symptomatch_core::DiseaseIndex;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "symptomatch", version, about = "Match symptom descriptions to probable diseases")]
struct Cli {
    /// Config file (defaults to $SYMPTOMATCH_CONFIG, then ./symptomatch.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print machine-readable JSON instead of chat text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Rank probable diseases for a free-text symptom description
    Match {
        text: String,
        /// Number of candidates (defaults to matcher.top_k)
        #[arg(long)]
        top_k: Option<usize>,
    },
    /// Find a real-world example for a disease name
    Resolve {
        name: String,
        /// Original user wording, enables matching on raw disease names
        #[arg(long)]
        raw: Option<String>,
    },
    /// Show corpus and index sizes
    Stats,
}

#[derive(Debug, Serialize)]
struct IndexStats {
    documents: usize,
    vocabulary: usize,
    diseases: usize,
    lookup_keys: usize,
}

impl IndexStats {
    fn of(index: &DiseaseIndex) -> Self {
        Self {
            documents: index.len(),
            vocabulary: index.vectorizer().vocabulary_len(),
            diseases: index.disease_count(),
            lookup_keys: index.normalised_keys().len(),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so --json output stays parseable
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("symptomatch=info,warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::load_from(cli.config.as_deref()).with_context(|| match &cli.config {
        Some(path) => format!("Could not load config {}", path.display()),
        None => "Could not load configuration".to_string(),
    })?;
    info!(
        "Configuration loaded. Corpus: {}, mapping: {}",
        config.data.corpus_path.display(),
        config.data.mapping_path.display()
    );

    let index = load_index(&config.data)
        .await
        .context("Failed to build the disease index; refusing to serve")?;

    match cli.command {
        Command::Match { text, top_k } => {
            let top_k = top_k.unwrap_or(config.matcher.top_k);
            let matches = index
                .matcher()
                .with_snippet_chars(config.matcher.snippet_chars)
                .match_symptoms(&text, top_k);

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&matches)?);
            } else {
                println!("{}", symptom_report(&matches));
            }
        }

        Command::Resolve { name, raw } => {
            let resolution = index
                .resolver()
                .with_cutoff(config.resolver.fuzzy_cutoff)
                .resolve(&name, raw.as_deref());

            if cli.json {
                let body = serde_json::json!({
                    "found": resolution.is_some(),
                    "resolution": resolution,
                });
                println!("{}", serde_json::to_string_pretty(&body)?);
            } else {
                println!("{}", explanation_message(resolution.as_ref()));
            }
        }

        Command::Stats => {
            let stats = IndexStats::of(&index);
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                println!("Documents:   {}", stats.documents);
                println!("Vocabulary:  {}", stats.vocabulary);
                println!("Diseases:    {}", stats.diseases);
                println!("Lookup keys: {}", stats.lookup_keys);
            }
        }
    }

    Ok(())
}
