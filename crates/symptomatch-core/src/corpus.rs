//! Labeled symptom corpus and disease-name mapping.
//!
//! Both are read once at startup. Parsing is lenient per row (a broken cell
//! becomes an empty text or a missing label so text/label alignment is never
//! lost) and strict
//! per file (a missing column or a non-object mapping refuses to load).

use std::io::Read;

use serde::Serialize;
use serde_json::Value;
use symptomatch_common::{Result, SymptomatchError};
use tracing::{debug, warn};

/// Integer identifier of one disease, shared by the corpus and the mapping.
pub type Label = i64;

/// One labeled symptom description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CorpusRecord {
    /// Lower-cased, trimmed symptom text. Empty when the source row had none.
    pub text: String,
    /// Disease label. `None` when the source row had no usable label.
    pub label: Option<Label>,
}

impl CorpusRecord {
    pub fn new(text: Option<&str>, label: Option<Label>) -> Self {
        Self {
            text: text.map(|t| t.trim().to_lowercase()).unwrap_or_default(),
            label,
        }
    }
}

/// Ordered, immutable collection of corpus records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Corpus {
    records: Vec<CorpusRecord>,
}

impl Corpus {
    pub fn new(records: Vec<CorpusRecord>) -> Self {
        Self { records }
    }

    /// Build from well-formed `(text, label)` pairs.
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, Label)>,
        S: AsRef<str>,
    {
        Self::new(
            pairs
                .into_iter()
                .map(|(text, label)| CorpusRecord::new(Some(text.as_ref()), Some(label)))
                .collect(),
        )
    }

    /// Parse a CSV with a header row naming `text` and `label` columns.
    ///
    /// Column order is free and extra columns are ignored. Short rows, blank
    /// cells and non-integer labels are kept as records with empty text
    /// and/or no label. Invalid UTF-8 in the text is replaced, not dropped.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(reader);

        let headers = reader.headers()?.clone();
        let column = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name))
                .ok_or_else(|| {
                    SymptomatchError::Config(format!("corpus CSV has no '{name}' column"))
                })
        };
        let text_col = column("text")?;
        let label_col = column("label")?;

        let mut records = Vec::new();
        let mut malformed = 0usize;

        for (row_no, result) in reader.byte_records().enumerate() {
            let row = match result {
                Ok(row) => row,
                Err(e) if e.is_io_error() => return Err(e.into()),
                Err(e) => {
                    warn!("Corpus row {} unreadable, kept as empty record: {}", row_no + 1, e);
                    malformed += 1;
                    records.push(CorpusRecord::new(None, None));
                    continue;
                }
            };

            let text = row.get(text_col).map(String::from_utf8_lossy);
            let text = text.as_deref().filter(|t| !t.trim().is_empty());
            let label = row
                .get(label_col)
                .and_then(|raw| std::str::from_utf8(raw).ok())
                .and_then(parse_label);
            if text.is_none() || label.is_none() {
                malformed += 1;
            }
            records.push(CorpusRecord::new(text, label));
        }

        if malformed > 0 {
            warn!("Corpus has {} row(s) with missing text or label", malformed);
        }
        debug!("Parsed {} corpus rows", records.len());
        Ok(Self::new(records))
    }

    pub fn records(&self) -> &[CorpusRecord] {
        &self.records
    }

    pub fn get(&self, row: usize) -> Option<&CorpusRecord> {
        self.records.get(row)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.text.as_str())
    }
}

/// Accepts "3", " 3 " and float spellings of integers such as "3.0".
fn parse_label(raw: &str) -> Option<Label> {
    let raw = raw.trim();
    if let Ok(label) = raw.parse::<Label>() {
        return Some(label);
    }
    raw.parse::<f64>()
        .ok()
        .filter(|f| f.is_finite() && f.fract() == 0.0)
        .map(|f| f as Label)
}

/// Disease name → label mapping, in authored order.
///
/// Order matters: when two names normalise to the same key, or share a
/// label, the later entry wins in the derived indexes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DiseaseMapping {
    entries: Vec<(String, Label)>,
}

impl DiseaseMapping {
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, Label)>,
        S: Into<String>,
    {
        Self {
            entries: pairs.into_iter().map(|(name, label)| (name.into(), label)).collect(),
        }
    }

    /// Parse a JSON object `{ "Disease name": label, ... }`, keeping key order.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        let Value::Object(map) = value else {
            return Err(SymptomatchError::Config(
                "disease mapping must be a JSON object of name → label".to_string(),
            ));
        };

        let mut entries = Vec::with_capacity(map.len());
        for (name, raw) in map {
            let label = json_label(&raw).ok_or_else(|| {
                SymptomatchError::Config(format!(
                    "disease '{name}' has a non-integer label: {raw}"
                ))
            })?;
            entries.push((name, label));
        }
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[(String, Label)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn json_label(value: &Value) -> Option<Label> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as Label)),
        Value::String(s) => parse_label(s),
        _ => None,
    }
}
