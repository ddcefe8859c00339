//! Chat-ready rendering of matcher and resolver results.

use crate::matcher::DiseaseMatch;
use crate::resolver::Resolution;

pub const NO_MATCHES_MESSAGE: &str = "No probable diseases found.";
pub const NOT_RECOGNIZED_MESSAGE: &str = "Disease not recognized.";
pub const DISCLAIMER: &str = "This is not a medical diagnosis. Please consult a professional.";

/// Markdown summary of ranked candidates for the symptom chat mode.
pub fn symptom_report(matches: &[DiseaseMatch]) -> String {
    if matches.is_empty() {
        return NO_MATCHES_MESSAGE.to_string();
    }

    let lines: Vec<String> = matches
        .iter()
        .map(|m| format!("**{} ({})**\n- {}", m.disease, m.probability, m.reason))
        .collect();

    format!(
        "Based on your symptoms, the most probable conditions are:\n\n{}\n\n{}",
        lines.join("\n"),
        DISCLAIMER
    )
}

/// Real-world example message for a resolved disease.
pub fn explanation_message(resolution: Option<&Resolution>) -> String {
    match resolution {
        Some(r) => format!(
            "Here’s a real-world symptom description related to {}:\n\n> {}",
            r.display_name, r.example_text
        ),
        None => NOT_RECOGNIZED_MESSAGE.to_string(),
    }
}
