//! Disease-name normalisation.
//!
//! Turns an arbitrary disease name ("Common-Cold!!", "  covid 19 ") into the
//! canonical lookup key used by the resolver ("common_cold", "covid_19"),
//! and back into a display form ("Common Cold").

/// Normalise a disease name into a lookup key.
///
/// Lower-cases, drops everything outside `[a-z0-9 ]`, collapses runs of
/// spaces, trims, then joins the remaining words with underscores.
pub fn normalise_disease_key(name: &str) -> String {
    let kept: String = name
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == ' ')
        .collect();

    kept.split(' ')
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join("_")
}

/// Human-readable form of a lookup key: underscores become spaces and each
/// word is title-cased ("common_cold" → "Common Cold").
///
/// A letter is upper-cased when it follows a non-letter, so "type2diabetes"
/// renders as "Type2Diabetes".
pub fn display_name(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    let mut prev_is_letter = false;

    for c in key.chars() {
        let c = if c == '_' { ' ' } else { c };
        if c.is_alphabetic() {
            if prev_is_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_is_letter = true;
        } else {
            out.push(c);
            prev_is_letter = false;
        }
    }
    out
}
