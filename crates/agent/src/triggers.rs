//! Forced-search trigger phrases
//!
//! When the model keeps asking questions but the user explicitly asked to
//! see options, the orchestrator forces a search retry. The phrase list is
//! fixed and market-specific (es-AR); a per-market override would move it
//! into `Settings` next to the brand table.

use stylist_core::normalize::norm;

const TRIGGER_PHRASES: [&str; 7] = [
    "opciones",
    "mostrame",
    "recomendá",
    "recomendar",
    "qué me recomendás",
    "ver productos",
    "las opciones",
];

/// True when the raw user text contains any trigger phrase,
/// case-insensitively.
pub fn wants_results(message: &str) -> bool {
    let message = norm(message);
    TRIGGER_PHRASES.iter().any(|phrase| message.contains(phrase))
}
