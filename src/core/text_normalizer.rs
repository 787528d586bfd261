//! Text Normalization
//!
//! Canonicalizes guesses and board answers before they are compared.

/// Normalize text for comparison
///
/// Lowercases, trims, and collapses every whitespace run to a single space.
/// Total over all inputs: an empty or whitespace-only string yields `""`.
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
