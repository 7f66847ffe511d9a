//! Answer matching and option-form comparison.

use serde::{Deserialize, Serialize};

/// Characters that end the primary displayed form of an answer.
const FORM_SEPARATORS: &[char] = &[',', ';', '/', '('];

/// Result of comparing a selected option to the correct answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResult {
    /// Whether the answer is considered correct.
    pub is_correct: bool,
    /// Normalized selected answer (for display).
    pub selected_normalized: String,
    /// Normalized correct answer (for display).
    pub correct_normalized: String,
}

/// Compare a selected option to the correct answer, ignoring case and
/// surrounding or repeated whitespace.
pub fn compare_answers(selected: &str, correct: &str) -> MatchResult {
    let selected_normalized = normalize_whitespace(selected);
    let correct_normalized = normalize_whitespace(correct);
    let is_correct = selected_normalized.to_lowercase() == correct_normalized.to_lowercase();

    MatchResult {
        is_correct,
        selected_normalized,
        correct_normalized,
    }
}

/// Normalize whitespace in a string (trim and collapse multiple spaces).
pub fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Lowercased text before the first separator, used to spot options that
/// would read the same to the learner.
pub fn primary_form(s: &str) -> String {
    let head = s.split(FORM_SEPARATORS).next().unwrap_or_default();
    normalize_whitespace(head).to_lowercase()
}

/// Whether the first letter is uppercase.
pub fn starts_uppercase(s: &str) -> bool {
    s.trim_start()
        .chars()
        .next()
        .map(char::is_uppercase)
        .unwrap_or(false)
}

/// Copy the leading capitalisation of `pattern` onto `word`.
pub fn match_capitalization(word: &str, pattern: &str) -> String {
    if !starts_uppercase(pattern) {
        return word.to_string();
    }
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
