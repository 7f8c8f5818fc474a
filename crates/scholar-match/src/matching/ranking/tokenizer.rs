//! Word tokenizer for relevance scoring.
//!
//! Lowercases, treats every character outside `[A-Za-z0-9_]` as a separator
//! and drops tokens of two characters or fewer.

/// Shortest token kept, in bytes. Every kept character is ASCII.
const MIN_TOKEN_LEN: usize = 3;

pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .filter(|token| token.len() >= MIN_TOKEN_LEN)
        .map(str::to_string)
        .collect()
}
