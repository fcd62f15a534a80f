//! Operator input validation
//!
//! Checked before any network call so a fat-fingered scan never reaches
//! the backend.

/// Scanned/keyed codes: 1-64 chars of the serial alphabet
pub fn is_valid_code(code: &str) -> bool {
    !code.is_empty()
        && code.len() <= 64
        && code
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '/'))
}

/// Copy count accepted by the print queue
pub fn is_valid_copies(copies: u32) -> bool {
    (1..=999).contains(&copies)
}
