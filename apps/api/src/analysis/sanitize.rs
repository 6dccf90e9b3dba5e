//! Text sanitizer — normalizes raw resume/job-description text into a
//! bounded, analyzable string before it is embedded in a prompt.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::AppError;

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
/// Everything outside word chars, whitespace and the approved punctuation set.
static DISALLOWED: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\s.,;:()\-@]").unwrap());

/// Collapses whitespace runs, strips disallowed characters, trims, and
/// silently truncates to `max_chars`. Truncation is not an error — callers
/// that need a lower bound use `sanitize_checked`.
pub fn sanitize(raw: &str, max_chars: usize) -> String {
    let collapsed = WHITESPACE_RUN.replace_all(raw, " ");
    let stripped = DISALLOWED.replace_all(&collapsed, "");
    let trimmed = stripped.trim();

    match trimmed.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => trimmed[..byte_idx].to_string(),
        None => trimmed.to_string(),
    }
}

/// Sanitizes and enforces a caller-supplied minimum length. This is the only
/// validation failure in the analysis pipeline; every later failure is
/// absorbed into a fallback result.
pub fn sanitize_checked(
    raw: &str,
    max_chars: usize,
    min_chars: usize,
) -> Result<String, AppError> {
    let text = sanitize(raw, max_chars);
    if text.chars().count() < min_chars {
        return Err(AppError::Validation(format!(
            "Text is too short: {} characters after sanitization (minimum {min_chars})",
            text.chars().count()
        )));
    }
    Ok(text)
}
