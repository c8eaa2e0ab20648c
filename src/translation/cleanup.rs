/*!
 * Text cleanup applied to run text before translation.
 *
 * Removes invisible debris that word processors leave in runs (control
 * characters, zero-width characters, exotic spaces, doubled spaces). Letters,
 * digits and punctuation are never touched, and the normalization is
 * idempotent.
 */

use once_cell::sync::Lazy;
use regex::Regex;

use crate::document::Run;

/// Control characters other than newline and tab
static CONTROL_CHARS_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\x00-\x08\x0B-\x1F\x7F\x{80}-\x{9F}]").unwrap());

/// Zero-width space, joiners and byte order mark
static ZERO_WIDTH_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\x{200B}-\x{200D}\x{FEFF}]").unwrap());

/// Non-breaking and typographic spaces
static UNICODE_SPACE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[\x{00A0}\x{1680}\x{2000}-\x{200A}\x{202F}\x{205F}\x{3000}]").unwrap()
});

static REPEATED_SPACE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t]{2,}").unwrap());

/// Normalize one piece of text.
pub fn normalize_text(text: &str) -> String {
    let text = CONTROL_CHARS_REGEX.replace_all(text, "");
    let text = ZERO_WIDTH_REGEX.replace_all(&text, "");
    let text = UNICODE_SPACE_REGEX.replace_all(&text, " ");
    REPEATED_SPACE_REGEX.replace_all(&text, " ").into_owned()
}

/// Normalize the text of every run, keeping formatting as is.
pub fn normalize_runs(runs: &[Run]) -> Vec<Run> {
    runs.iter()
        .map(|run| Run::new(normalize_text(&run.text), run.format.clone()))
        .collect()
}
