//! Per-article derived fields.
//!
//! All functions here are pure: keyword frequency, dollar-amount detection and
//! the picture filename stand-in.

use once_cell::sync::Lazy;
use regex::Regex;

/// A dollar sign followed by digits (with optional separators and fraction),
/// or a number followed by "dollars"/"USD".
static MONEY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\$[\d,]+(\.\d+)?|\d+\s?(dollars|USD)").expect("valid money regex")
});

/// Number of characters of the title kept in the picture filename.
const PICTURE_STEM_CHARS: usize = 20;

/// Count case-insensitive, non-overlapping occurrences of `phrase` across
/// `texts`.
///
/// An empty phrase counts as zero.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(keyword_count("cat", ["Cats are great", "I love my CAT"]), 2);
/// ```
pub fn keyword_count<'a, I>(phrase: &str, texts: I) -> usize
where
    I: IntoIterator<Item = &'a str>,
{
    let needle = phrase.to_lowercase();
    if needle.is_empty() {
        return 0;
    }
    texts
        .into_iter()
        .map(|text| text.to_lowercase().matches(needle.as_str()).count())
        .sum()
}

/// Whether `text` mentions a monetary amount.
pub fn mentions_money(text: &str) -> bool {
    MONEY_RE.is_match(text)
}

/// Derive an image filename from a headline.
///
/// First 20 characters, trimmed, spaces replaced with underscores, `.png`
/// appended.
pub fn picture_filename(title: &str) -> String {
    let stem: String = title.chars().take(PICTURE_STEM_CHARS).collect();
    format!("{}.png", stem.trim().replace(' ', "_"))
}
