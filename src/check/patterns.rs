//! Turns the raw `labels` input into a list of label patterns.
use itertools::Itertools;

/// How label patterns are compared with the labels applied to a request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum MatchMode {
    /// Case-insensitive string equality.
    #[default]
    Exact,
    /// Case-insensitive, unanchored regular expression search.
    Regex,
}

/// Splits a raw label specification into patterns.
///
/// Regular expressions may contain commas, so in [`MatchMode::Regex`] only newlines separate
/// patterns. Exact patterns may be separated by both commas and newlines, and are trimmed.
/// Empty and repeated patterns are dropped; the first occurrence keeps its position.
pub fn normalize_patterns(raw: &str, mode: MatchMode) -> Vec<String> {
    let patterns: Vec<&str> = match mode {
        MatchMode::Regex => raw
            .split('\n')
            .map(|pattern| pattern.strip_suffix('\r').unwrap_or(pattern))
            .collect(),
        MatchMode::Exact => raw.split(['\n', ',']).map(str::trim).collect(),
    };
    patterns
        .into_iter()
        .filter(|pattern| !pattern.is_empty())
        .unique()
        .map(str::to_string)
        .collect()
}
