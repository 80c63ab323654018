use regex::{Regex, RegexBuilder};

use crate::check::patterns::MatchMode;

/// Computes the overlap between label patterns and the labels applied to a request.
///
/// The two modes report different things: exact matching reports the matched *patterns* (in
/// pattern order), regex matching reports the matched *labels* (in label order). Consumers of
/// the `labels` output rely on this.
pub enum LabelMatcher {
    Exact(Vec<String>),
    Regex(Vec<Regex>),
}

impl LabelMatcher {
    /// Prepares the patterns for matching. Regex patterns are compiled case-insensitively.
    pub fn new(patterns: &[String], mode: MatchMode) -> Result<Self, regex::Error> {
        match mode {
            MatchMode::Exact => Ok(Self::Exact(patterns.to_vec())),
            MatchMode::Regex => {
                let regexes = patterns
                    .iter()
                    .map(|pattern| RegexBuilder::new(pattern).case_insensitive(true).build())
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Self::Regex(regexes))
            }
        }
    }

    pub fn intersection(&self, applied: &[String]) -> Vec<String> {
        match self {
            Self::Exact(patterns) => {
                let applied: Vec<String> = applied.iter().map(|l| l.to_lowercase()).collect();
                patterns
                    .iter()
                    .filter(|pattern| applied.contains(&pattern.to_lowercase()))
                    .cloned()
                    .collect()
            }
            Self::Regex(regexes) => applied
                .iter()
                .filter(|label| regexes.iter().any(|regex| regex.is_match(label)))
                .cloned()
                .collect(),
        }
    }
}
