//! `{{ placeholder }}` substitution for the failure message.
use std::collections::HashMap;
use std::sync::OnceLock;

use regex::{Captures, Regex};

/// Rendered in place of a placeholder that has no value.
const UNDEFINED: &str = "undefined";

fn placeholder_regex() -> &'static Regex {
    static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
    PLACEHOLDER.get_or_init(|| Regex::new(r"\{\{\s*(.*?)\s*\}\}").expect("valid placeholder regex"))
}

/// Values available to a message template.
#[derive(Debug, Default)]
pub struct TemplateValues(HashMap<String, String>);

impl TemplateValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &str, value: impl ToString) -> Self {
        self.0.insert(name.to_string(), value.to_string());
        self
    }

    fn get(&self, name: &str) -> &str {
        self.0.get(name).map(String::as_str).unwrap_or(UNDEFINED)
    }
}

/// Replaces every `{{ name }}` in `template` with its value. Whitespace inside the braces is
/// ignored, unknown names render as `undefined`.
pub fn render_template(template: &str, values: &TemplateValues) -> String {
    placeholder_regex()
        .replace_all(template, |captures: &Captures| values.get(&captures[1]).to_string())
        .into_owned()
}
