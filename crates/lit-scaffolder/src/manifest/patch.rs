//! Ordered find/replace rules over raw document text
//!
//! Rules run in sequence, each against the output of the previous one, so a
//! later rule can match text introduced by an earlier rule. A rule that finds
//! nothing leaves the text byte-identical.

use regex::{NoExpand, Regex};
use std::borrow::Cow;
use tracing::debug;

/// What a rule searches for
#[derive(Debug, Clone)]
pub enum Pattern {
    Literal(String),
    Regex(Regex),
}

/// How many matches a rule rewrites
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Occurrence {
    First,
    All,
}

/// A single search/replace operation
#[derive(Debug, Clone)]
pub struct Rule {
    pattern: Pattern,
    replacement: String,
    occurrence: Occurrence,
}

impl Rule {
    /// Literal search replacing every occurrence
    pub fn literal(search: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self {
            pattern: Pattern::Literal(search.into()),
            replacement: replacement.into(),
            occurrence: Occurrence::All,
        }
    }

    /// Regex search replacing every match; the replacement is inserted verbatim
    pub fn regex(pattern: Regex, replacement: impl Into<String>) -> Self {
        Self {
            pattern: Pattern::Regex(pattern),
            replacement: replacement.into(),
            occurrence: Occurrence::All,
        }
    }

    /// Restrict the rule to its first match
    pub fn first(mut self) -> Self {
        self.occurrence = Occurrence::First;
        self
    }

    pub fn replacement(&self) -> &str {
        &self.replacement
    }

    pub fn matches(&self, text: &str) -> bool {
        match &self.pattern {
            Pattern::Literal(search) => !search.is_empty() && text.contains(search.as_str()),
            Pattern::Regex(regex) => regex.is_match(text),
        }
    }

    /// Apply the rule, borrowing the input untouched when nothing matches
    pub fn apply<'t>(&self, text: &'t str) -> Cow<'t, str> {
        if !self.matches(text) {
            return Cow::Borrowed(text);
        }

        match (&self.pattern, self.occurrence) {
            (Pattern::Literal(search), Occurrence::All) => {
                Cow::Owned(text.replace(search.as_str(), &self.replacement))
            }
            (Pattern::Literal(search), Occurrence::First) => {
                Cow::Owned(text.replacen(search.as_str(), &self.replacement, 1))
            }
            (Pattern::Regex(regex), Occurrence::All) => {
                regex.replace_all(text, NoExpand(&self.replacement))
            }
            (Pattern::Regex(regex), Occurrence::First) => {
                regex.replace(text, NoExpand(&self.replacement))
            }
        }
    }

    fn search_display(&self) -> &str {
        match &self.pattern {
            Pattern::Literal(search) => search,
            Pattern::Regex(regex) => regex.as_str(),
        }
    }
}

/// Apply `rules` in order, threading each output into the next rule
pub fn patch(text: &str, rules: &[Rule]) -> String {
    let mut current = text.to_string();
    for rule in rules {
        let patched = match rule.apply(&current) {
            Cow::Borrowed(_) => {
                debug!(searched = rule.search_display(), "rule did not match");
                continue;
            }
            Cow::Owned(patched) => patched,
        };
        debug!(
            searched = rule.search_display(),
            replaced_by = rule.replacement(),
            "rule applied"
        );
        current = patched;
    }
    current
}
