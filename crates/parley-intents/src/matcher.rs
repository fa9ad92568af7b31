use crate::catalog::{Intent, IntentCatalog};
use regex::{Captures, Regex};
use std::collections::HashMap;

/// Substrings captured by the named groups of the winning pattern.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchResult {
    captures: HashMap<String, String>,
}

impl MatchResult {
    fn from_captures(regex: &Regex, caps: &Captures<'_>) -> Self {
        let captures = regex
            .capture_names()
            .flatten()
            .filter_map(|name| {
                caps.name(name)
                    .map(|m| (name.to_string(), m.as_str().to_string()))
            })
            .collect();
        Self { captures }
    }

    /// The value captured for a named group, if that group participated.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.captures.get(name).map(String::as_str)
    }

    /// True when the pattern had no participating named groups.
    pub fn is_empty(&self) -> bool {
        self.captures.is_empty()
    }
}

/// Outcome of intent resolution.
#[derive(Debug, Clone)]
pub struct Resolution<'a> {
    /// The winning intent, or the catalog's fallback.
    pub intent: &'a Intent,
    /// Named captures. `None` only for the fallback.
    pub matched: Option<MatchResult>,
}

/// Find the first intent, in catalog order, with a pattern that matches `text`.
///
/// Within an intent patterns are tried in list order. Matching is a
/// case-insensitive search, not a full match. When nothing matches, the
/// catalog's fallback intent is returned with no match result.
pub fn resolve<'a>(catalog: &'a IntentCatalog, text: &str) -> Resolution<'a> {
    for intent in catalog.intents() {
        for regex in intent.patterns() {
            if let Some(caps) = regex.captures(text) {
                return Resolution {
                    intent,
                    matched: Some(MatchResult::from_captures(regex, &caps)),
                };
            }
        }
    }
    Resolution {
        intent: catalog.fallback(),
        matched: None,
    }
}
