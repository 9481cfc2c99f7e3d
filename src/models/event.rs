use std::fmt;

use serde::{Deserialize, Serialize};

/// Separator between description and year in the display form of an event
pub const YEAR_SEPARATOR: &str = " - ";

/// A single "on this day" entry returned by the feed.
///
/// Equality and hashing use `text` only: two entries from the same year are
/// still distinct, and the same description is the same event whatever year
/// the feed attaches to it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoricalEvent {
    pub text: String,
    pub year: i32,
}

impl HistoricalEvent {
    pub fn new(text: impl Into<String>, year: i32) -> Self {
        Self { text: text.into(), year }
    }

    /// Description part of `text`, without any trailing `" - <year>"` suffix
    pub fn description(&self) -> &str {
        self.text.split(YEAR_SEPARATOR).next().unwrap_or(&self.text)
    }

    /// Case-insensitive substring match against `text`.
    ///
    /// `needle_lower` must already be lowercased so callers filtering a whole
    /// list only pay for that once.
    pub fn matches_lowercase(&self, needle_lower: &str) -> bool {
        needle_lower.is_empty() || self.text.to_lowercase().contains(needle_lower)
    }
}

impl PartialEq for HistoricalEvent {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

impl Eq for HistoricalEvent {}

impl std::hash::Hash for HistoricalEvent {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.text.hash(state);
    }
}

impl fmt::Display for HistoricalEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.text, YEAR_SEPARATOR, self.year)
    }
}
