use serde::{Deserialize, Serialize};

use super::event::HistoricalEvent;

/// An event the user starred, remembered with the date label it was starred under
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteEntry {
    pub text: String,
    pub year: i32,
    #[serde(rename = "formattedDate")]
    pub formatted_date: String,
}

impl FavoriteEntry {
    pub fn new(event: &HistoricalEvent, formatted_date: impl Into<String>) -> Self {
        Self { text: event.text.clone(), year: event.year, formatted_date: formatted_date.into() }
    }

    pub fn event(&self) -> HistoricalEvent {
        HistoricalEvent::new(self.text.clone(), self.year)
    }

    fn same_key(&self, text: &str, formatted_date: &str) -> bool {
        self.text == text && self.formatted_date == formatted_date
    }
}

/// How an "unfavorite" action picks the entries it removes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemovalPolicy {
    /// Remove every entry with the same text, whatever date it was starred under
    #[default]
    TextOnly,
    /// Remove only the entry starred under the given date label
    TextAndDate,
}

/// Ordered favorites collection, unique by `(text, formatted_date)`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Favorites {
    entries: Vec<FavoriteEntry>,
}

impl Favorites {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from persisted entries, dropping duplicate keys (first one wins)
    pub fn from_entries(entries: impl IntoIterator<Item = FavoriteEntry>) -> Self {
        let mut favorites = Self::new();
        for entry in entries {
            favorites.insert(entry);
        }
        favorites
    }

    /// Add `event` under `formatted_date`. Returns false if that pair already exists.
    pub fn add(&mut self, event: &HistoricalEvent, formatted_date: &str) -> bool {
        self.insert(FavoriteEntry::new(event, formatted_date))
    }

    fn insert(&mut self, entry: FavoriteEntry) -> bool {
        if self.entries.iter().any(|e| e.same_key(&entry.text, &entry.formatted_date)) {
            return false;
        }
        self.entries.push(entry);
        true
    }

    /// Remove entries for `event` according to `policy`. Returns how many were removed.
    pub fn remove(
        &mut self,
        event: &HistoricalEvent,
        formatted_date: &str,
        policy: RemovalPolicy,
    ) -> usize {
        let before = self.entries.len();
        match policy {
            RemovalPolicy::TextOnly => self.entries.retain(|e| e.text != event.text),
            RemovalPolicy::TextAndDate => {
                self.entries.retain(|e| !e.same_key(&event.text, formatted_date))
            }
        }
        before - self.entries.len()
    }

    pub fn contains(&self, text: &str, formatted_date: &str) -> bool {
        self.entries.iter().any(|e| e.same_key(text, formatted_date))
    }

    pub fn entries(&self) -> &[FavoriteEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
