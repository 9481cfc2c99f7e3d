//! Date selection coordinator.
//!
//! Owns everything a session shows: the selected date, the event list state and
//! the favorites collection. Front ends feed it user actions and render the
//! [`ViewSnapshot`] it produces.
//!
//! # Ordering
//!
//! Lookups are asynchronous and may complete out of order. Every selection gets
//! a new sequence number; [`DateSelectionController::select_date`] hands back a
//! [`LookupRequest`] carrying it, and [`DateSelectionController::apply_lookup`]
//! only accepts the completion whose sequence is the latest issued. The list on
//! screen therefore always belongs to the most recently *issued* selection.
//!
//! ```rust,ignore
//! let request = controller.select_date(Some(date)).unwrap();
//! let completed = request.run(controller.client().as_ref()).await;
//! controller.apply_lookup(completed);
//! ```

use std::sync::Arc;

use chrono::{Datelike, NaiveDate};
use tracing::{debug, error};

use crate::favorites::{FavoritesStore, PersistenceResult};
use crate::feed::LookupClient;
use crate::listing::EventListState;
use crate::models::{FavoriteEntry, Favorites, HistoricalEvent, RemovalPolicy, format_date_label};

/// A lookup issued for a selection, tagged with its sequence number
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LookupRequest {
    pub seq: u64,
    pub date: NaiveDate,
}

impl LookupRequest {
    pub fn month(&self) -> u32 {
        self.date.month()
    }

    pub fn day(&self) -> u32 {
        self.date.day()
    }

    /// Perform the lookup. Failures arrive as an empty event list.
    pub async fn run(self, client: &dyn LookupClient) -> CompletedLookup {
        let events = client.lookup(self.month(), self.day()).await;
        CompletedLookup { seq: self.seq, events }
    }
}

/// Result of a [`LookupRequest`], to be handed back to the controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedLookup {
    pub seq: u64,
    pub events: Vec<HistoricalEvent>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionPhase {
    /// No date selected yet, empty list
    Idle,
    /// A date is selected; the list reflects its lookup once that completes
    Loaded,
}

/// Outcome of a favorite toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FavoriteToggle {
    Added,
    /// Number of entries removed
    Removed(usize),
    /// No date selected, nothing to attach the favorite to
    Ignored,
}

/// One visible event and whether it is favorited under the current date
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRow {
    pub event: HistoricalEvent,
    pub favorited: bool,
}

/// Immutable copy of everything a front end renders
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewSnapshot {
    pub selected_date: Option<NaiveDate>,
    pub date_label: Option<String>,
    pub loading: bool,
    pub search_term: String,
    pub rows: Vec<EventRow>,
    pub page: usize,
    pub page_count: usize,
    pub filtered_len: usize,
    pub total_len: usize,
    pub favorites: Vec<FavoriteEntry>,
    pub unsaved_favorites: bool,
}

pub struct DateSelectionController {
    client: Arc<dyn LookupClient>,
    store: Box<dyn FavoritesStore>,
    list: EventListState,
    favorites: Favorites,
    removal_policy: RemovalPolicy,
    selected_date: Option<NaiveDate>,
    issued_seq: u64,
    pending_seq: Option<u64>,
    unsaved: bool,
}

impl DateSelectionController {
    /// Create a controller, loading persisted favorites from `store`
    pub fn new(
        client: Arc<dyn LookupClient>,
        store: Box<dyn FavoritesStore>,
        page_size: usize,
        removal_policy: RemovalPolicy,
    ) -> Self {
        let favorites = store.load();
        debug!(count = favorites.len(), "Loaded favorites");

        Self {
            client,
            store,
            list: EventListState::new(page_size),
            favorites,
            removal_policy,
            selected_date: None,
            issued_seq: 0,
            pending_seq: None,
            unsaved: false,
        }
    }

    /// Lookup client, for running [`LookupRequest`]s off the UI thread
    pub fn client(&self) -> Arc<dyn LookupClient> {
        Arc::clone(&self.client)
    }

    /// Record a new selection. `None` is ignored.
    ///
    /// The list is cleared right away so the previous date's events are never
    /// shown under the new date's label.
    pub fn select_date(&mut self, date: Option<NaiveDate>) -> Option<LookupRequest> {
        let date = date?;

        self.issued_seq += 1;
        self.selected_date = Some(date);
        self.pending_seq = Some(self.issued_seq);
        self.list.set_raw_events(Vec::new());

        debug!(seq = self.issued_seq, %date, "Date selected");
        Some(LookupRequest { seq: self.issued_seq, date })
    }

    /// Apply a completed lookup if it belongs to the latest selection.
    /// Returns false for superseded completions, which are dropped.
    pub fn apply_lookup(&mut self, completed: CompletedLookup) -> bool {
        if self.pending_seq != Some(completed.seq) {
            debug!(
                seq = completed.seq,
                latest = self.issued_seq,
                "Discarding superseded lookup result"
            );
            return false;
        }

        self.pending_seq = None;
        self.list.set_raw_events(completed.events);
        true
    }

    /// Select `date`, wait for its lookup and apply it
    pub async fn on_date_selected(&mut self, date: Option<NaiveDate>) -> bool {
        let Some(request) = self.select_date(date) else {
            return false;
        };
        let client = self.client();
        let completed = request.run(client.as_ref()).await;
        self.apply_lookup(completed)
    }

    pub fn phase(&self) -> SelectionPhase {
        if self.selected_date.is_some() { SelectionPhase::Loaded } else { SelectionPhase::Idle }
    }

    pub fn is_loading(&self) -> bool {
        self.pending_seq.is_some()
    }

    pub fn selected_date(&self) -> Option<NaiveDate> {
        self.selected_date
    }

    /// Label of the current selection, e.g. "January 1"
    pub fn formatted_date(&self) -> Option<String> {
        self.selected_date.map(format_date_label)
    }

    pub fn list(&self) -> &EventListState {
        &self.list
    }

    pub fn set_search_term(&mut self, term: &str) {
        self.list.set_search_term(term);
    }

    pub fn next_page(&mut self) -> bool {
        self.list.next_page()
    }

    pub fn prev_page(&mut self) -> bool {
        self.list.prev_page()
    }

    pub fn favorites(&self) -> &Favorites {
        &self.favorites
    }

    pub fn removal_policy(&self) -> RemovalPolicy {
        self.removal_policy
    }

    /// Favorited under the current date label (text and label both match)
    pub fn is_favorited(&self, event: &HistoricalEvent) -> bool {
        self.formatted_date().is_some_and(|label| self.favorites.contains(&event.text, &label))
    }

    /// Star or unstar `event` under the current date and persist the change.
    ///
    /// On a write failure the in-memory change is kept and marked unsaved, so
    /// [`flush`](Self::flush) can retry it later; the error is still returned
    /// for the front end to report.
    pub fn toggle_favorite(&mut self, event: &HistoricalEvent) -> PersistenceResult<FavoriteToggle> {
        let Some(label) = self.formatted_date() else {
            return Ok(FavoriteToggle::Ignored);
        };

        let outcome = if self.favorites.contains(&event.text, &label) {
            FavoriteToggle::Removed(self.favorites.remove(event, &label, self.removal_policy))
        } else {
            self.favorites.add(event, &label);
            FavoriteToggle::Added
        };

        self.persist()?;
        Ok(outcome)
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.unsaved
    }

    /// Retry a failed save. Returns true if anything was written.
    pub fn flush(&mut self) -> PersistenceResult<bool> {
        if !self.unsaved {
            return Ok(false);
        }
        self.persist()?;
        Ok(true)
    }

    fn persist(&mut self) -> PersistenceResult<()> {
        match self.store.save(&self.favorites) {
            Ok(()) => {
                self.unsaved = false;
                Ok(())
            }
            Err(e) => {
                self.unsaved = true;
                error!(error = %e, "Failed to save favorites");
                Err(e)
            }
        }
    }

    /// Copy out the current view
    pub fn snapshot(&self) -> ViewSnapshot {
        let label = self.formatted_date();
        let rows = self
            .list
            .visible_page()
            .into_iter()
            .map(|event| EventRow {
                favorited: label
                    .as_deref()
                    .is_some_and(|label| self.favorites.contains(&event.text, label)),
                event: event.clone(),
            })
            .collect();

        ViewSnapshot {
            selected_date: self.selected_date,
            date_label: label,
            loading: self.is_loading(),
            search_term: self.list.search_term().to_string(),
            rows,
            page: self.list.page(),
            page_count: self.list.page_count(),
            filtered_len: self.list.filtered_len(),
            total_len: self.list.total_len(),
            favorites: self.favorites.entries().to_vec(),
            unsaved_favorites: self.unsaved,
        }
    }
}
