use crate::models::HistoricalEvent;

pub const DEFAULT_PAGE_SIZE: usize = 10;
/// Longest accepted search term, in characters
pub const MAX_SEARCH_LEN: usize = 256;

/// Raw events plus the search and paging state that derives the visible page.
///
/// Filtering and slicing are recomputed on demand, never stored:
/// `filtered = raw where text contains term (case-insensitive)`,
/// `visible = filtered[(page-1)*page_size .. page*page_size]`.
#[derive(Debug, Clone)]
pub struct EventListState {
    raw_events: Vec<HistoricalEvent>,
    search_term: String,
    search_lower: String,
    page: usize,
    page_size: usize,
}

impl EventListState {
    /// `page_size` of zero is treated as one
    pub fn new(page_size: usize) -> Self {
        Self {
            raw_events: Vec::new(),
            search_term: String::new(),
            search_lower: String::new(),
            page: 1,
            page_size: page_size.max(1),
        }
    }

    /// Replace the raw list and go back to page 1
    pub fn set_raw_events(&mut self, events: Vec<HistoricalEvent>) {
        self.raw_events = events;
        self.page = 1;
    }

    /// Change the filter and go back to page 1
    pub fn set_search_term(&mut self, term: &str) {
        let term: String = term.chars().take(MAX_SEARCH_LEN).collect();
        self.search_lower = term.to_lowercase();
        self.search_term = term;
        self.page = 1;
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn raw_events(&self) -> &[HistoricalEvent] {
        &self.raw_events
    }

    /// Events matching the search term, in feed order
    pub fn filtered(&self) -> impl Iterator<Item = &HistoricalEvent> {
        self.raw_events.iter().filter(|event| event.matches_lowercase(&self.search_lower))
    }

    pub fn filtered_len(&self) -> usize {
        self.filtered().count()
    }

    pub fn total_len(&self) -> usize {
        self.raw_events.len()
    }

    /// The current page of filtered events (at most `page_size` items)
    pub fn visible_page(&self) -> Vec<&HistoricalEvent> {
        self.filtered().skip((self.page - 1) * self.page_size).take(self.page_size).collect()
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Number of pages; an empty result still has one (empty) page
    pub fn page_count(&self) -> usize {
        self.filtered_len().div_ceil(self.page_size).max(1)
    }

    pub fn has_next_page(&self) -> bool {
        self.page * self.page_size < self.filtered_len()
    }

    pub fn has_prev_page(&self) -> bool {
        self.page > 1
    }

    /// Advance one page. No-op on the last page. Returns whether the page changed.
    pub fn next_page(&mut self) -> bool {
        if self.has_next_page() {
            self.page += 1;
            true
        } else {
            false
        }
    }

    /// Go back one page. No-op on page 1. Returns whether the page changed.
    pub fn prev_page(&mut self) -> bool {
        if self.has_prev_page() {
            self.page -= 1;
            true
        } else {
            false
        }
    }
}

impl Default for EventListState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}
