//! TUI application state and event handling.
//!
//! The `App` wraps a [`DateSelectionController`] and translates key actions into
//! controller calls. Lookups run as tasks on a tokio runtime; their results come
//! back over a channel and are handed to the controller on the UI thread, which
//! drops any that a newer selection has superseded.
//!
//! # Example
//!
//! ```rust,ignore
//! let runtime = tokio::runtime::Runtime::new()?;
//! let mut app = App::new(controller, runtime.handle().clone(), "Births");
//! app.run(&mut terminal)?;
//! ```

use std::time::{Duration, Instant};

use anyhow::Result;
use chrono::{Local, NaiveDate};
use ratatui::Terminal;
use ratatui::backend::Backend;
use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, warn};

use super::events::{Action, poll_event};
use super::rendering::{RenderState, render_ui};
use crate::controller::{CompletedLookup, DateSelectionController, FavoriteToggle};
use crate::listing::MAX_SEARCH_LEN;
use crate::models::parse_date_input;

/// Duration for success status messages (milliseconds)
const STATUS_SUCCESS_DURATION_MS: u64 = 3000;
/// Duration for error status messages (milliseconds)
const STATUS_ERROR_DURATION_MS: u64 = 5000;
/// Longest accepted date input, e.g. "2024-12-31"
const MAX_DATE_INPUT_LEN: usize = 10;

/// Type of status message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageType {
    Success,
    Error,
}

/// Transient status message with expiry
#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub message_type: MessageType,
    pub expires_at: Instant,
}

/// Input field receiving typed characters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Date,
    Search,
}

pub struct App {
    controller: DateSelectionController,
    runtime: Handle,
    results_tx: UnboundedSender<CompletedLookup>,
    results_rx: UnboundedReceiver<CompletedLookup>,
    heading: &'static str,
    focus: Focus,
    date_input: String,
    search_input: String,
    cursor: usize,
    should_quit: bool,
    status_message: Option<StatusMessage>,
    // Dirty state tracking for efficient rendering
    needs_redraw: bool,
    last_draw_time: Instant,
}

impl App {
    pub fn new(controller: DateSelectionController, runtime: Handle, heading: &'static str) -> Self {
        let (results_tx, results_rx) = mpsc::unbounded_channel();

        Self {
            controller,
            runtime,
            results_tx,
            results_rx,
            heading,
            focus: Focus::Date,
            date_input: String::new(),
            search_input: String::new(),
            cursor: 0,
            should_quit: false,
            status_message: None,
            needs_redraw: true,
            last_draw_time: Instant::now(),
        }
    }

    /// Give back the controller, e.g. to flush favorites after the loop ends
    pub fn into_controller(self) -> DateSelectionController {
        self.controller
    }

    /// Select `date` and start its lookup in the background
    pub fn select_date(&mut self, date: NaiveDate) {
        self.date_input = date.format("%Y-%m-%d").to_string();

        if let Some(request) = self.controller.select_date(Some(date)) {
            let client = self.controller.client();
            let tx = self.results_tx.clone();
            self.runtime.spawn(async move {
                let completed = request.run(client.as_ref()).await;
                // Receiver is gone once the app has quit
                let _ = tx.send(completed);
            });
        }

        self.cursor = 0;
        self.needs_redraw = true;
    }

    /// Set a transient status message with automatic expiry
    fn set_status(&mut self, text: impl Into<String>, message_type: MessageType, duration_ms: u64) {
        self.status_message = Some(StatusMessage {
            text: text.into(),
            message_type,
            expires_at: Instant::now() + Duration::from_millis(duration_ms),
        });
        self.needs_redraw = true;
    }

    /// Check and clear expired status messages
    fn check_and_clear_expired_status(&mut self) {
        let should_clear =
            self.status_message.as_ref().is_some_and(|msg| Instant::now() >= msg.expires_at);
        if should_clear {
            self.status_message = None;
            self.needs_redraw = true;
        }
    }

    /// Hand finished lookups to the controller
    fn process_lookup_results(&mut self) {
        while let Ok(completed) = self.results_rx.try_recv() {
            if self.controller.apply_lookup(completed) {
                self.cursor = 0;
                self.needs_redraw = true;
            }
        }
    }

    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        while !self.should_quit {
            self.check_and_clear_expired_status();
            self.process_lookup_results();

            // Draw if dirty or if it's been >100ms (for terminal resize handling)
            let now = Instant::now();
            let elapsed = now.duration_since(self.last_draw_time);
            if self.needs_redraw || elapsed >= Duration::from_millis(100) {
                let view = self.controller.snapshot();
                terminal.draw(|f| {
                    let state = RenderState {
                        view: &view,
                        heading: self.heading,
                        date_input: &self.date_input,
                        search_input: &self.search_input,
                        focus: self.focus,
                        cursor: self.cursor,
                        status_message: self.status_message.as_ref(),
                    };
                    render_ui(f, &state);
                })?;
                self.needs_redraw = false;
                self.last_draw_time = now;
            }

            let action = poll_event(Duration::from_millis(100))?;
            self.handle_action(action);
        }

        Ok(())
    }

    /// Handle a user action (extracted for testing)
    fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::Escape => self.escape(),
            Action::ToggleFocus => {
                self.focus = match self.focus {
                    Focus::Date => Focus::Search,
                    Focus::Search => Focus::Date,
                };
                self.needs_redraw = true;
            }
            Action::Submit => {
                if self.focus == Focus::Date {
                    self.submit_date();
                }
            }
            Action::MoveUp => self.move_cursor(-1),
            Action::MoveDown => self.move_cursor(1),
            Action::PrevPage => {
                if self.controller.prev_page() {
                    self.cursor = 0;
                    self.needs_redraw = true;
                }
            }
            Action::NextPage => {
                if self.controller.next_page() {
                    self.cursor = 0;
                    self.needs_redraw = true;
                }
            }
            Action::PrevDay => self.step_day(-1),
            Action::NextDay => self.step_day(1),
            Action::ToggleFavorite => self.toggle_favorite(),
            Action::Input(c) => self.insert_char(c),
            Action::DeleteChar => self.delete_char(),
            Action::None => {}
        }
    }

    /// Clear the focused field, or quit when it is already empty
    fn escape(&mut self) {
        match self.focus {
            Focus::Date if !self.date_input.is_empty() => self.date_input.clear(),
            Focus::Search if !self.search_input.is_empty() => {
                self.search_input.clear();
                self.controller.set_search_term("");
                self.cursor = 0;
            }
            _ => self.should_quit = true,
        }
        self.needs_redraw = true;
    }

    fn submit_date(&mut self) {
        match parse_date_input(&self.date_input) {
            Ok(date) => self.select_date(date),
            Err(e) => {
                debug!(input = %self.date_input, error = %e, "Rejected date input");
                self.set_status(format!("✗ {}", e), MessageType::Error, STATUS_ERROR_DURATION_MS);
            }
        }
    }

    fn step_day(&mut self, delta: i64) {
        let base = self.controller.selected_date().unwrap_or_else(|| Local::now().date_naive());
        match base.checked_add_signed(chrono::Duration::days(delta)) {
            Some(date) => self.select_date(date),
            None => warn!(%base, delta, "Date out of range"),
        }
    }

    fn toggle_favorite(&mut self) {
        let rows = self.controller.snapshot().rows;
        let Some(row) = rows.get(self.cursor) else {
            self.set_status("✗ No event selected", MessageType::Error, STATUS_ERROR_DURATION_MS);
            return;
        };

        match self.controller.toggle_favorite(&row.event) {
            Ok(FavoriteToggle::Added) => {
                self.set_status("★ Added to favorites", MessageType::Success, STATUS_SUCCESS_DURATION_MS)
            }
            Ok(FavoriteToggle::Removed(_)) => self.set_status(
                "☆ Removed from favorites",
                MessageType::Success,
                STATUS_SUCCESS_DURATION_MS,
            ),
            Ok(FavoriteToggle::Ignored) => {
                self.set_status("✗ Select a date first", MessageType::Error, STATUS_ERROR_DURATION_MS)
            }
            Err(e) => self.set_status(
                format!("✗ Could not save favorites: {}", e),
                MessageType::Error,
                STATUS_ERROR_DURATION_MS,
            ),
        }
    }

    fn move_cursor(&mut self, delta: isize) {
        let total = self.controller.list().visible_page().len();
        if total == 0 {
            self.cursor = 0;
            return;
        }

        let old = self.cursor;
        let new = (self.cursor as isize + delta).max(0) as usize;
        self.cursor = new.min(total - 1);

        if old != self.cursor {
            self.needs_redraw = true;
        }
    }

    fn insert_char(&mut self, c: char) {
        match self.focus {
            Focus::Date => {
                if self.date_input.len() < MAX_DATE_INPUT_LEN {
                    self.date_input.push(c);
                    self.needs_redraw = true;
                }
            }
            Focus::Search => {
                if self.search_input.len() < MAX_SEARCH_LEN {
                    self.search_input.push(c);
                    self.controller.set_search_term(&self.search_input);
                    self.cursor = 0;
                    self.needs_redraw = true;
                }
            }
        }
    }

    fn delete_char(&mut self) {
        let removed = match self.focus {
            Focus::Date => self.date_input.pop().is_some(),
            Focus::Search => {
                let removed = self.search_input.pop().is_some();
                if removed {
                    self.controller.set_search_term(&self.search_input);
                    self.cursor = 0;
                }
                removed
            }
        };
        if removed {
            self.needs_redraw = true;
        }
    }
}
