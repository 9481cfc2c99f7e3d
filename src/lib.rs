//! On This Day Explorer - see who was born on a given day and keep favorites
//!
//! This library looks up the Wikimedia "on this day" feed for a month/day and
//! lets front ends browse the result. It provides:
//!
//! - A lookup client for the feed, with optional per-day memoization
//! - A favorites collection persisted as a JSON file
//! - Searchable, paginated list state
//! - A date selection controller that ignores out-of-order lookup results
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use chrono::NaiveDate;
//! use onthisday_explorer::{
//!     DateSelectionController, FeedClient, FeedOptions, MemoryFavoritesStore, RemovalPolicy,
//! };
//!
//! # async fn demo() -> anyhow::Result<()> {
//! let client = FeedClient::new(FeedOptions::default())?;
//! let mut controller = DateSelectionController::new(
//!     Arc::new(client),
//!     Box::new(MemoryFavoritesStore::new()),
//!     10,
//!     RemovalPolicy::default(),
//! );
//! controller.on_date_selected(NaiveDate::from_ymd_opt(2024, 3, 5)).await;
//! for row in controller.snapshot().rows {
//!     println!("{}", row.event);
//! }
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod controller;
pub mod favorites;
pub mod feed;
pub mod listing;
pub mod logging;
pub mod models;
pub mod session;
pub mod tui;

// Re-export commonly used types
pub use config::Settings;
pub use controller::{CompletedLookup, DateSelectionController, LookupRequest, ViewSnapshot};
pub use favorites::{FavoritesStore, JsonFavoritesStore, MemoryFavoritesStore};
pub use feed::{CachedLookup, FeedCategory, FeedClient, FeedOptions, LookupClient, LookupError};
pub use listing::EventListState;
pub use models::{FavoriteEntry, Favorites, HistoricalEvent, RemovalPolicy};
