//! Data models for "on this day" lookups.
//!
//! - [`HistoricalEvent`] - One feed entry, identified by its text
//! - [`FavoriteEntry`] / [`Favorites`] - Starred events with the date label they were starred under
//! - [`date`] - Month/day labels and user date input parsing

pub mod date;
pub mod event;
pub mod favorite;

pub use date::{format_date_label, is_valid_month_day, parse_date_input};
pub use event::HistoricalEvent;
pub use favorite::{FavoriteEntry, Favorites, RemovalPolicy};
