//! Remote "on this day" lookups.
//!
//! [`LookupClient::fetch`] keeps the typed [`LookupError`]; [`LookupClient::lookup`]
//! is the UI-facing call that logs failures and returns no events instead.

pub mod cache;
pub mod client;
pub mod error;

pub use cache::CachedLookup;
pub use client::{FeedCategory, FeedClient, FeedOptions, LookupClient, parse_feed};
pub use error::{LookupError, LookupResult};
