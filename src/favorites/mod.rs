//! Persisted favorites.
//!
//! Favorites live in a single JSON file (an array of entries with `text`, `year`
//! and `formattedDate`), read once at startup and rewritten on every change.

pub mod error;
pub mod store;

pub use error::{PersistenceError, PersistenceResult};
pub use store::{FavoritesStore, JsonFavoritesStore, MemoryFavoritesStore, default_favorites_path};
