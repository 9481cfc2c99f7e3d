//! Wiring settings into a ready-to-use controller

use std::sync::Arc;

use anyhow::{Context, Result};

use crate::config::Settings;
use crate::controller::DateSelectionController;
use crate::favorites::{FavoritesStore, JsonFavoritesStore, MemoryFavoritesStore};
use crate::feed::{CachedLookup, FeedClient, LookupClient};

/// Feed client per settings, memoized unless `cache_lookups` is off
pub fn build_client(settings: &Settings) -> Result<Arc<dyn LookupClient>> {
    let client = FeedClient::new(settings.feed_options()).context("Failed to build HTTP client")?;
    if settings.cache_lookups {
        Ok(Arc::new(CachedLookup::new(client)))
    } else {
        Ok(Arc::new(client))
    }
}

/// Favorites file store, or an in-memory one when `persist` is false
pub fn build_store(settings: &Settings, persist: bool) -> Result<Box<dyn FavoritesStore>> {
    if !persist {
        return Ok(Box::new(MemoryFavoritesStore::new()));
    }
    let path = settings.favorites_path().context("Failed to locate favorites file")?;
    Ok(Box::new(JsonFavoritesStore::new(path)))
}

pub fn build_controller(settings: &Settings, persist: bool) -> Result<DateSelectionController> {
    Ok(DateSelectionController::new(
        build_client(settings)?,
        build_store(settings, persist)?,
        settings.page_size,
        settings.removal_policy,
    ))
}
