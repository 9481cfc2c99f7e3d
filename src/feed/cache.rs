use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use tracing::debug;

use super::client::LookupClient;
use super::error::LookupResult;
use crate::models::HistoricalEvent;

/// Session memoization over any [`LookupClient`].
///
/// The feed answer for a month/day does not change within a session, so
/// successful results are kept indefinitely. Failures are never cached.
pub struct CachedLookup<C> {
    inner: C,
    entries: Mutex<HashMap<(u32, u32), Vec<HistoricalEvent>>>,
}

impl<C: LookupClient> CachedLookup<C> {
    pub fn new(inner: C) -> Self {
        Self { inner, entries: Mutex::new(HashMap::new()) }
    }

    pub fn inner(&self) -> &C {
        &self.inner
    }

    pub fn cached_days(&self) -> usize {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    fn get(&self, key: (u32, u32)) -> Option<Vec<HistoricalEvent>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).get(&key).cloned()
    }
}

#[async_trait]
impl<C: LookupClient> LookupClient for CachedLookup<C> {
    async fn fetch(&self, month: u32, day: u32) -> LookupResult<Vec<HistoricalEvent>> {
        if let Some(events) = self.get((month, day)) {
            debug!(month, day, "Feed cache hit");
            return Ok(events);
        }

        let events = self.inner.fetch(month, day).await?;
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert((month, day), events.clone());
        Ok(events)
    }
}
