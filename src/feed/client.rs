//! HTTP client for the Wikimedia "on this day" feed.
//!
//! The feed is year-agnostic: `/feed/v1/wikipedia/{lang}/onthisday/{type}/{MM}/{DD}`
//! returns entries from across history for that calendar day, under a JSON key
//! named after the requested type.

use std::collections::HashSet;
use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use super::error::{LookupError, LookupResult};
use crate::models::{HistoricalEvent, is_valid_month_day};

pub const DEFAULT_BASE_URL: &str = "https://api.wikimedia.org";
pub const DEFAULT_LANGUAGE: &str = "en";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);
const CONNECT_TIMEOUT: Duration = Duration::from_secs(3);
const USER_AGENT: &str =
    concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"), " (on-this-day browser)");

/// Which "on this day" list to request
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedCategory {
    #[default]
    Births,
    Deaths,
    Events,
    Selected,
}

impl FeedCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeedCategory::Births => "births",
            FeedCategory::Deaths => "deaths",
            FeedCategory::Events => "events",
            FeedCategory::Selected => "selected",
        }
    }

    /// Heading used by the front ends, e.g. "Births"
    pub fn title(&self) -> &'static str {
        match self {
            FeedCategory::Births => "Births",
            FeedCategory::Deaths => "Deaths",
            FeedCategory::Events => "Events",
            FeedCategory::Selected => "Selected events",
        }
    }
}

impl fmt::Display for FeedCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Source of events for a month/day
#[async_trait]
pub trait LookupClient: Send + Sync {
    /// Typed lookup, keeping the failure reason
    async fn fetch(&self, month: u32, day: u32) -> LookupResult<Vec<HistoricalEvent>>;

    /// Lookup for the UI: any failure is logged and reported as no events
    async fn lookup(&self, month: u32, day: u32) -> Vec<HistoricalEvent> {
        match self.fetch(month, day).await {
            Ok(events) => events,
            Err(e) => {
                warn!(month, day, timeout = e.is_timeout(), error = %e, "Feed lookup failed");
                Vec::new()
            }
        }
    }
}

/// Connection settings for [`FeedClient`]
#[derive(Debug, Clone)]
pub struct FeedOptions {
    pub base_url: String,
    pub language: String,
    pub category: FeedCategory,
    pub timeout: Duration,
}

impl Default for FeedOptions {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
            category: FeedCategory::default(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Live feed client. No retries; a request that outlives the timeout is a failure.
pub struct FeedClient {
    http: reqwest::Client,
    options: FeedOptions,
}

impl FeedClient {
    pub fn new(options: FeedOptions) -> reqwest::Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .connect_timeout(CONNECT_TIMEOUT.min(options.timeout))
            .timeout(options.timeout)
            .build()?;
        Ok(Self { http, options })
    }

    pub fn category(&self) -> FeedCategory {
        self.options.category
    }

    /// Feed URL for a month/day
    pub fn url_for(&self, month: u32, day: u32) -> String {
        format!(
            "{}/feed/v1/wikipedia/{}/onthisday/{}/{:02}/{:02}",
            self.options.base_url.trim_end_matches('/'),
            self.options.language,
            self.options.category,
            month,
            day
        )
    }
}

#[async_trait]
impl LookupClient for FeedClient {
    async fn fetch(&self, month: u32, day: u32) -> LookupResult<Vec<HistoricalEvent>> {
        if !is_valid_month_day(month, day) {
            return Err(LookupError::InvalidDate { month, day });
        }

        let url = self.url_for(month, day);
        debug!(%url, "Requesting feed");

        let response = self.http.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(LookupError::BadResponse(response.status()));
        }

        let body = response.bytes().await?;
        let events = parse_feed(&body, self.options.category)?;
        debug!(month, day, count = events.len(), "Feed lookup complete");
        Ok(events)
    }
}

#[derive(Deserialize)]
struct RawEntry {
    text: Option<String>,
    year: Option<i32>,
}

/// Parse a feed response body into normalized events.
///
/// Entries without text or year are skipped. The category array itself must be
/// present, otherwise the payload counts as malformed.
pub fn parse_feed(body: &[u8], category: FeedCategory) -> LookupResult<Vec<HistoricalEvent>> {
    let mut value: Value = serde_json::from_slice(body)
        .map_err(|e| LookupError::MalformedPayload(format!("invalid JSON: {}", e)))?;

    let list = value
        .get_mut(category.as_str())
        .map(Value::take)
        .ok_or_else(|| LookupError::MalformedPayload(format!("missing '{}' array", category)))?;

    let raw: Vec<Value> = match list {
        Value::Array(items) => items,
        _ => {
            return Err(LookupError::MalformedPayload(format!("'{}' is not an array", category)));
        }
    };

    let entries = raw.into_iter().filter_map(|item| serde_json::from_value::<RawEntry>(item).ok());
    Ok(normalize(entries))
}

/// Trim text, drop incomplete entries and duplicates by text, keep feed order
fn normalize(entries: impl Iterator<Item = RawEntry>) -> Vec<HistoricalEvent> {
    let mut seen = HashSet::new();
    let mut events = Vec::new();

    for entry in entries {
        let (Some(text), Some(year)) = (entry.text, entry.year) else {
            continue;
        };
        let text = text.trim();
        if text.is_empty() || !seen.insert(text.to_string()) {
            continue;
        }
        events.push(HistoricalEvent::new(text, year));
    }

    events
}
