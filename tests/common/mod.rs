//! Shared test utilities for integration tests
#![allow(dead_code)]

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use onthisday_explorer::favorites::{FavoritesStore, PersistenceError, PersistenceResult};
use onthisday_explorer::feed::{LookupClient, LookupError, LookupResult};
use onthisday_explorer::models::{Favorites, HistoricalEvent};
use serde_json::{Map, Value, json};
use tempfile::TempDir;
use tokio::net::TcpListener;
use tokio::sync::Notify;

/// Builder for Wikimedia "on this day" response bodies
pub struct FeedJsonBuilder {
    category: String,
    items: Vec<Value>,
}

impl FeedJsonBuilder {
    pub fn births() -> Self {
        Self::new("births")
    }

    pub fn new(category: &str) -> Self {
        Self { category: category.to_string(), items: Vec::new() }
    }

    /// Add a complete entry, with a `pages` array like the real feed
    pub fn with_entry(mut self, text: &str, year: i32) -> Self {
        self.items.push(json!({ "text": text, "year": year, "pages": [] }));
        self
    }

    /// Add an arbitrary item, e.g. one missing its year
    pub fn with_raw(mut self, item: Value) -> Self {
        self.items.push(item);
        self
    }

    pub fn build(self) -> String {
        let mut body = Map::new();
        body.insert(self.category, Value::Array(self.items));
        Value::Object(body).to_string()
    }
}

/// Answers lookups from a fixed table; unknown days fail like a 404 would
#[derive(Default)]
pub struct StaticLookupClient {
    days: HashMap<(u32, u32), Vec<HistoricalEvent>>,
    calls: AtomicUsize,
}

impl StaticLookupClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_day(mut self, month: u32, day: u32, events: &[(&str, i32)]) -> Self {
        let events = events.iter().map(|(text, year)| HistoricalEvent::new(*text, *year)).collect();
        self.days.insert((month, day), events);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LookupClient for StaticLookupClient {
    async fn fetch(&self, month: u32, day: u32) -> LookupResult<Vec<HistoricalEvent>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.days
            .get(&(month, day))
            .cloned()
            .ok_or_else(|| LookupError::MalformedPayload(format!("no data for {}/{}", month, day)))
    }
}

/// Holds every lookup until the test releases that day, so completions can be
/// forced into any order
pub struct GatedLookupClient {
    inner: StaticLookupClient,
    gates: Mutex<HashMap<(u32, u32), Arc<Notify>>>,
}

impl GatedLookupClient {
    pub fn new(inner: StaticLookupClient) -> Self {
        Self { inner, gates: Mutex::new(HashMap::new()) }
    }

    fn gate(&self, month: u32, day: u32) -> Arc<Notify> {
        let mut gates = self.gates.lock().unwrap();
        Arc::clone(gates.entry((month, day)).or_insert_with(|| Arc::new(Notify::new())))
    }

    /// Let one pending (or the next) lookup for this day finish
    pub fn release(&self, month: u32, day: u32) {
        self.gate(month, day).notify_one();
    }
}

#[async_trait]
impl LookupClient for GatedLookupClient {
    async fn fetch(&self, month: u32, day: u32) -> LookupResult<Vec<HistoricalEvent>> {
        self.gate(month, day).notified().await;
        self.inner.fetch(month, day).await
    }
}

/// In-memory store whose writes can be switched to fail. Clones share state,
/// so a test can keep one while the controller owns another.
#[derive(Clone, Default)]
pub struct FlakyStore {
    state: Arc<FlakyState>,
}

#[derive(Default)]
struct FlakyState {
    saved: Mutex<Vec<Favorites>>,
    failing: AtomicBool,
}

impl FlakyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_failing(&self, failing: bool) {
        self.state.failing.store(failing, Ordering::SeqCst);
    }

    /// Every successful write, oldest first
    pub fn saves(&self) -> Vec<Favorites> {
        self.state.saved.lock().unwrap().clone()
    }
}

impl FavoritesStore for FlakyStore {
    fn read(&self) -> PersistenceResult<Favorites> {
        Ok(Favorites::new())
    }

    fn save(&self, favorites: &Favorites) -> PersistenceResult<()> {
        if self.state.failing.load(Ordering::SeqCst) {
            return Err(PersistenceError::Write {
                path: PathBuf::from("/unwritable/favorites.json"),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
            });
        }
        self.state.saved.lock().unwrap().push(favorites.clone());
        Ok(())
    }
}

/// Temp directory holding a config file and a favorites file for the binary
pub struct AppDirBuilder {
    temp_dir: TempDir,
    config: Vec<String>,
}

impl AppDirBuilder {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let favorites = temp_dir.path().join("favorites.json");
        let config = vec![format!("favorites_path = {:?}", favorites.display().to_string())];
        Self { temp_dir, config }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn favorites_path(&self) -> PathBuf {
        self.temp_dir.path().join("favorites.json")
    }

    pub fn config_path(&self) -> PathBuf {
        self.temp_dir.path().join("config.toml")
    }

    /// Add a raw `key = value` line to the config file
    pub fn with_setting(mut self, line: &str) -> Self {
        self.config.push(line.to_string());
        self
    }

    /// Write the favorites file verbatim
    pub fn with_favorites_json(self, content: &str) -> Self {
        fs::write(self.favorites_path(), content).expect("Failed to write favorites.json");
        self
    }

    pub fn build(self) -> Self {
        fs::write(self.config_path(), self.config.join("\n")).expect("Failed to write config");
        self
    }
}

impl Default for AppDirBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Serve `app` on an ephemeral localhost port; returns its base URL
pub async fn spawn_server(app: Router) -> String {
    // SAFETY: every test sets the same value; keeps a host proxy away from localhost
    unsafe {
        std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    }
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind test server");
    let addr = listener.local_addr().expect("test server address");
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    format!("http://{addr}")
}
