//! Favorites persistence: one JSON file, rewritten atomically on every change

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use tracing::{info, warn};

use super::error::{PersistenceError, PersistenceResult};
use crate::models::{FavoriteEntry, Favorites};

const APP_DIR_NAME: &str = "onthisday-explorer";
const FAVORITES_FILENAME: &str = "favorites.json";

/// Durable home of the favorites collection
pub trait FavoritesStore: Send {
    /// Read persisted favorites. A store that was never written reads as empty.
    fn read(&self) -> PersistenceResult<Favorites>;

    /// Overwrite the persisted collection with `favorites`
    fn save(&self, favorites: &Favorites) -> PersistenceResult<()>;

    /// Startup load: unreadable or corrupt storage is logged and treated as empty
    fn load(&self) -> Favorites {
        match self.read() {
            Ok(favorites) => favorites,
            Err(e) => {
                warn!(error = %e, "Ignoring unreadable favorites, starting empty");
                Favorites::new()
            }
        }
    }
}

/// Platform data directory location of the favorites file
/// - macOS: `~/Library/Application Support/onthisday-explorer/favorites.json`
/// - Linux: `~/.local/share/onthisday-explorer/favorites.json`
/// - Windows: `%APPDATA%\onthisday-explorer\favorites.json`
pub fn default_favorites_path() -> PersistenceResult<PathBuf> {
    let base = dirs::data_dir().ok_or(PersistenceError::NoDataDir)?;
    Ok(base.join(APP_DIR_NAME).join(FAVORITES_FILENAME))
}

/// Favorites stored as a JSON array of entries
#[derive(Debug, Clone)]
pub struct JsonFavoritesStore {
    path: PathBuf,
}

impl JsonFavoritesStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl FavoritesStore for JsonFavoritesStore {
    fn read(&self) -> PersistenceResult<Favorites> {
        if !self.path.exists() {
            return Ok(Favorites::new());
        }

        let json = fs::read_to_string(&self.path)
            .map_err(|source| PersistenceError::Read { path: self.path.clone(), source })?;
        if json.trim().is_empty() {
            return Ok(Favorites::new());
        }

        serde_json::from_str::<Vec<FavoriteEntry>>(&json)
            .map(Favorites::from_entries)
            .map_err(|source| PersistenceError::Corrupt { path: self.path.clone(), source })
    }

    fn save(&self, favorites: &Favorites) -> PersistenceResult<()> {
        let write_err = |source| PersistenceError::Write { path: self.path.clone(), source };

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(write_err)?;
        }

        // Write atomically (temp file + rename)
        let json = serde_json::to_string_pretty(favorites)?;
        let temp = self.temp_path();
        fs::write(&temp, json).map_err(write_err)?;
        fs::rename(&temp, &self.path).map_err(write_err)?;

        info!(path = %self.path.display(), count = favorites.len(), "Saved favorites");
        Ok(())
    }
}

/// Favorites kept for the lifetime of the process only
#[derive(Debug, Default)]
pub struct MemoryFavoritesStore {
    saved: Mutex<Favorites>,
}

impl MemoryFavoritesStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_favorites(favorites: Favorites) -> Self {
        Self { saved: Mutex::new(favorites) }
    }

    /// Last saved collection
    pub fn snapshot(&self) -> Favorites {
        self.saved.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

impl FavoritesStore for MemoryFavoritesStore {
    fn read(&self) -> PersistenceResult<Favorites> {
        Ok(self.snapshot())
    }

    fn save(&self, favorites: &Favorites) -> PersistenceResult<()> {
        *self.saved.lock().unwrap_or_else(PoisonError::into_inner) = favorites.clone();
        Ok(())
    }
}
