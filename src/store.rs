//! Persistence of generated palettes, keyed by an opaque user identifier.
//!
//! The storage medium is abstracted behind [`PaletteStore`], a plain
//! key-value capability; the bundled [`FileStore`] keeps one JSON document
//! per key under a data directory. The color pipeline never touches this
//! module; the CLI composes the two.

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use directories::ProjectDirs;
use log::info;
use serde::{Deserialize, Serialize};

use crate::error::{PaletteError, Result};
use crate::pipeline::harmony::MatchResult;

/// Opaque string key-value store for palette snapshots.
pub trait PaletteStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// One persisted palette: an immutable snapshot of a generated result
/// plus the base color it was generated from and a creation timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedPalette {
    pub id: u64,
    pub name: String,
    pub base_hex: String,
    /// Unix seconds at save time.
    pub created_at: u64,
    pub result: MatchResult,
}

/// File-backed [`PaletteStore`]: one JSON file per key.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Open the store in the platform data directory.
    pub fn open_default() -> Result<Self> {
        let dirs = ProjectDirs::from("", "", "huefit").ok_or(PaletteError::NoDataDir)?;
        Ok(Self::new(dirs.data_dir().join("palettes")))
    }

    fn path_for(&self, key: &str) -> PathBuf {
        // Keys are opaque caller strings; flatten anything that is not
        // filename-safe so a key can never escape the store directory.
        let safe: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '-' })
            .collect();
        self.dir.join(format!("{safe}.json"))
    }
}

impl PaletteStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        match std::fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(PaletteError::StoreIo { path, source: e }),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| PaletteError::StoreIo {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
        std::fs::write(&path, value).map_err(|e| PaletteError::StoreIo { path, source: e })
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let path = self.path_for(key);
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(PaletteError::StoreIo { path, source: e }),
        }
    }
}

fn decode(store_hint: &Path, raw: &str) -> Result<Vec<SavedPalette>> {
    serde_json::from_str(raw).map_err(|e| PaletteError::StoreFormat {
        path: store_hint.to_path_buf(),
        source: e,
    })
}

/// All palettes saved under one user key, oldest first.
pub fn list_palettes(store: &dyn PaletteStore, user: &str) -> Result<Vec<SavedPalette>> {
    match store.get(user)? {
        Some(raw) => decode(Path::new(user), &raw),
        None => Ok(Vec::new()),
    }
}

/// Append a generated result to the user's saved palettes.
///
/// Returns the stored entry (with its assigned id and timestamp).
pub fn save_palette(
    store: &mut dyn PaletteStore,
    user: &str,
    name: &str,
    base_hex: &str,
    result: &MatchResult,
) -> Result<SavedPalette> {
    let mut entries = list_palettes(store, user)?;
    let id = entries.iter().map(|e| e.id).max().unwrap_or(0) + 1;
    let created_at = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);

    let entry = SavedPalette {
        id,
        name: name.to_string(),
        base_hex: base_hex.to_string(),
        created_at,
        result: result.clone(),
    };
    entries.push(entry.clone());

    let raw = serde_json::to_string_pretty(&entries).map_err(|e| PaletteError::StoreFormat {
        path: PathBuf::from(user),
        source: e,
    })?;
    store.set(user, &raw)?;
    info!("saved palette '{}' (id {}) for user '{}'", name, id, user);
    Ok(entry)
}

/// Delete one saved palette by id. Returns true if an entry was removed.
pub fn delete_palette(store: &mut dyn PaletteStore, user: &str, id: u64) -> Result<bool> {
    let mut entries = list_palettes(store, user)?;
    let before = entries.len();
    entries.retain(|e| e.id != id);
    if entries.len() == before {
        return Ok(false);
    }
    if entries.is_empty() {
        store.remove(user)?;
    } else {
        let raw = serde_json::to_string_pretty(&entries).map_err(|e| PaletteError::StoreFormat {
            path: PathBuf::from(user),
            source: e,
        })?;
        store.set(user, &raw)?;
    }
    Ok(true)
}
