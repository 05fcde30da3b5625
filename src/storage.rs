//! Local key-value storage for the persisted accent color.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::color::{HexColor, Hsb};
use crate::constants;
use crate::error::StoreError;

const PREFERENCES_FILE: &str = "preferences.json";

/// String key-value storage, the desktop counterpart of browser local storage.
pub trait ColorStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Entries kept in memory only.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(mut self, key: &str, value: &str) -> Self {
        self.entries.insert(key.to_string(), value.to_string());
        self
    }
}

impl ColorStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Entries kept in a flat JSON object on disk.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<config dir>/formx/preferences.json`.
    pub fn default_location() -> Result<Self, StoreError> {
        let dir = dirs::config_dir().ok_or(StoreError::NoConfigDir)?;
        Ok(Self::new(
            dir.join(constants::CONFIG_DIR_NAME).join(PREFERENCES_FILE),
        ))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> Result<BTreeMap<String, String>, StoreError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        serde_json::from_str(&content).map_err(|source| StoreError::Json {
            path: self.path.clone(),
            source,
        })
    }
}

impl ColorStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.read_entries()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = match self.read_entries() {
            Ok(entries) => entries,
            Err(StoreError::Json { path, source }) => {
                log::warn!("Replacing unreadable preferences at {}: {}", path.display(), source);
                BTreeMap::new()
            }
            Err(e) => return Err(e),
        };
        entries.insert(key.to_string(), value.to_string());

        let io_err = |source| StoreError::Io {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let content = serde_json::to_string_pretty(&entries).map_err(|source| StoreError::Json {
            path: self.path.clone(),
            source,
        })?;
        fs::write(&self.path, content).map_err(io_err)
    }
}

/// Read the persisted accent, falling back to `default` when it is absent,
/// malformed, or the store cannot be read.
pub fn load_accent(store: &dyn ColorStore, key: &str, default: HexColor) -> Hsb {
    match store.get(key) {
        Ok(Some(raw)) => match HexColor::parse(&raw) {
            Ok(hex) => Hsb::from_hex(hex),
            Err(e) => {
                log::warn!("Ignoring persisted accent under `{key}`: {e}");
                Hsb::from_hex(default)
            }
        },
        Ok(None) => {
            log::debug!("No persisted accent under `{key}`, using {default}");
            Hsb::from_hex(default)
        }
        Err(e) => {
            log::warn!("Could not read persisted accent: {e}");
            Hsb::from_hex(default)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn falls_back_to_default_without_entry() {
        let store = MemoryStore::new();
        let hsb = load_accent(&store, constants::ACCENT_STORAGE_KEY, constants::DEFAULT_ACCENT);
        assert_eq!(hsb.to_hex().to_string(), "#3b82f6");
    }

    #[test]
    fn falls_back_to_default_on_malformed_entry() {
        let store = MemoryStore::new().with_entry("k", "not a color");
        let hsb = load_accent(&store, "k", constants::DEFAULT_ACCENT);
        assert_eq!(hsb.to_hex(), constants::DEFAULT_ACCENT);
    }

    #[test]
    fn reads_persisted_entry() {
        let store = MemoryStore::new().with_entry("k", "#D4C273");
        let hsb = load_accent(&store, "k", constants::DEFAULT_ACCENT);
        assert_eq!(hsb.to_hex(), HexColor::from_rgb(0xd4, 0xc2, 0x73));
    }

    #[test]
    fn file_store_creates_and_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(PREFERENCES_FILE);
        let mut store = FileStore::new(&path);

        assert_eq!(store.get("a").unwrap(), None);
        store.set("a", "#000000").unwrap();
        store.set("b", "#ffffff").unwrap();
        store.set("a", "#ff0000").unwrap();

        let reopened = FileStore::new(&path);
        assert_eq!(reopened.get("a").unwrap().as_deref(), Some("#ff0000"));
        assert_eq!(reopened.get("b").unwrap().as_deref(), Some("#ffffff"));
    }

    #[test]
    fn file_store_replaces_corrupt_file_on_write() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(PREFERENCES_FILE);
        fs::write(&path, "{ not json").unwrap();
        let mut store = FileStore::new(&path);

        assert!(matches!(store.get("a"), Err(StoreError::Json { .. })));
        let hsb = load_accent(&store, "a", constants::DEFAULT_ACCENT);
        assert_eq!(hsb.to_hex(), constants::DEFAULT_ACCENT);

        store.set("a", "#00ff00").unwrap();
        assert_eq!(store.get("a").unwrap().as_deref(), Some("#00ff00"));
    }
}
