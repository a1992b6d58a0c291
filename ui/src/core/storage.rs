//! Local persistence helpers for viewer preferences.
//!
//! Preferences live under a single key as one JSON blob: `localStorage` in the
//! browser, one file per key in the platform config directory on desktop.

use std::collections::HashMap;

use tracing::warn;

use super::error::StorageError;
use super::view_state::ViewState;

/// Key-value backend for persisted preferences.
pub trait PreferenceStore {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn save(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Read the view state stored under `key`. Missing, unreadable or partially
/// corrupt blobs all yield a usable state.
pub fn load_view_state(store: &dyn PreferenceStore, key: &str) -> ViewState {
    match store.load(key) {
        Ok(Some(raw)) => ViewState::from_json(&raw),
        Ok(None) => ViewState::default(),
        Err(err) => {
            warn!(error = %err, "couldn't read saved preferences; using defaults");
            ViewState::default()
        }
    }
}

pub fn save_view_state(
    store: &mut dyn PreferenceStore,
    key: &str,
    state: &ViewState,
) -> Result<(), StorageError> {
    let json = state.to_json()?;
    store.save(key, &json)
}

/// In-process store; used in tests and as the last-resort fallback.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(key: &str, value: &str) -> Self {
        let mut store = Self::default();
        store.entries.insert(key.to_string(), value.to_string());
        store
    }
}

impl PreferenceStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::LocalStore;

#[cfg(target_arch = "wasm32")]
mod web {
    use super::{PreferenceStore, StorageError};

    /// Browser `localStorage`.
    #[derive(Debug, Default, Clone, Copy)]
    pub struct LocalStore;

    impl LocalStore {
        fn storage() -> Result<web_sys::Storage, StorageError> {
            web_sys::window()
                .ok_or(StorageError::Unavailable("window"))?
                .local_storage()
                .ok()
                .flatten()
                .ok_or(StorageError::Unavailable("localStorage"))
        }
    }

    impl PreferenceStore for LocalStore {
        fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
            Self::storage()?
                .get_item(key)
                .map_err(|_| StorageError::Unavailable("localStorage read"))
        }

        fn save(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
            Self::storage()?
                .set_item(key, value)
                .map_err(|_| StorageError::Unavailable("localStorage write"))
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use native::FileStore;

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::fs;
    use std::io::ErrorKind;
    use std::path::{Path, PathBuf};

    use super::{PreferenceStore, StorageError};

    /// One `<key>.json` file per key inside `dir`.
    #[derive(Debug, Clone)]
    pub struct FileStore {
        dir: PathBuf,
    }

    impl FileStore {
        pub fn new(dir: impl Into<PathBuf>) -> Self {
            Self { dir: dir.into() }
        }

        /// The platform config directory for Ladderwatch.
        pub fn in_config_dir() -> Result<Self, StorageError> {
            let dirs = directories::ProjectDirs::from("com", "Ladderwatch", "Ladderwatch")
                .ok_or(StorageError::Unavailable("config directory"))?;
            Ok(Self::new(dirs.config_dir()))
        }

        pub fn dir(&self) -> &Path {
            &self.dir
        }

        fn path_for(&self, key: &str) -> PathBuf {
            let stem: String = key
                .chars()
                .map(|ch| {
                    if ch.is_ascii_alphanumeric() || ch == '.' || ch == '-' {
                        ch
                    } else {
                        '_'
                    }
                })
                .collect();
            self.dir.join(format!("{stem}.json"))
        }
    }

    impl PreferenceStore for FileStore {
        fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
            match fs::read_to_string(self.path_for(key)) {
                Ok(raw) => Ok(Some(raw)),
                Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
                Err(err) => Err(err.into()),
            }
        }

        fn save(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
            fs::create_dir_all(&self.dir)?;
            fs::write(self.path_for(key), value)?;
            Ok(())
        }
    }
}
