use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use tracing::{debug, warn};

use shared_models::error::AppError;

/// Bearer token of the signed-in user.
pub const TOKEN_KEY: &str = "user-token";
/// JSON array of the signed-in user's roles.
pub const ROLES_KEY: &str = "user-roles";
/// Persisted snapshot of the whole session store.
pub const SESSION_KEY: &str = "auth";

/// Persistent string key/value storage shared by the HTTP client, the
/// session store and the inactivity monitor.
pub trait SessionStorage: Send + Sync {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), AppError>;
    fn remove_item(&self, key: &str) -> Result<(), AppError>;
    fn clear(&self) -> Result<(), AppError>;
}

fn poisoned() -> AppError {
    AppError::Storage("storage lock poisoned".to_string())
}

#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: RwLock<BTreeMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.read().map(|items| items.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SessionStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.read().ok()?.get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), AppError> {
        self.items
            .write()
            .map_err(|_| poisoned())?
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), AppError> {
        self.items.write().map_err(|_| poisoned())?.remove(key);
        Ok(())
    }

    fn clear(&self) -> Result<(), AppError> {
        self.items.write().map_err(|_| poisoned())?.clear();
        Ok(())
    }
}

/// Storage persisted as a JSON object on disk, rewritten on every mutation.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    items: RwLock<BTreeMap<String, String>>,
}

impl FileStorage {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let path = path.as_ref().to_path_buf();

        let items = match fs::read(&path) {
            Ok(bytes) if bytes.is_empty() => BTreeMap::new(),
            Ok(bytes) => match serde_json::from_slice(&bytes) {
                Ok(items) => items,
                Err(e) => {
                    warn!("Session file {} is unreadable, starting empty: {}", path.display(), e);
                    BTreeMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(AppError::Storage(format!("{}: {}", path.display(), e))),
        };

        debug!("Opened session file {} ({} keys)", path.display(), items.len());

        Ok(Self {
            path,
            items: RwLock::new(items),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self, items: &BTreeMap<String, String>) -> Result<(), AppError> {
        let bytes = serde_json::to_vec_pretty(items)?;
        fs::write(&self.path, bytes)
            .map_err(|e| AppError::Storage(format!("{}: {}", self.path.display(), e)))
    }
}

impl SessionStorage for FileStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.read().ok()?.get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), AppError> {
        let mut items = self.items.write().map_err(|_| poisoned())?;
        items.insert(key.to_string(), value.to_string());
        self.flush(&items)
    }

    fn remove_item(&self, key: &str) -> Result<(), AppError> {
        let mut items = self.items.write().map_err(|_| poisoned())?;
        if items.remove(key).is_some() {
            self.flush(&items)?;
        }
        Ok(())
    }

    fn clear(&self) -> Result<(), AppError> {
        let mut items = self.items.write().map_err(|_| poisoned())?;
        items.clear();
        self.flush(&items)
    }
}
