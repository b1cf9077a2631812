//! Persistence backends for the session slots

use crate::error::Result;
use std::collections::HashMap;
use std::fmt;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

/// Slot holding the access token
pub const ACCESS_TOKEN_KEY: &str = "admin_access_token";
/// Slot holding the refresh token
pub const REFRESH_TOKEN_KEY: &str = "admin_refresh_token";
/// Slot holding the JSON-serialized user record
pub const USER_KEY: &str = "admin_user";

/// Key/value store the session is mirrored into
pub trait SessionStorage: Send + Sync + fmt::Debug {
    /// Read a slot; a missing slot is `Ok(None)`
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write a slot, replacing any previous value
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove a slot; removing a missing slot is not an error
    fn remove(&self, key: &str) -> Result<()>;
}

/// Stores each slot as a file inside a directory
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn slot_path(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }
}

impl SessionStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        match std::fs::read_to_string(self.slot_path(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.slot_path(key);
        std::fs::write(&path, value)?;

        // Tokens are bearer credentials; keep them owner-readable only
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o600))?;
        }

        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        match std::fs::remove_file(self.slot_path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-process storage; nothing survives a restart
#[derive(Debug, Default)]
pub struct MemoryStorage {
    slots: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn slots(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl SessionStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.slots().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.slots().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.slots().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_storage_set_get_remove() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("session"));

        assert_eq!(storage.get(ACCESS_TOKEN_KEY).unwrap(), None);

        storage.set(ACCESS_TOKEN_KEY, "token-1").unwrap();
        assert_eq!(
            storage.get(ACCESS_TOKEN_KEY).unwrap().as_deref(),
            Some("token-1")
        );

        storage.set(ACCESS_TOKEN_KEY, "token-2").unwrap();
        assert_eq!(
            storage.get(ACCESS_TOKEN_KEY).unwrap().as_deref(),
            Some("token-2")
        );

        storage.remove(ACCESS_TOKEN_KEY).unwrap();
        assert_eq!(storage.get(ACCESS_TOKEN_KEY).unwrap(), None);

        // Removing twice is fine
        storage.remove(ACCESS_TOKEN_KEY).unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn test_file_storage_restricts_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());
        storage.set(REFRESH_TOKEN_KEY, "secret").unwrap();

        let mode = std::fs::metadata(dir.path().join(REFRESH_TOKEN_KEY))
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn test_memory_storage() {
        let storage = MemoryStorage::new();
        storage.set(USER_KEY, "{}").unwrap();
        assert_eq!(storage.get(USER_KEY).unwrap().as_deref(), Some("{}"));
        storage.remove(USER_KEY).unwrap();
        assert_eq!(storage.get(USER_KEY).unwrap(), None);
    }
}
