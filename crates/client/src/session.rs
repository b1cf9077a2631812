//! Process-wide authentication state
//!
//! The [`SessionStore`] owns the current token pair and identity. Every
//! mutation goes through its methods so the token pair is always set and
//! cleared together, and every mutation is mirrored into a
//! [`SessionStorage`] backend so the session survives restarts.

use crate::storage::{
    ACCESS_TOKEN_KEY, MemoryStorage, REFRESH_TOKEN_KEY, SessionStorage, USER_KEY,
};
use crate::types::User;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, warn};

/// Snapshot of the authentication state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub user: Option<User>,
    /// Set once persisted state has been loaded
    pub initialized: bool,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        self.access_token.is_some()
    }
}

/// Owned, shareable session store
#[derive(Debug)]
pub struct SessionStore {
    state: RwLock<Session>,
    storage: Arc<dyn SessionStorage>,
}

impl SessionStore {
    /// Create an empty, uninitialized store backed by `storage`
    pub fn new(storage: Arc<dyn SessionStorage>) -> Self {
        Self {
            state: RwLock::new(Session::default()),
            storage,
        }
    }

    /// Create a store that keeps nothing across restarts
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStorage::new()))
    }

    fn read(&self) -> RwLockReadGuard<'_, Session> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Session> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Hydrate from storage. Only the first call has any effect.
    pub fn initialize(&self) {
        let mut state = self.write();
        if state.initialized {
            return;
        }

        let access_token = self.load_slot(ACCESS_TOKEN_KEY);
        let refresh_token = self.load_slot(REFRESH_TOKEN_KEY);
        let user = self.load_slot(USER_KEY).and_then(|raw| {
            serde_json::from_str::<User>(&raw)
                .inspect_err(|e| warn!("Ignoring unparsable persisted user record: {e}"))
                .ok()
        });

        let (access_token, refresh_token) = match (access_token, refresh_token) {
            (Some(access), Some(refresh)) => (Some(access), Some(refresh)),
            (None, None) => (None, None),
            _ => {
                warn!("Persisted session holds only one of the two tokens, discarding both");
                (None, None)
            }
        };

        debug!(
            authenticated = access_token.is_some(),
            has_user = user.is_some(),
            "Session hydrated from storage"
        );

        *state = Session {
            access_token,
            refresh_token,
            user,
            initialized: true,
        };
    }

    fn load_slot(&self, key: &str) -> Option<String> {
        match self.storage.get(key) {
            Ok(value) => value.filter(|v| !v.is_empty()),
            Err(e) => {
                warn!("Failed to read session slot {key}: {e}");
                None
            }
        }
    }

    fn store_slot(&self, key: &str, value: &str) {
        if let Err(e) = self.storage.set(key, value) {
            warn!("Failed to persist session slot {key}: {e}");
        }
    }

    fn remove_slot(&self, key: &str) {
        if let Err(e) = self.storage.remove(key) {
            warn!("Failed to remove session slot {key}: {e}");
        }
    }

    fn store_user(&self, user: &User) {
        match serde_json::to_string(user) {
            Ok(raw) => self.store_slot(USER_KEY, &raw),
            Err(e) => warn!("Failed to serialize user record: {e}"),
        }
    }

    /// Copy of the current state
    pub fn snapshot(&self) -> Session {
        self.read().clone()
    }

    pub fn access_token(&self) -> Option<String> {
        self.read().access_token.clone()
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.read().refresh_token.clone()
    }

    pub fn user(&self) -> Option<User> {
        self.read().user.clone()
    }

    pub fn is_initialized(&self) -> bool {
        self.read().initialized
    }

    pub fn is_authenticated(&self) -> bool {
        self.read().is_authenticated()
    }

    /// Replace the token pair and identity in one step
    pub fn set_session(
        &self,
        access_token: impl Into<String>,
        refresh_token: impl Into<String>,
        user: User,
    ) {
        let access_token = access_token.into();
        let refresh_token = refresh_token.into();

        let mut state = self.write();
        self.store_slot(ACCESS_TOKEN_KEY, &access_token);
        self.store_slot(REFRESH_TOKEN_KEY, &refresh_token);
        self.store_user(&user);

        state.access_token = Some(access_token);
        state.refresh_token = Some(refresh_token);
        state.user = Some(user);
    }

    /// Drop the token pair and identity
    pub fn clear_session(&self) {
        let mut state = self.write();
        self.remove_slot(ACCESS_TOKEN_KEY);
        self.remove_slot(REFRESH_TOKEN_KEY);
        self.remove_slot(USER_KEY);

        state.access_token = None;
        state.refresh_token = None;
        state.user = None;
    }

    /// Replace only the identity record
    pub fn set_user(&self, user: Option<User>) {
        let mut state = self.write();
        match &user {
            Some(user) => self.store_user(user),
            None => self.remove_slot(USER_KEY),
        }
        state.user = user;
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::in_memory()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::FileStorage;
    use crate::types::Role;

    fn user() -> User {
        User {
            id: 3,
            login: "investor1".into(),
            name: "Ivan".into(),
            role: Role::Investor,
            percent: Some(40.0),
            is_active: true,
            created_at: "2026-02-01 10:00:00".into(),
        }
    }

    #[test]
    fn test_starts_empty_and_uninitialized() {
        let store = SessionStore::in_memory();
        let session = store.snapshot();
        assert_eq!(session, Session::default());
        assert!(!store.is_initialized());
        assert!(!store.is_authenticated());
    }

    #[test]
    fn test_set_and_clear_session() {
        let storage = Arc::new(MemoryStorage::new());
        let store = SessionStore::new(storage.clone());

        store.set_session("access", "refresh", user());
        assert_eq!(store.access_token().as_deref(), Some("access"));
        assert_eq!(store.refresh_token().as_deref(), Some("refresh"));
        assert_eq!(store.user(), Some(user()));
        assert_eq!(
            storage.get(ACCESS_TOKEN_KEY).unwrap().as_deref(),
            Some("access")
        );

        store.clear_session();
        let session = store.snapshot();
        assert_eq!(session.access_token, None);
        assert_eq!(session.refresh_token, None);
        assert_eq!(session.user, None);
        assert_eq!(storage.get(ACCESS_TOKEN_KEY).unwrap(), None);
        assert_eq!(storage.get(REFRESH_TOKEN_KEY).unwrap(), None);
        assert_eq!(storage.get(USER_KEY).unwrap(), None);
    }

    #[test]
    fn test_initialize_hydrates_once() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set(ACCESS_TOKEN_KEY, "a1").unwrap();
        storage.set(REFRESH_TOKEN_KEY, "r1").unwrap();
        storage
            .set(USER_KEY, &serde_json::to_string(&user()).unwrap())
            .unwrap();

        let store = SessionStore::new(storage.clone());
        store.initialize();
        assert!(store.is_initialized());
        assert_eq!(store.access_token().as_deref(), Some("a1"));
        assert_eq!(store.user(), Some(user()));

        // Later storage changes are not picked up by a second initialize
        storage.set(ACCESS_TOKEN_KEY, "a2").unwrap();
        store.initialize();
        assert_eq!(store.access_token().as_deref(), Some("a1"));
    }

    #[test]
    fn test_initialize_ignores_corrupt_user() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set(ACCESS_TOKEN_KEY, "a1").unwrap();
        storage.set(REFRESH_TOKEN_KEY, "r1").unwrap();
        storage.set(USER_KEY, "{not json").unwrap();

        let store = SessionStore::new(storage);
        store.initialize();
        let session = store.snapshot();
        assert_eq!(session.access_token.as_deref(), Some("a1"));
        assert_eq!(session.refresh_token.as_deref(), Some("r1"));
        assert_eq!(session.user, None);
        assert!(session.initialized);
    }

    #[test]
    fn test_initialize_discards_half_token_pair() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set(ACCESS_TOKEN_KEY, "a1").unwrap();
        storage
            .set(USER_KEY, &serde_json::to_string(&user()).unwrap())
            .unwrap();

        let store = SessionStore::new(storage);
        store.initialize();
        let session = store.snapshot();
        assert_eq!(session.access_token, None);
        assert_eq!(session.refresh_token, None);
        assert_eq!(session.user, Some(user()));
    }

    #[test]
    fn test_set_user_keeps_tokens() {
        let store = SessionStore::in_memory();
        store.set_session("a", "r", user());

        store.set_user(None);
        assert_eq!(store.user(), None);
        assert_eq!(store.access_token().as_deref(), Some("a"));

        store.set_user(Some(user()));
        assert_eq!(store.user(), Some(user()));
    }

    #[test]
    fn test_file_backed_session_survives_restart() {
        let dir = tempfile::tempdir().unwrap();

        let first = SessionStore::new(Arc::new(FileStorage::new(dir.path())));
        first.initialize();
        first.set_session("a", "r", user());
        drop(first);

        let second = SessionStore::new(Arc::new(FileStorage::new(dir.path())));
        second.initialize();
        assert_eq!(second.access_token().as_deref(), Some("a"));
        assert_eq!(second.refresh_token().as_deref(), Some("r"));
        assert_eq!(second.user(), Some(user()));
    }
}
