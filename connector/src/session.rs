/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use crate::error::StorageError;
use crate::storage::{MemoryStorage, SessionStorage};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;
use strum_macros::{Display, EnumIter, EnumString};
use tokio::sync::watch;

pub const TOKEN_KEY: &str = "token";
pub const ROLE_KEY: &str = "role";

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum Role {
    Customer,
    Employee,
    Admin,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub role: Role,
}

/// Process-wide holder of the authenticated token/role pair.
///
/// Both fields are published together through one watch channel, so a
/// subscriber never observes a token without its role.
pub struct SessionStore {
    storage: Arc<dyn SessionStorage>,
    state: watch::Sender<Option<Session>>,
}

impl SessionStore {
    /// Restores a previously persisted pair. A role without a token, or a
    /// role that does not parse, counts as logged out.
    pub fn init(storage: Arc<dyn SessionStorage>) -> Result<Self, StorageError> {
        let token = storage.get(TOKEN_KEY)?.filter(|token| !token.is_empty());
        let role = storage
            .get(ROLE_KEY)?
            .and_then(|role| Role::from_str(&role).ok());

        let session = match (token, role) {
            (Some(token), Some(role)) => Some(Session { token, role }),
            _ => None,
        };

        tracing::debug!(logged_in = session.is_some(), "restored session");

        let (state, _) = watch::channel(session);
        Ok(Self { storage, state })
    }

    pub fn in_memory() -> Self {
        let (state, _) = watch::channel(None);
        Self {
            storage: Arc::new(MemoryStorage::new()),
            state,
        }
    }

    pub fn login(&self, token: impl Into<String>, role: Role) -> Result<(), StorageError> {
        let token = token.into();
        let role_name = role.to_string();
        if let Err(e) = self
            .storage
            .set_many(&[(ROLE_KEY, &role_name), (TOKEN_KEY, &token)])
        {
            // a partial write must not pair the previous token with the new role
            let _ = self.storage.remove(TOKEN_KEY);
            let _ = self.storage.remove(ROLE_KEY);
            self.state.send_replace(None);
            tracing::warn!(error = %e, "failed to persist session");
            return Err(e);
        }

        tracing::info!(%role, "logged in");
        self.state.send_replace(Some(Session { token, role }));
        Ok(())
    }

    pub fn logout(&self) -> Result<(), StorageError> {
        self.state.send_replace(None);

        self.storage.remove(TOKEN_KEY)?;
        self.storage.remove(ROLE_KEY)?;

        tracing::info!("logged out");
        Ok(())
    }

    pub fn current(&self) -> Option<Session> {
        self.state.borrow().clone()
    }

    pub fn token(&self) -> Option<String> {
        self.state.borrow().as_ref().map(|session| session.token.clone())
    }

    pub fn role(&self) -> Option<Role> {
        self.state.borrow().as_ref().map(|session| session.role)
    }

    pub fn is_logged_in(&self) -> bool {
        self.state.borrow().is_some()
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<Session>> {
        self.state.subscribe()
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("role", &self.role())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    fn store_with(values: &[(&str, &str)]) -> (Arc<MemoryStorage>, SessionStore) {
        let storage = Arc::new(MemoryStorage::new());
        for (key, value) in values {
            storage.set(key, value).unwrap();
        }

        let store = SessionStore::init(storage.clone()).unwrap();
        (storage, store)
    }

    #[test]
    fn test_role_names() {
        assert_eq!(Role::Customer.to_string(), "CUSTOMER");
        assert_eq!(Role::from_str("employee").unwrap(), Role::Employee);
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"ADMIN\"");
        assert!(Role::from_str("MECHANIC").is_err());
    }

    #[test]
    fn test_login_logout_pairing() {
        let (storage, store) = store_with(&[]);

        for role in Role::iter() {
            store.logout().unwrap();
            assert_eq!(store.current(), None);
            assert_eq!(store.token(), None);
            assert_eq!(store.role(), None);

            store.login("t1", role).unwrap();
            assert_eq!(
                store.current(),
                Some(Session {
                    token: "t1".to_string(),
                    role
                })
            );
            assert_eq!(storage.get(TOKEN_KEY).unwrap(), Some("t1".to_string()));
            assert_eq!(storage.get(ROLE_KEY).unwrap(), Some(role.to_string()));
        }

        store.logout().unwrap();
        assert_eq!(storage.get(TOKEN_KEY).unwrap(), None);
        assert_eq!(storage.get(ROLE_KEY).unwrap(), None);
    }

    #[test]
    fn test_init_restores_persisted_session() {
        let (_, store) = store_with(&[(TOKEN_KEY, "abc"), (ROLE_KEY, "EMPLOYEE")]);
        assert_eq!(store.token(), Some("abc".to_string()));
        assert_eq!(store.role(), Some(Role::Employee));
    }

    #[test]
    fn test_init_role_without_token_is_logged_out() {
        let (_, store) = store_with(&[(ROLE_KEY, "ADMIN")]);
        assert!(!store.is_logged_in());
        assert_eq!(store.role(), None);

        let (_, store) = store_with(&[(TOKEN_KEY, ""), (ROLE_KEY, "ADMIN")]);
        assert!(!store.is_logged_in());

        let (_, store) = store_with(&[(TOKEN_KEY, "abc"), (ROLE_KEY, "MECHANIC")]);
        assert!(!store.is_logged_in());
    }

    /// Accepts every write except the token.
    #[derive(Default)]
    struct TokenWriteFails {
        inner: MemoryStorage,
        fail: std::sync::atomic::AtomicBool,
    }

    impl SessionStorage for TokenWriteFails {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            self.inner.get(key)
        }

        fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
            if key == TOKEN_KEY && self.fail.load(std::sync::atomic::Ordering::SeqCst) {
                return Err(StorageError::NoConfigDir);
            }

            self.inner.set(key, value)
        }

        fn remove(&self, key: &str) -> Result<(), StorageError> {
            self.inner.remove(key)
        }
    }

    #[test]
    fn test_failed_login_does_not_mix_sessions() {
        let storage = Arc::new(TokenWriteFails::default());
        let store = SessionStore::init(storage.clone()).unwrap();

        store.login("customer-token", Role::Customer).unwrap();

        storage.fail.store(true, std::sync::atomic::Ordering::SeqCst);
        assert!(store.login("admin-token", Role::Admin).is_err());
        assert_eq!(store.current(), None);

        let restored = SessionStore::init(storage.clone()).unwrap();
        assert_eq!(restored.current(), None);
        assert_eq!(storage.get(ROLE_KEY).unwrap(), None);
        assert_eq!(storage.get(TOKEN_KEY).unwrap(), None);
    }

    #[tokio::test]
    async fn test_subscribers_are_notified() {
        let store = SessionStore::in_memory();
        let mut rx = store.subscribe();

        store.login("t1", Role::Customer).unwrap();
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().as_ref().map(|s| s.role), Some(Role::Customer));

        store.logout().unwrap();
        rx.changed().await.unwrap();
        assert!(rx.borrow_and_update().is_none());
    }
}
