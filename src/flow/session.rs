//! Persisted simulated login. Three string keys in local storage; absence of
//! the flag is the logged-out default.

use crate::storage::{Storage, StorageError};
use serde::Serialize;
use tracing::{debug, instrument};

pub const KEY_LOGGED_IN: &str = "isLoggedIn";
pub const KEY_USER_EMAIL: &str = "userEmail";
pub const KEY_USER_NAME: &str = "userName";

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    pub is_logged_in: bool,
    pub user_email: Option<String>,
    pub user_name: Option<String>,
}

#[derive(Debug)]
pub struct SessionStore<S> {
    storage: S,
}

impl<S: Storage> SessionStore<S> {
    pub const fn new(storage: S) -> Self {
        Self { storage }
    }

    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Only the exact string `"true"` counts as logged in.
    ///
    /// # Errors
    /// Returns an error if the storage backend cannot be read.
    pub fn is_logged_in(&self) -> Result<bool, StorageError> {
        Ok(self.storage.get(KEY_LOGGED_IN)?.as_deref() == Some("true"))
    }

    /// # Errors
    /// Returns an error if the storage backend cannot be read.
    pub fn load(&self) -> Result<SessionState, StorageError> {
        Ok(SessionState {
            is_logged_in: self.is_logged_in()?,
            user_email: self.storage.get(KEY_USER_EMAIL)?,
            user_name: self.storage.get(KEY_USER_NAME)?,
        })
    }

    /// Write the flag and email, and the name when one is given.
    ///
    /// # Errors
    /// Returns an error if a key cannot be written.
    #[instrument(skip(self))]
    pub fn persist_login(&mut self, email: &str, name: Option<&str>) -> Result<(), StorageError> {
        self.storage.set(KEY_LOGGED_IN, "true")?;
        self.storage.set(KEY_USER_EMAIL, email)?;
        if let Some(name) = name {
            self.storage.set(KEY_USER_NAME, name)?;
        }
        debug!("login persisted");
        Ok(())
    }

    /// # Errors
    /// Returns an error if a key cannot be removed.
    #[instrument(skip(self))]
    pub fn clear(&mut self) -> Result<(), StorageError> {
        self.storage.remove(KEY_LOGGED_IN)?;
        self.storage.remove(KEY_USER_EMAIL)?;
        self.storage.remove(KEY_USER_NAME)?;
        debug!("session cleared");
        Ok(())
    }
}
