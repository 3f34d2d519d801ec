//! Admin edit-mode gate and the storage accessors behind it.
//!
//! The gate is a convenience switch for inline editing, not authentication:
//! the password ships with the client bundle.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use crate::error::Result;

/// Session-storage key holding the admin flag.
pub const ADMIN_KEY: &str = "isAdmin";

/// Session-storage key recording that the intro animation already played.
pub const INTRO_KEY: &str = "introShown";

const ADMIN_PASSWORD: &str = "malek123";

/// String key/value storage (browser session or local storage).
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

/// In-memory store; clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.inner.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        if let Ok(mut map) = self.inner.lock() {
            map.insert(key.to_string(), value.to_string());
        }
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        if let Ok(mut map) = self.inner.lock() {
            map.remove(key);
        }
        Ok(())
    }
}

/// Session-scoped admin flag.
#[derive(Debug, Clone)]
pub struct AdminSession<S> {
    store: S,
}

impl<S: KeyValueStore> AdminSession<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Whether edit mode is enabled for this browser session.
    pub fn is_admin(&self) -> bool {
        self.store.get(ADMIN_KEY).as_deref() == Some("true")
    }

    /// Compare the password and enable edit mode on match.
    pub fn login(&self, password: &str) -> bool {
        if password != ADMIN_PASSWORD {
            tracing::info!("admin login rejected");
            return false;
        }
        if let Err(err) = self.store.set(ADMIN_KEY, "true") {
            tracing::warn!(error = %err, "failed to persist admin flag");
            return false;
        }
        true
    }

    /// Disable edit mode.
    pub fn logout(&self) {
        if let Err(err) = self.store.remove(ADMIN_KEY) {
            tracing::warn!(error = %err, "failed to clear admin flag");
        }
    }
}

/// Plays the intro animation once per browser session.
#[derive(Debug, Clone)]
pub struct IntroGate<S> {
    store: S,
}

impl<S: KeyValueStore> IntroGate<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn should_play(&self) -> bool {
        self.store.get(INTRO_KEY).as_deref() != Some("true")
    }

    pub fn mark_shown(&self) {
        if let Err(err) = self.store.set(INTRO_KEY, "true") {
            tracing::warn!(error = %err, "failed to persist intro flag");
        }
    }
}
