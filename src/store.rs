//! Collaborator interfaces owned by the host application.
//!
//! The engine persists nothing itself beyond the browser profile. The
//! last-used account snapshot and the default submission language live in
//! whatever storage the host provides behind [`KeyValueStore`], and other
//! UI surfaces learn about session changes through [`SessionNotifier`].

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::Mutex;

use crate::Result;

/// Storage paths the engine reads or writes.
pub mod paths {
    /// Last-used credentials and the profile snapshot of the account.
    pub const ACCOUNT_INFO: &str = "accountInfo";
    /// Host settings record; holds `defaultSubmitLangValue`.
    pub const SETTINGS_INFO: &str = "settingsInfo";
}

/// Opaque key-value storage provided by the host.
///
/// Values are JSON documents; the engine defines only the fields it writes
/// under [`paths::ACCOUNT_INFO`] and the single field it reads from
/// [`paths::SETTINGS_INFO`]. Failures surface as
/// [`Error::Store`](crate::Error::Store).
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, path: &str) -> Result<Option<Value>>;
    async fn set(&self, path: &str, value: Value) -> Result<()>;
}

/// Fire-and-forget signal that the login session changed. Hosts fan this
/// out to interested surfaces; the engine never waits for delivery.
pub trait SessionNotifier: Send + Sync {
    fn session_changed(&self);
}

/// In-memory store for hosts without persistence and for tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, path: &str) -> Result<Option<Value>> {
        Ok(self.entries.lock().await.get(path).cloned())
    }

    async fn set(&self, path: &str, value: Value) -> Result<()> {
        self.entries.lock().await.insert(path.to_owned(), value);
        Ok(())
    }
}
