//! In-memory secret store for testing.
//!
//! Stores all secrets in a `BTreeMap` behind a `RwLock`. Nothing is
//! persisted; use this in unit and router tests where a real store would
//! mean touching the environment or disk.

use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::{SecretError, SecretStore};

/// An in-memory secret store backed by a `BTreeMap`.
///
/// Clones share the same underlying map.
///
/// # Examples
///
/// ```
/// # use tubemagic_secrets::{MemorySecretStore, SecretStore};
/// # #[tokio::main]
/// # async fn main() {
/// let store = MemorySecretStore::new();
/// store.insert("API_KEY", "abc").await;
/// let val = store.get("API_KEY").await.unwrap();
/// assert_eq!(val.as_deref(), Some("abc"));
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemorySecretStore {
    data: Arc<RwLock<BTreeMap<String, String>>>,
}

impl MemorySecretStore {
    /// Create a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with the given pairs.
    #[must_use]
    pub fn with_secrets<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let data = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            data: Arc::new(RwLock::new(data)),
        }
    }

    /// Insert or overwrite a secret.
    pub async fn insert(&self, name: impl Into<String>, value: impl Into<String>) {
        let mut data = self.data.write().await;
        data.insert(name.into(), value.into());
    }
}

#[async_trait::async_trait]
impl SecretStore for MemorySecretStore {
    async fn get(&self, name: &str) -> Result<Option<String>, SecretError> {
        let data = self.data.read().await;
        Ok(data.get(name).cloned())
    }

    fn describe(&self) -> String {
        "memory".to_owned()
    }
}
