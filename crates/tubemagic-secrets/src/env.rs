//! Environment-variable secret store.

use std::collections::BTreeMap;
use std::env::VarError;

use crate::{SecretError, SecretStore};

#[derive(Debug, Clone)]
enum Source {
    Process,
    Snapshot(BTreeMap<String, String>),
}

/// Reads secrets from environment variables.
///
/// With a prefix of `HUB_`, the secret `API_KEY` is read from `HUB_API_KEY`.
/// A variable that is set to a non-unicode value is an error rather than a
/// silent miss.
#[derive(Debug, Clone)]
pub struct EnvSecretStore {
    prefix: String,
    source: Source,
}

impl EnvSecretStore {
    /// Store backed by the live process environment, no prefix.
    #[must_use]
    pub fn new() -> Self {
        Self {
            prefix: String::new(),
            source: Source::Process,
        }
    }

    /// Store backed by a fixed set of variables instead of the process
    /// environment.
    #[must_use]
    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            prefix: String::new(),
            source: Source::Snapshot(
                vars.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
            ),
        }
    }

    /// Prepend `prefix` to every looked-up name.
    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    fn var_name(&self, name: &str) -> String {
        format!("{}{name}", self.prefix)
    }
}

impl Default for EnvSecretStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl SecretStore for EnvSecretStore {
    async fn get(&self, name: &str) -> Result<Option<String>, SecretError> {
        let var = self.var_name(name);
        match &self.source {
            Source::Process => match std::env::var(&var) {
                Ok(value) => Ok(Some(value)),
                Err(VarError::NotPresent) => Ok(None),
                Err(VarError::NotUnicode(_)) => Err(SecretError::InvalidUnicode { name: var }),
            },
            Source::Snapshot(vars) => Ok(vars.get(&var).cloned()),
        }
    }

    fn describe(&self) -> String {
        if self.prefix.is_empty() {
            "env".to_owned()
        } else {
            format!("env({}*)", self.prefix)
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn snapshot_lookup() {
        let store = EnvSecretStore::from_vars([("API_KEY", "abc")]);
        assert_eq!(store.get("API_KEY").await.unwrap().as_deref(), Some("abc"));
        assert_eq!(store.get("OTHER").await.unwrap(), None);
    }

    #[tokio::test]
    async fn prefix_is_prepended() {
        let store =
            EnvSecretStore::from_vars([("HUB_API_KEY", "prefixed"), ("API_KEY", "bare")])
                .with_prefix("HUB_");
        assert_eq!(
            store.get("API_KEY").await.unwrap().as_deref(),
            Some("prefixed")
        );
        assert_eq!(store.describe(), "env(HUB_*)");
    }

    #[tokio::test]
    async fn process_env_missing_var_is_none() {
        let store = EnvSecretStore::new().with_prefix("TUBEMAGIC_TEST_SURELY_UNSET_");
        assert_eq!(store.get("API_KEY").await.unwrap(), None);
    }
}
