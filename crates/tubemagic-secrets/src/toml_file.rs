//! `secrets.toml` file store.
//!
//! Follows the hosting-platform convention of a flat TOML file of top-level
//! keys, e.g.:
//!
//! ```toml
//! API_KEY = "your_key_here"
//! ```
//!
//! Scalar values are handed out as their TOML text, so `API_KEY = 12345`
//! reads as `"12345"`. Only tables and arrays are refused.
//!
//! The file is read and parsed once in [`TomlSecretStore::open`]; later edits
//! are not picked up until the store is reopened.

use std::path::Path;

use crate::{SecretError, SecretStore};

/// A secret store loaded from a TOML file.
#[derive(Clone)]
pub struct TomlSecretStore {
    path: String,
    table: toml::Table,
}

impl std::fmt::Debug for TomlSecretStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TomlSecretStore")
            .field("path", &self.path)
            .field("names", &self.table.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl TomlSecretStore {
    /// Read and parse the secrets file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`SecretError::Read`] if the file cannot be read and
    /// [`SecretError::Parse`] if it is not valid TOML.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, SecretError> {
        let path = path.as_ref();
        let path_display = path.display().to_string();

        let text = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| SecretError::Read {
                path: path_display.clone(),
                reason: e.to_string(),
            })?;

        let store = Self::parse(&path_display, &text)?;
        tracing::debug!(path = %path_display, names = store.table.len(), "secrets file loaded");
        Ok(store)
    }

    /// Open the file if it exists; `Ok(None)` when it does not.
    ///
    /// # Errors
    ///
    /// Same as [`open`](Self::open) for a file that exists but cannot be
    /// read or parsed.
    pub async fn open_optional(path: impl AsRef<Path>) -> Result<Option<Self>, SecretError> {
        let path = path.as_ref();
        match tokio::fs::try_exists(path).await {
            Ok(true) => Self::open(path).await.map(Some),
            Ok(false) => Ok(None),
            Err(e) => Err(SecretError::Read {
                path: path.display().to_string(),
                reason: e.to_string(),
            }),
        }
    }

    /// Parse secrets from TOML text. `label` names the source in errors.
    ///
    /// # Errors
    ///
    /// Returns [`SecretError::Parse`] if `text` is not valid TOML.
    pub fn parse(label: &str, text: &str) -> Result<Self, SecretError> {
        let table = text.parse::<toml::Table>().map_err(|e| SecretError::Parse {
            path: label.to_owned(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            path: label.to_owned(),
            table,
        })
    }
}

#[async_trait::async_trait]
impl SecretStore for TomlSecretStore {
    async fn get(&self, name: &str) -> Result<Option<String>, SecretError> {
        let value = match self.table.get(name) {
            None => return Ok(None),
            Some(toml::Value::String(s)) => s.clone(),
            Some(toml::Value::Integer(i)) => i.to_string(),
            Some(toml::Value::Float(f)) => f.to_string(),
            Some(toml::Value::Boolean(b)) => b.to_string(),
            Some(toml::Value::Datetime(d)) => d.to_string(),
            Some(toml::Value::Array(_) | toml::Value::Table(_)) => {
                return Err(SecretError::NotScalar {
                    name: name.to_owned(),
                    source_label: self.path.clone(),
                });
            }
        };
        Ok(Some(value))
    }

    fn describe(&self) -> String {
        format!("file({})", self.path)
    }
}
