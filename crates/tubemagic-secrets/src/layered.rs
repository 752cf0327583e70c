//! Ordered chain of secret stores.

use std::sync::Arc;

use crate::{SecretError, SecretStore};

/// Consults each layer in order; the first layer holding the name wins.
///
/// A layer error stops the lookup instead of falling through, so a broken
/// secrets file is never masked by an environment variable.
#[derive(Clone, Default)]
pub struct LayeredSecretStore {
    layers: Vec<Arc<dyn SecretStore>>,
}

impl LayeredSecretStore {
    /// Create an empty chain. An empty chain holds nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a layer with lower priority than all existing ones.
    #[must_use]
    pub fn push(mut self, layer: Arc<dyn SecretStore>) -> Self {
        self.layers.push(layer);
        self
    }
}

impl std::fmt::Debug for LayeredSecretStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayeredSecretStore")
            .field("layers", &self.describe())
            .finish()
    }
}

#[async_trait::async_trait]
impl SecretStore for LayeredSecretStore {
    async fn get(&self, name: &str) -> Result<Option<String>, SecretError> {
        for layer in &self.layers {
            if let Some(value) = layer.get(name).await? {
                tracing::trace!(name, layer = %layer.describe(), "secret resolved");
                return Ok(Some(value));
            }
        }
        Ok(None)
    }

    fn describe(&self) -> String {
        let names: Vec<String> = self.layers.iter().map(|l| l.describe()).collect();
        format!("layered[{}]", names.join(", "))
    }
}
