//! Shared application state for the TubeMagic Hub server.
//!
//! A single [`AppState`] is constructed at startup and shared across all
//! Axum handlers via `Arc`. It holds the launcher (secret store plus page
//! source) and the hosting page renderer. Nothing in it changes after
//! startup; every request is an independent launcher run.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;

use tubemagic_core::host::HostPage;
use tubemagic_core::launcher::{LaunchMode, Launcher};
use tubemagic_core::page::FsPageSource;
use tubemagic_secrets::{
    EnvSecretStore, LayeredSecretStore, SecretError, SecretStore, TomlSecretStore,
};

use crate::config::ServerConfig;

/// Shared application state passed to all HTTP handlers.
pub struct AppState {
    /// Runs the launcher for each page load.
    pub launcher: Launcher,
    /// Hosting page chrome.
    pub host_page: HostPage,
    /// Directory served as the component's static root.
    pub content_root: PathBuf,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("launcher", &self.launcher)
            .field("content_root", &self.content_root)
            .finish_non_exhaustive()
    }
}

impl AppState {
    /// Assemble state from an already-built secret store.
    #[must_use]
    pub fn new(config: &ServerConfig, secrets: Arc<dyn SecretStore>) -> Arc<Self> {
        let pages = Arc::new(FsPageSource::new(config.content_root.clone()));
        Arc::new(Self {
            launcher: Launcher::new(secrets, pages, config.launch),
            host_page: HostPage::new(config.page.clone()),
            content_root: config.content_root.clone(),
        })
    }

    /// Build state from configuration, opening the secret store.
    ///
    /// The store is the secrets file (when it exists) layered over the
    /// process environment.
    ///
    /// # Errors
    ///
    /// Returns [`SecretError`] if the secrets file exists but cannot be read
    /// or parsed.
    pub async fn from_config(config: &ServerConfig) -> Result<Arc<Self>, SecretError> {
        let mut secrets = LayeredSecretStore::new();

        if let Some(file) = TomlSecretStore::open_optional(&config.secrets_file).await? {
            info!(path = %config.secrets_file.display(), "secrets file layer registered");
            secrets = secrets.push(Arc::new(file));
        }

        let env = EnvSecretStore::new().with_prefix(config.secrets_env_prefix.clone());
        secrets = secrets.push(Arc::new(env));

        info!(store = %secrets.describe(), "secret store ready");
        Ok(Self::new(config, Arc::new(secrets)))
    }

    /// Launcher mode, which decides whether the static root is mounted.
    #[must_use]
    pub fn mode(&self) -> LaunchMode {
        self.launcher.settings().mode
    }
}
