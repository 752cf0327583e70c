//! The launcher: one linear run from secret lookup to a frame description.
//!
//! A run reads `API_KEY` (empty when unset), checks that `index.html` is in
//! the content root, then either splices the key into the page text
//! ([`LaunchMode::Inline`]) or hands it to the static component as a named
//! argument ([`LaunchMode::Component`]). A missing key is a side-panel
//! warning, never an error.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use tubemagic_secrets::{API_KEY, SecretStore};

use crate::embed::{ComponentArgs, Embed, FrameOptions};
use crate::error::LaunchError;
use crate::inject::{SecretEncoding, inject};
use crate::page::{INDEX_FILE, PageSource};

/// Side-panel text shown when no API key is configured.
pub const MISSING_KEY_MESSAGE: &str = "⚠️ API Key missing. Add API_KEY to your secrets.";

/// How the key reaches the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LaunchMode {
    /// Splice a script tag into the page text and frame it with `srcdoc`.
    #[default]
    Inline,
    /// Serve the content root as a component and pass `api_key` to it.
    Component,
}

impl LaunchMode {
    /// Parse `inline` or `component` (case-insensitive).
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "inline" | "html" => Some(Self::Inline),
            "component" | "static" => Some(Self::Component),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Inline => "inline",
            Self::Component => "component",
        }
    }
}

/// Severity of a side-panel notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Warning,
}

/// A message for the side panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

/// Launcher settings fixed at startup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LaunchSettings {
    pub mode: LaunchMode,
    pub encoding: SecretEncoding,
    pub frame: FrameOptions,
}

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Launch {
    /// What the hosting page frames.
    pub embed: Embed,
    /// Side-panel notices, in display order.
    pub sidebar: Vec<Notice>,
    /// Whether a non-empty key was found.
    pub secret_present: bool,
}

/// Runs the launcher against a secret store and a page source.
#[derive(Clone)]
pub struct Launcher {
    secrets: Arc<dyn SecretStore>,
    pages: Arc<dyn PageSource>,
    settings: LaunchSettings,
}

impl std::fmt::Debug for Launcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Launcher")
            .field("secrets", &self.secrets.describe())
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl Launcher {
    #[must_use]
    pub fn new(
        secrets: Arc<dyn SecretStore>,
        pages: Arc<dyn PageSource>,
        settings: LaunchSettings,
    ) -> Self {
        Self {
            secrets,
            pages,
            settings,
        }
    }

    #[must_use]
    pub fn settings(&self) -> LaunchSettings {
        self.settings
    }

    /// Look up the API key, defaulting to the empty string.
    ///
    /// # Errors
    ///
    /// Returns [`LaunchError::Secrets`] if the store cannot be read.
    pub async fn api_key(&self) -> Result<String, LaunchError> {
        Ok(self.secrets.get(API_KEY).await?.unwrap_or_default())
    }

    /// Execute one run.
    ///
    /// When the entry page is missing the run stops before any content read
    /// and no [`Embed`] is produced.
    ///
    /// # Errors
    ///
    /// Returns [`LaunchError::MissingPage`] if `index.html` is absent, and
    /// [`LaunchError::Secrets`] or [`LaunchError::Page`] for any other
    /// failure while loading.
    pub async fn launch(&self) -> Result<Launch, LaunchError> {
        let api_key = self.api_key().await?;
        let secret_present = !api_key.is_empty();

        if !self.pages.exists(INDEX_FILE).await? {
            warn!(page = INDEX_FILE, "entry page missing from content root");
            return Err(LaunchError::MissingPage {
                name: INDEX_FILE.to_owned(),
            });
        }

        let frame = self.settings.frame;
        let embed = match self.settings.mode {
            LaunchMode::Inline => {
                let html = self.pages.read(INDEX_FILE).await?;
                let out = inject(&html, &api_key, self.settings.encoding);
                if !out.injected {
                    warn!(page = INDEX_FILE, "no <head> tag found, API key not injected");
                }
                Embed::Inline {
                    html: out.html,
                    frame,
                }
            }
            LaunchMode::Component => Embed::component(ComponentArgs { api_key }, frame),
        };

        let mut sidebar = Vec::new();
        if !secret_present {
            sidebar.push(Notice {
                level: NoticeLevel::Warning,
                message: MISSING_KEY_MESSAGE.to_owned(),
            });
        }

        info!(
            mode = self.settings.mode.as_str(),
            secret_present,
            "launch complete"
        );

        Ok(Launch {
            embed,
            sidebar,
            secret_present,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use tubemagic_secrets::{MemorySecretStore, TomlSecretStore};

    use super::*;
    use crate::error::PageError;

    /// Page source that counts content reads.
    #[derive(Default)]
    struct CountingPages {
        html: Option<String>,
        reads: AtomicUsize,
    }

    impl CountingPages {
        fn with(html: &str) -> Self {
            Self {
                html: Some(html.to_owned()),
                reads: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait::async_trait]
    impl PageSource for CountingPages {
        async fn exists(&self, _name: &str) -> Result<bool, PageError> {
            Ok(self.html.is_some())
        }

        async fn read(&self, name: &str) -> Result<String, PageError> {
            self.reads.fetch_add(1, Ordering::SeqCst);
            self.html.clone().ok_or_else(|| PageError::Io {
                name: name.to_owned(),
                reason: "not found".to_owned(),
            })
        }
    }

    struct FailingPages;

    #[async_trait::async_trait]
    impl PageSource for FailingPages {
        async fn exists(&self, _name: &str) -> Result<bool, PageError> {
            Ok(true)
        }

        async fn read(&self, name: &str) -> Result<String, PageError> {
            Err(PageError::Io {
                name: name.to_owned(),
                reason: "permission denied".to_owned(),
            })
        }
    }

    fn launcher(
        secrets: MemorySecretStore,
        pages: Arc<dyn PageSource>,
        mode: LaunchMode,
    ) -> Launcher {
        Launcher::new(
            Arc::new(secrets),
            pages,
            LaunchSettings {
                mode,
                ..LaunchSettings::default()
            },
        )
    }

    #[tokio::test]
    async fn inline_run_injects_key_after_head() {
        let pages = Arc::new(CountingPages::with("<head></head><body>hi</body>"));
        let l = launcher(
            MemorySecretStore::with_secrets([("API_KEY", "ABC")]),
            pages,
            LaunchMode::Inline,
        );

        let launch = l.launch().await.unwrap();
        assert!(launch.secret_present);
        assert!(launch.sidebar.is_empty());
        match launch.embed {
            Embed::Inline { html, frame } => {
                assert_eq!(
                    html,
                    "<head><script>window.process = { env: { API_KEY: \"ABC\" } };</script></head><body>hi</body>"
                );
                assert_eq!(frame, FrameOptions::default());
            }
            Embed::Component { .. } => unreachable!("expected inline embed"),
        }
    }

    #[tokio::test]
    async fn missing_page_skips_read_and_embed() {
        let pages = Arc::new(CountingPages::default());
        let l = launcher(
            MemorySecretStore::with_secrets([("API_KEY", "ABC")]),
            Arc::clone(&pages) as Arc<dyn PageSource>,
            LaunchMode::Inline,
        );

        let err = l.launch().await.unwrap_err();
        assert!(err.is_missing_page());
        assert_eq!(
            err.user_message(),
            "Missing index.html. Ensure all files are uploaded to the root."
        );
        assert_eq!(pages.reads.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn missing_page_fails_component_mode_too() {
        let l = launcher(
            MemorySecretStore::new(),
            Arc::new(CountingPages::default()),
            LaunchMode::Component,
        );
        assert!(l.launch().await.unwrap_err().is_missing_page());
    }

    #[tokio::test]
    async fn missing_key_warns_and_still_renders() {
        let pages = Arc::new(CountingPages::with("<head></head>"));
        let l = launcher(MemorySecretStore::new(), pages, LaunchMode::Inline);

        let launch = l.launch().await.unwrap();
        assert!(!launch.secret_present);
        assert_eq!(
            launch.sidebar,
            vec![Notice {
                level: NoticeLevel::Warning,
                message: MISSING_KEY_MESSAGE.to_owned(),
            }]
        );
        match launch.embed {
            Embed::Inline { html, .. } => assert!(html.contains("API_KEY: \"\"")),
            Embed::Component { .. } => unreachable!("expected inline embed"),
        }
    }

    #[tokio::test]
    async fn empty_key_counts_as_missing() {
        let pages = Arc::new(CountingPages::with("<head></head>"));
        let l = launcher(
            MemorySecretStore::with_secrets([("API_KEY", "")]),
            pages,
            LaunchMode::Inline,
        );
        assert_eq!(l.launch().await.unwrap().sidebar.len(), 1);
    }

    #[tokio::test]
    async fn component_run_passes_key_as_argument_without_reading() {
        let pages = Arc::new(CountingPages::with("<head></head>"));
        let l = launcher(
            MemorySecretStore::with_secrets([("API_KEY", "k\"ey")]),
            Arc::clone(&pages) as Arc<dyn PageSource>,
            LaunchMode::Component,
        );

        let launch = l.launch().await.unwrap();
        assert_eq!(pages.reads.load(Ordering::SeqCst), 0);
        match launch.embed {
            Embed::Component { args, src, .. } => {
                assert_eq!(args.api_key, "k\"ey");
                assert_eq!(src, "/component/tubemagic_hub/index.html");
            }
            Embed::Inline { .. } => unreachable!("expected component embed"),
        }
    }

    #[tokio::test]
    async fn repeated_runs_are_byte_identical() {
        let pages = Arc::new(CountingPages::with("<html><head><title>x</title></head></html>"));
        let l = launcher(
            MemorySecretStore::with_secrets([("API_KEY", "ABC")]),
            Arc::clone(&pages) as Arc<dyn PageSource>,
            LaunchMode::Inline,
        );

        let first = l.launch().await.unwrap();
        let second = l.launch().await.unwrap();
        assert_eq!(first, second);
        assert_eq!(pages.reads.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn read_failure_becomes_generic_error() {
        let l = launcher(
            MemorySecretStore::with_secrets([("API_KEY", "ABC")]),
            Arc::new(FailingPages),
            LaunchMode::Inline,
        );
        let err = l.launch().await.unwrap_err();
        assert!(
            err.user_message()
                .starts_with("Error initializing app: page error: failed to read 'index.html'")
        );
    }

    #[tokio::test]
    async fn integer_key_from_secrets_file_is_injected() {
        let store = TomlSecretStore::parse("secrets.toml", "API_KEY = 12345").unwrap();
        let l = Launcher::new(
            Arc::new(store),
            Arc::new(CountingPages::with("<head></head>")),
            LaunchSettings::default(),
        );

        let launch = l.launch().await.unwrap();
        assert!(launch.secret_present);
        match launch.embed {
            Embed::Inline { html, .. } => assert!(html.contains("API_KEY: \"12345\"")),
            Embed::Component { .. } => unreachable!("expected inline embed"),
        }
    }

    #[tokio::test]
    async fn integer_key_does_not_hide_missing_page() {
        let store = TomlSecretStore::parse("secrets.toml", "API_KEY = 12345").unwrap();
        let l = Launcher::new(
            Arc::new(store),
            Arc::new(CountingPages::default()),
            LaunchSettings::default(),
        );
        assert!(l.launch().await.unwrap_err().is_missing_page());
    }

    #[tokio::test]
    async fn store_failure_becomes_generic_error() {
        let broken = TomlSecretStore::parse("secrets.toml", "API_KEY = [1, 2]").unwrap();
        let l = Launcher::new(
            Arc::new(broken),
            Arc::new(CountingPages::with("<head></head>")),
            LaunchSettings::default(),
        );
        let err = l.launch().await.unwrap_err();
        assert!(matches!(err, LaunchError::Secrets(_)));
        assert!(err.user_message().starts_with("Error initializing app:"));
    }
}
