//! Server configuration for TubeMagic Hub.
//!
//! Loads configuration from environment variables with sensible defaults.
//! All settings can be overridden via `HUB_*` environment variables. None of
//! them carry the API key itself; that comes from the secret store.

use std::net::SocketAddr;
use std::path::PathBuf;

use tubemagic_core::embed::FrameOptions;
use tubemagic_core::host::{Layout, PageConfig};
use tubemagic_core::inject::SecretEncoding;
use tubemagic_core::launcher::{LaunchMode, LaunchSettings};

/// Default listener, the hosting platform's usual app port.
const DEFAULT_PORT: u16 = 8501;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind the HTTP listener to.
    pub bind_addr: SocketAddr,
    /// Directory holding `index.html` and the dashboard assets.
    pub content_root: PathBuf,
    /// Optional `secrets.toml`; skipped when the file does not exist.
    pub secrets_file: PathBuf,
    /// Prefix for environment-variable secrets (empty: `API_KEY` as is).
    pub secrets_env_prefix: String,
    /// Launcher mode, key encoding, and frame size.
    pub launch: LaunchSettings,
    /// Hosting page title, icon, and layout.
    pub page: PageConfig,
    /// Log level filter (e.g., `info`, `debug`, `warn`).
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `PORT` — port to bind on (binds to `0.0.0.0`)
    /// - `HUB_BIND_ADDR` — full bind address (overrides `PORT`, default: `127.0.0.1:8501`)
    /// - `HUB_CONTENT_ROOT` — directory holding `index.html` (default: `.`)
    /// - `HUB_SECRETS_FILE` — secrets file (default: `.streamlit/secrets.toml`)
    /// - `HUB_SECRETS_ENV_PREFIX` — prefix for env secrets (default: empty)
    /// - `HUB_MODE` — `inline` or `component` (default: `inline`)
    /// - `HUB_INJECTION` — `json` or `literal` (default: `json`)
    /// - `HUB_FRAME_HEIGHT` — frame height in pixels (default: `1200`)
    /// - `HUB_FRAME_SCROLLING` — frame scrolling (default: `true`)
    /// - `HUB_PAGE_TITLE` / `HUB_PAGE_ICON` — page chrome (default: `TubeMagic Hub` / `🚀`)
    /// - `HUB_LAYOUT` — `wide` or `centered` (default: `wide`)
    /// - `HUB_LOG_LEVEL` — log filter (default: `info`)
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// Unparseable values fall back to their defaults.
    pub fn from_lookup<F>(var: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        // Priority: HUB_BIND_ADDR > PORT > default 127.0.0.1:8501
        let default_addr = SocketAddr::from(([127, 0, 0, 1], DEFAULT_PORT));
        let bind_addr = if let Some(addr) = var("HUB_BIND_ADDR") {
            addr.parse().unwrap_or(default_addr)
        } else if let Some(port_str) = var("PORT") {
            let port: u16 = port_str.parse().unwrap_or(DEFAULT_PORT);
            SocketAddr::from(([0, 0, 0, 0], port))
        } else {
            default_addr
        };

        let content_root = var("HUB_CONTENT_ROOT").map_or_else(|| PathBuf::from("."), PathBuf::from);

        let secrets_file = var("HUB_SECRETS_FILE")
            .map_or_else(|| PathBuf::from(".streamlit/secrets.toml"), PathBuf::from);

        let secrets_env_prefix = var("HUB_SECRETS_ENV_PREFIX").unwrap_or_default();

        let mode = var("HUB_MODE")
            .and_then(|v| LaunchMode::parse(&v))
            .unwrap_or_default();

        let encoding = var("HUB_INJECTION")
            .and_then(|v| SecretEncoding::parse(&v))
            .unwrap_or_default();

        let defaults = FrameOptions::default();
        let frame = FrameOptions {
            height: var("HUB_FRAME_HEIGHT")
                .and_then(|v| v.parse().ok())
                .filter(|h| *h > 0)
                .unwrap_or(defaults.height),
            scrolling: var("HUB_FRAME_SCROLLING")
                .map_or(defaults.scrolling, |v| v != "false" && v != "0"),
        };

        let page_defaults = PageConfig::default();
        let page = PageConfig {
            title: var("HUB_PAGE_TITLE").unwrap_or(page_defaults.title),
            icon: var("HUB_PAGE_ICON").unwrap_or(page_defaults.icon),
            layout: match var("HUB_LAYOUT").map(|v| v.to_lowercase()).as_deref() {
                Some("centered") => Layout::Centered,
                _ => Layout::Wide,
            },
        };

        let log_level = var("HUB_LOG_LEVEL").unwrap_or_else(|| "info".to_owned());

        Self {
            bind_addr,
            content_root,
            secrets_file,
            secrets_env_prefix,
            launch: LaunchSettings {
                mode,
                encoding,
                frame,
            },
            page,
            log_level,
        }
    }
}
