//! Secret store abstraction for TubeMagic Hub.
//!
//! This crate defines the [`SecretStore`] trait — a read-only, name-keyed
//! lookup of string secrets. The launcher in `tubemagic-core` asks a store
//! for a single well-known name ([`API_KEY`]) at the start of every run and
//! knows nothing about where the value lives.
//!
//! Four implementations are provided:
//!
//! - [`EnvSecretStore`] — process environment, with an optional name prefix
//! - [`TomlSecretStore`] — a `secrets.toml` file, parsed once at open time
//! - [`LayeredSecretStore`] — ordered chain, first store holding the name wins
//! - [`MemorySecretStore`] — in-memory, for testing only

mod env;
mod error;
mod layered;
mod memory;
mod toml_file;

pub use env::EnvSecretStore;
pub use error::SecretError;
pub use layered::LayeredSecretStore;
pub use memory::MemorySecretStore;
pub use toml_file::TomlSecretStore;

/// Name of the secret the launcher hands to the embedded dashboard.
pub const API_KEY: &str = "API_KEY";

/// A pluggable, read-only secret store.
///
/// Names are case-sensitive. Values are opaque strings — the store never
/// validates their shape, and callers must never log them.
///
/// Implementations must be safe to share across async tasks (`Send + Sync`).
#[async_trait::async_trait]
pub trait SecretStore: Send + Sync + 'static {
    /// Look up a secret by name.
    ///
    /// Returns `Ok(None)` if the store does not hold the name.
    ///
    /// # Errors
    ///
    /// Returns [`SecretError`] if the underlying source cannot be read.
    async fn get(&self, name: &str) -> Result<Option<String>, SecretError>;

    /// Short human-readable label used in logs (never includes values).
    fn describe(&self) -> String;
}
