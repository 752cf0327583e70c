//! Secret store error types.
//!
//! Variants carry the source location and the failing name, never the
//! secret value.

/// Errors that can occur while reading secrets.
#[derive(Debug, thiserror::Error)]
pub enum SecretError {
    /// The secrets file could not be read from disk.
    #[error("failed to read secrets file '{path}': {reason}")]
    Read { path: String, reason: String },

    /// The secrets file is not valid TOML.
    #[error("failed to parse secrets file '{path}': {reason}")]
    Parse { path: String, reason: String },

    /// A secret exists but is a TOML table or array rather than a scalar.
    #[error("secret '{name}' in '{source_label}' is not a scalar value")]
    NotScalar { name: String, source_label: String },

    /// An environment variable exists but is not valid unicode.
    #[error("environment variable '{name}' is not valid unicode")]
    InvalidUnicode { name: String },
}
