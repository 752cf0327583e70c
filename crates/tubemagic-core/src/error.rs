//! Error types for `tubemagic-core`.
//!
//! Each variant carries enough context to diagnose the problem without a
//! debugger. No variant ever carries the secret value.

use tubemagic_secrets::SecretError;

/// Message shown in the page banner when `index.html` is absent.
pub const MISSING_PAGE_MESSAGE: &str =
    "Missing index.html. Ensure all files are uploaded to the root.";

/// Errors from reading pages out of the content root.
#[derive(Debug, thiserror::Error)]
pub enum PageError {
    /// The requested name is not a plain file name (separators, `..`, empty).
    #[error("invalid page name '{name}'")]
    InvalidName { name: String },

    /// The file system returned an error.
    #[error("failed to read '{name}': {reason}")]
    Io { name: String, reason: String },

    /// The file exists but is not UTF-8 text.
    #[error("'{name}' is not valid UTF-8")]
    NotUtf8 { name: String },
}

/// Errors that end a launcher run.
#[derive(Debug, thiserror::Error)]
pub enum LaunchError {
    /// The dashboard entry page is not in the content root.
    #[error("page '{name}' not found in content root")]
    MissingPage { name: String },

    /// The secret store could not be read.
    #[error("secret store error: {0}")]
    Secrets(#[from] SecretError),

    /// The page could not be checked or read.
    #[error("page error: {0}")]
    Page(#[from] PageError),
}

impl LaunchError {
    /// The string shown to the user in the page-level error banner.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::MissingPage { .. } => MISSING_PAGE_MESSAGE.to_owned(),
            Self::Secrets(_) | Self::Page(_) => format!("Error initializing app: {self}"),
        }
    }

    /// Whether this error means the entry page is absent.
    #[must_use]
    pub fn is_missing_page(&self) -> bool {
        matches!(self, Self::MissingPage { .. })
    }
}
