//! Page sources: where the dashboard's entry HTML comes from.

use std::path::PathBuf;

use crate::error::PageError;

/// File name of the dashboard entry page.
pub const INDEX_FILE: &str = "index.html";

/// Read access to the content root.
///
/// Names are plain file names; implementations reject anything containing a
/// path separator or `..`.
#[async_trait::async_trait]
pub trait PageSource: Send + Sync + 'static {
    /// Whether `name` exists in the content root.
    ///
    /// # Errors
    ///
    /// Returns [`PageError`] if the name is invalid or the check fails.
    async fn exists(&self, name: &str) -> Result<bool, PageError>;

    /// Read the full text of `name` as UTF-8.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::Io`] if the read fails and
    /// [`PageError::NotUtf8`] if the content is not UTF-8.
    async fn read(&self, name: &str) -> Result<String, PageError>;
}

/// Page source backed by a directory on disk.
#[derive(Debug, Clone)]
pub struct FsPageSource {
    root: PathBuf,
}

impl FsPageSource {
    /// Serve pages from `root`. The directory is not checked until a page
    /// is requested.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, name: &str) -> Result<PathBuf, PageError> {
        validate_name(name)?;
        Ok(self.root.join(name))
    }
}

/// Reject names that could escape the content root.
///
/// # Errors
///
/// Returns [`PageError::InvalidName`] for empty names, names containing
/// `/` or `\`, and `.`/`..`.
pub fn validate_name(name: &str) -> Result<(), PageError> {
    let bad = name.is_empty()
        || name == "."
        || name == ".."
        || name.contains('/')
        || name.contains('\\');
    if bad {
        return Err(PageError::InvalidName {
            name: name.to_owned(),
        });
    }
    Ok(())
}

#[async_trait::async_trait]
impl PageSource for FsPageSource {
    async fn exists(&self, name: &str) -> Result<bool, PageError> {
        let path = self.resolve(name)?;
        match tokio::fs::metadata(&path).await {
            Ok(meta) => Ok(meta.is_file()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(PageError::Io {
                name: name.to_owned(),
                reason: e.to_string(),
            }),
        }
    }

    async fn read(&self, name: &str) -> Result<String, PageError> {
        let path = self.resolve(name)?;
        let bytes = tokio::fs::read(&path).await.map_err(|e| PageError::Io {
            name: name.to_owned(),
            reason: e.to_string(),
        })?;
        String::from_utf8(bytes).map_err(|_| PageError::NotUtf8 {
            name: name.to_owned(),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn exists_and_read() {
        let dir = tempfile::tempdir().unwrap();
        tokio::fs::write(dir.path().join(INDEX_FILE), "<head></head>")
            .await
            .unwrap();

        let pages = FsPageSource::new(dir.path());
        assert!(pages.exists(INDEX_FILE).await.unwrap());
        assert_eq!(pages.read(INDEX_FILE).await.unwrap(), "<head></head>");
    }

    #[tokio::test]
    async fn missing_file_does_not_exist() {
        let dir = tempfile::tempdir().unwrap();
        let pages = FsPageSource::new(dir.path());
        assert!(!pages.exists(INDEX_FILE).await.unwrap());
        assert!(matches!(
            pages.read(INDEX_FILE).await,
            Err(PageError::Io { .. })
        ));
    }

    #[tokio::test]
    async fn directory_is_not_a_page() {
        let dir = tempfile::tempdir().unwrap();
        tokio::fs::create_dir(dir.path().join(INDEX_FILE)).await.unwrap();
        let pages = FsPageSource::new(dir.path());
        assert!(!pages.exists(INDEX_FILE).await.unwrap());
    }

    #[tokio::test]
    async fn invalid_utf8_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        tokio::fs::write(dir.path().join(INDEX_FILE), [0xff, 0xfe, 0x00])
            .await
            .unwrap();
        let pages = FsPageSource::new(dir.path());
        assert!(matches!(
            pages.read(INDEX_FILE).await,
            Err(PageError::NotUtf8 { .. })
        ));
    }

    #[test]
    fn names_that_escape_the_root_are_invalid() {
        for name in ["", ".", "..", "../secrets.toml", "a/b.html", "a\\b.html"] {
            assert!(validate_name(name).is_err(), "{name:?} should be rejected");
        }
        assert!(validate_name(INDEX_FILE).is_ok());
    }
}
