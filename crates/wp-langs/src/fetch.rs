use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::SyncError;

/// A translation archive staged on local disk.
///
/// The file is left in place after installation; it lives in a temporary
/// directory and is overwritten by the next fetch of the same URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalArchive {
    path: PathBuf,
}

impl LocalArchive {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Downloads translation archives.
#[async_trait::async_trait]
pub trait ArchiveFetcher: Send + Sync {
    /// Download `url` to a staging location. Fails with
    /// [`SyncError::DownloadFailed`] on transport errors or non-success status.
    async fn fetch(&self, url: &str) -> Result<LocalArchive, SyncError>;
}

#[async_trait::async_trait]
impl<T: ArchiveFetcher + ?Sized> ArchiveFetcher for Arc<T> {
    async fn fetch(&self, url: &str) -> Result<LocalArchive, SyncError> {
        (**self).fetch(url).await
    }
}

/// Last path segment of a URL, ignoring query and fragment.
/// Falls back to `translations.zip` when the URL has no usable segment.
pub fn url_basename(url: &str) -> &str {
    let without_query = url.split(['?', '#']).next().unwrap_or(url);
    let without_scheme = without_query
        .split_once("://")
        .map_or(without_query, |(_, rest)| rest);

    match without_scheme.rsplit_once('/') {
        Some((_, name)) if !name.is_empty() => name,
        _ => "translations.zip",
    }
}
