use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};
use tracing::debug;
use wp_langs::fetch::url_basename;
use wp_langs::{ArchiveFetcher, LocalArchive, SyncError};

use crate::http::{ClientError, HttpSettings};

/// Downloads translation packages into the staging directory.
pub struct PackageDownloader {
    client: reqwest::Client,
    staging_dir: PathBuf,
}

impl PackageDownloader {
    pub fn new(settings: &HttpSettings) -> Result<Self, ClientError> {
        Ok(Self {
            client: settings.build_client()?,
            staging_dir: settings.staging_dir(),
        })
    }

    pub fn staging_dir(&self) -> &Path {
        &self.staging_dir
    }

    /// Where `url` is staged. Different packages often share a base name
    /// (`sv_SE.zip`), so it is prefixed with a digest of the full URL.
    pub fn staged_path(&self, url: &str) -> PathBuf {
        let digest = Sha256::digest(url.as_bytes());
        let prefix: String = digest.iter().take(6).map(|b| format!("{b:02x}")).collect();
        self.staging_dir
            .join(format!("{prefix}-{}", url_basename(url)))
    }
}

#[async_trait::async_trait]
impl ArchiveFetcher for PackageDownloader {
    async fn fetch(&self, url: &str) -> Result<LocalArchive, SyncError> {
        let failed = |reason: String| SyncError::DownloadFailed {
            url: url.to_owned(),
            reason,
        };

        let mut response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| failed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(failed(format!("HTTP {}", response.status())));
        }

        std::fs::create_dir_all(&self.staging_dir).map_err(|e| {
            failed(format!(
                "cannot create staging directory {}: {e}",
                self.staging_dir.display()
            ))
        })?;

        let path = self.staged_path(url);
        let mut file = File::create(&path)
            .map_err(|e| failed(format!("cannot create {}: {e}", path.display())))?;

        let mut written = 0usize;
        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| failed(format!("failed to read body: {e}")))?
        {
            file.write_all(&chunk)
                .map_err(|e| failed(format!("cannot write {}: {e}", path.display())))?;
            written += chunk.len();
        }

        debug!(%url, path = %path.display(), bytes = written, "downloaded package");
        Ok(LocalArchive::new(path))
    }
}
