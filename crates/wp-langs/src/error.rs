use std::path::PathBuf;

/// Errors that can occur while syncing translations for a component.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("translation API unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error("{component}: no translations available")]
    NoTranslationsFound { component: String },

    #[error("download of {url} failed: {reason}")]
    DownloadFailed { url: String, reason: String },

    #[error("failed to create directory at {}: {source}", path.display())]
    DirectoryCreateFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to open archive {}: {reason}", path.display())]
    ArchiveOpenFailed { path: PathBuf, reason: String },

    #[error("failed to extract {member} from {}: {reason}", archive.display())]
    ExtractionFailed {
        archive: PathBuf,
        member: String,
        reason: String,
    },

    #[error("failed to fingerprint {}: {source}", path.display())]
    Fingerprint {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SyncError {
    /// True for outcomes that mean "nothing to do" rather than a failure.
    pub fn is_soft(&self) -> bool {
        matches!(self, Self::NoTranslationsFound { .. })
    }
}
