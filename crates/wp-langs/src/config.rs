use std::path::{Path, PathBuf};

use crate::component::LanguageCode;
use crate::error::SyncError;

/// Languages to sync and the content root to install them under.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    languages: Vec<LanguageCode>,
    content_root: PathBuf,
}

impl SyncConfig {
    /// Build a config. Duplicate and blank language codes are dropped;
    /// first-seen order is kept.
    pub fn new<I, L>(languages: I, content_root: impl Into<PathBuf>) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<LanguageCode>,
    {
        let mut unique: Vec<LanguageCode> = Vec::new();
        for language in languages {
            let language = language.into();
            if language.as_str().trim().is_empty() || unique.contains(&language) {
                continue;
            }
            unique.push(language);
        }

        Self {
            languages: unique,
            content_root: content_root.into(),
        }
    }

    pub fn languages(&self) -> &[LanguageCode] {
        &self.languages
    }

    pub fn content_root(&self) -> &Path {
        &self.content_root
    }

    /// Check the config without touching the network. Only reads filesystem
    /// metadata; nothing is created.
    ///
    /// The content root must either be an existing directory or have an
    /// existing directory as its parent, so it can be created on demand.
    pub fn validate(&self) -> Result<(), SyncError> {
        if self.languages.is_empty() {
            return Err(SyncError::InvalidConfig("no languages configured".into()));
        }

        if self.content_root.as_os_str().is_empty() {
            return Err(SyncError::InvalidConfig("content root is not set".into()));
        }

        if self.content_root.exists() {
            if !self.content_root.is_dir() {
                return Err(SyncError::InvalidConfig(format!(
                    "content root {} is not a directory",
                    self.content_root.display()
                )));
            }
            return Ok(());
        }

        match self.content_root.parent() {
            Some(parent) if parent.as_os_str().is_empty() || parent.is_dir() => Ok(()),
            _ => Err(SyncError::InvalidConfig(format!(
                "content root {} does not exist and cannot be created",
                self.content_root.display()
            ))),
        }
    }
}
