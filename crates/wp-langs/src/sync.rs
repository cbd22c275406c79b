use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::catalog::{Catalog, TranslationDescriptor, find_translation};
use crate::component::{ComponentDescriptor, LanguageCode};
use crate::config::SyncConfig;
use crate::error::SyncError;
use crate::feedback::Feedback;
use crate::fetch::ArchiveFetcher;
use crate::fingerprint::Fingerprint;
use crate::install::{ArchiveInstaller, catalog_file_names, destination_dir};

/// Outcome of syncing one component.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncResult {
    /// Languages whose files changed, in the order they were requested.
    pub updated_languages: Vec<LanguageCode>,
    /// Notes and per-language warnings collected during the run.
    pub feedback: Vec<Feedback>,
}

impl SyncResult {
    pub fn has_updates(&self) -> bool {
        !self.updated_languages.is_empty()
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Feedback> {
        self.feedback.iter().filter(|f| f.is_warning())
    }
}

/// Syncs translations for one component at a time.
///
/// Languages are processed one after another. A failure while fetching or
/// installing one language is recorded as a warning on the result and the
/// remaining languages are still attempted.
pub struct Synchronizer {
    catalog: Arc<dyn Catalog>,
    fetcher: Arc<dyn ArchiveFetcher>,
    installer: ArchiveInstaller,
}

impl Synchronizer {
    pub fn new(catalog: Arc<dyn Catalog>, fetcher: Arc<dyn ArchiveFetcher>) -> Self {
        Self {
            catalog,
            fetcher,
            installer: ArchiveInstaller::new(),
        }
    }

    /// Sync every configured language of `component`.
    ///
    /// Returns [`SyncError::InvalidConfig`] before any I/O when `config` is
    /// invalid, and [`SyncError::UpstreamUnavailable`] when the catalog
    /// cannot be listed. A component without published translations is not
    /// an error: the result is empty and carries an info note.
    pub async fn sync_all(
        &self,
        component: &ComponentDescriptor,
        config: &SyncConfig,
    ) -> Result<SyncResult, SyncError> {
        config.validate()?;

        let translations = match self.catalog.list_translations(component).await {
            Ok(translations) => translations,
            Err(e) if e.is_soft() => {
                info!(%component, "no translations published");
                return Ok(SyncResult {
                    updated_languages: Vec::new(),
                    feedback: vec![Feedback::info(e.to_string())],
                });
            }
            Err(e) => return Err(e),
        };

        let dest_dir = destination_dir(config.content_root(), component.kind);
        let mut result = SyncResult::default();

        for language in config.languages() {
            let Some(translation) = find_translation(&translations, language) else {
                debug!(%component, %language, "no published translation, skipping");
                continue;
            };

            match self
                .sync_language(component, language, translation, &dest_dir)
                .await
            {
                Ok(true) => {
                    info!(%component, %language, "translation updated");
                    result.updated_languages.push(language.clone());
                }
                Ok(false) => debug!(%component, %language, "translation unchanged"),
                Err(e) => {
                    warn!(%component, %language, error = %e, "translation sync failed");
                    result
                        .feedback
                        .push(Feedback::language_warning(language, e.to_string()));
                }
            }
        }

        Ok(result)
    }

    /// Fetch and install one language. Returns whether any tracked file
    /// changed.
    async fn sync_language(
        &self,
        component: &ComponentDescriptor,
        language: &LanguageCode,
        translation: &TranslationDescriptor,
        dest_dir: &Path,
    ) -> Result<bool, SyncError> {
        let archive = self.fetcher.fetch(&translation.package_url).await?;
        let members = self.installer.members(&archive)?;
        let tracked = tracked_files(component, language, &members);

        let before = Fingerprint::of_files(dest_dir, &tracked)?;
        self.installer.install(&archive, dest_dir)?;
        let after = Fingerprint::of_files(dest_dir, &tracked)?;

        debug!(
            %language,
            before = %before.to_hex(),
            after = %after.to_hex(),
            "compared fingerprints"
        );

        Ok(before != after)
    }
}

/// The canonical catalog files for a language plus every file the archive
/// ships, so multi-file bundles (core) are compared as a whole.
fn tracked_files(
    component: &ComponentDescriptor,
    language: &LanguageCode,
    members: &[PathBuf],
) -> Vec<PathBuf> {
    let mut tracked: Vec<PathBuf> = catalog_file_names(component, language)
        .into_iter()
        .map(PathBuf::from)
        .collect();

    for member in members {
        if !tracked.contains(member) {
            tracked.push(member.clone());
        }
    }

    tracked
}
