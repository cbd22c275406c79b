use std::fs::File;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::component::{ComponentDescriptor, ComponentKind, LanguageCode};
use crate::error::SyncError;
use crate::fetch::LocalArchive;

/// Compute the directory a component's translations are installed into.
///
/// Layout:
/// - `content_root/languages/plugins` for plugins
/// - `content_root/languages/themes` for themes
/// - `content_root/languages` for core
pub fn destination_dir(content_root: &Path, kind: ComponentKind) -> PathBuf {
    let languages = content_root.join("languages");
    match kind.languages_subdir() {
        Some(subdir) => languages.join(subdir),
        None => languages,
    }
}

/// File names the runtime loads for `language`, relative to the
/// destination directory.
///
/// - plugin/theme: `{slug}-{lang}.mo`, `{slug}-{lang}.po`
/// - core: `{lang}.mo`, `{lang}.po`, `admin-{lang}.mo`, `admin-{lang}.po`
///
/// The first entry is the primary `.mo` catalog.
pub fn catalog_file_names(component: &ComponentDescriptor, language: &LanguageCode) -> Vec<String> {
    match component.kind {
        ComponentKind::Core => vec![
            format!("{language}.mo"),
            format!("{language}.po"),
            format!("admin-{language}.mo"),
            format!("admin-{language}.po"),
        ],
        ComponentKind::Plugin | ComponentKind::Theme => {
            let slug = &component.slug;
            vec![
                format!("{slug}-{language}.mo"),
                format!("{slug}-{language}.po"),
            ]
        }
    }
}

/// Create `path` and any missing parents with mode 0775 on unix.
pub fn ensure_dir(path: &Path) -> Result<(), SyncError> {
    if path.is_dir() {
        return Ok(());
    }

    let mut builder = std::fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o775);
    }

    builder
        .create(path)
        .map_err(|source| SyncError::DirectoryCreateFailed {
            path: path.to_path_buf(),
            source,
        })
}

/// Unpacks zip translation archives into a destination directory.
///
/// Members are first extracted into a hidden staging directory inside the
/// destination. Only when every member extracted cleanly are they renamed
/// into place, so a corrupt member never leaves a half-written catalog
/// behind. The renames themselves are per file.
#[derive(Debug, Default, Clone, Copy)]
pub struct ArchiveInstaller;

impl ArchiveInstaller {
    pub fn new() -> Self {
        Self
    }

    /// Relative paths of the file members in `archive`, in archive order.
    /// A name that appears more than once is listed once.
    pub fn members(&self, archive: &LocalArchive) -> Result<Vec<PathBuf>, SyncError> {
        let mut zip = open_archive(archive.path())?;
        let mut members = Vec::with_capacity(zip.len());

        for index in 0..zip.len() {
            let entry = zip
                .by_index(index)
                .map_err(|e| SyncError::ArchiveOpenFailed {
                    path: archive.path().to_path_buf(),
                    reason: format!("unreadable entry {index}: {e}"),
                })?;

            if entry.is_dir() {
                continue;
            }

            if let Some(name) = entry.enclosed_name()
                && !members.iter().any(|m| m == name)
            {
                members.push(name.to_path_buf());
            }
        }

        Ok(members)
    }

    /// Extract every member of `archive` into `dest_dir`, creating it first.
    /// Returns the relative paths written. When a name repeats, the last
    /// copy in the archive wins.
    pub fn install(
        &self,
        archive: &LocalArchive,
        dest_dir: &Path,
    ) -> Result<Vec<PathBuf>, SyncError> {
        ensure_dir(dest_dir)?;

        let mut zip = open_archive(archive.path())?;
        let staging = staging_dir(dest_dir, archive.path());
        if staging.exists() {
            let _ = std::fs::remove_dir_all(&staging);
        }
        ensure_dir(&staging)?;

        let extracted = match extract_all(&mut zip, archive.path(), &staging) {
            Ok(extracted) => extracted,
            Err(e) => {
                let _ = std::fs::remove_dir_all(&staging);
                return Err(e);
            }
        };

        let moved = move_into_place(&extracted, &staging, dest_dir, archive.path());
        let _ = std::fs::remove_dir_all(&staging);
        moved?;

        info!(
            archive = %archive.path().display(),
            dest = %dest_dir.display(),
            files = extracted.len(),
            "installed translation archive"
        );

        Ok(extracted)
    }
}

fn open_archive(path: &Path) -> Result<zip::ZipArchive<File>, SyncError> {
    let file = File::open(path).map_err(|e| SyncError::ArchiveOpenFailed {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    zip::ZipArchive::new(file).map_err(|e| SyncError::ArchiveOpenFailed {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

fn staging_dir(dest_dir: &Path, archive_path: &Path) -> PathBuf {
    let stem = archive_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "archive".to_owned());
    dest_dir.join(format!(".wp-langs-staging-{stem}"))
}

fn extract_all(
    zip: &mut zip::ZipArchive<File>,
    archive_path: &Path,
    staging: &Path,
) -> Result<Vec<PathBuf>, SyncError> {
    let mut extracted = Vec::new();

    for index in 0..zip.len() {
        let mut entry = zip
            .by_index(index)
            .map_err(|e| SyncError::ExtractionFailed {
                archive: archive_path.to_path_buf(),
                member: format!("#{index}"),
                reason: e.to_string(),
            })?;

        let member = entry.name().to_owned();
        let fail = |reason: String| SyncError::ExtractionFailed {
            archive: archive_path.to_path_buf(),
            member: member.clone(),
            reason,
        };

        let relative = entry
            .enclosed_name()
            .map(|p| p.to_path_buf())
            .ok_or_else(|| fail("path escapes the destination directory".into()))?;

        let target = staging.join(&relative);

        if entry.is_dir() {
            std::fs::create_dir_all(&target).map_err(|e| fail(e.to_string()))?;
            continue;
        }

        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent).map_err(|e| fail(e.to_string()))?;
        }

        let mut out = File::create(&target).map_err(|e| fail(e.to_string()))?;
        std::io::copy(&mut entry, &mut out).map_err(|e| fail(e.to_string()))?;

        debug!(member = %relative.display(), "extracted archive member");
        // A repeated member name overwrites the earlier copy in staging.
        if !extracted.contains(&relative) {
            extracted.push(relative);
        }
    }

    Ok(extracted)
}

fn move_into_place(
    members: &[PathBuf],
    staging: &Path,
    dest_dir: &Path,
    archive_path: &Path,
) -> Result<(), SyncError> {
    for relative in members {
        let fail = |e: std::io::Error| SyncError::ExtractionFailed {
            archive: archive_path.to_path_buf(),
            member: relative.display().to_string(),
            reason: e.to_string(),
        };

        let target = dest_dir.join(relative);
        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent).map_err(fail)?;
        }
        std::fs::rename(staging.join(relative), &target).map_err(fail)?;
    }
    Ok(())
}
