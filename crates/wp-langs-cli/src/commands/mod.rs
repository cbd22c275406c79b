pub mod lock;
pub mod package;
pub mod sync;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use wp_langs::{ComponentDescriptor, Feedback, SyncConfig, SyncError, SyncResult, Synchronizer};

use crate::composer::ProjectConfig;
use crate::locate;

/// Print feedback items to stderr.
pub fn print_feedback(feedback: &[Feedback]) {
    for item in feedback {
        eprintln!("{item}");
    }
}

/// One line per updated language, or a single line when nothing changed.
pub fn summary_lines(component: &ComponentDescriptor, result: &SyncResult) -> Vec<String> {
    if !result.has_updates() {
        return vec![format!("No translations updated for {component}")];
    }

    result
        .updated_languages
        .iter()
        .map(|language| format!("Updated translation {language} for {component}"))
        .collect()
}

/// Print the outcome of one component's sync. Errors become warnings.
pub fn report(component: &ComponentDescriptor, outcome: Result<SyncResult, SyncError>) {
    match outcome {
        Ok(result) => {
            print_feedback(&result.feedback);
            for line in summary_lines(component, &result) {
                println!("{line}");
            }
        }
        Err(e) => eprintln!("warning: {component}: {e}"),
    }
}

pub async fn sync_component(
    sync: &Synchronizer,
    component: &ComponentDescriptor,
    config: &SyncConfig,
) {
    report(component, sync.sync_all(component, config).await);
}

/// A project resolved from its manifest.
#[derive(Debug)]
pub struct Project {
    pub manifest: PathBuf,
    pub config: SyncConfig,
}

impl Project {
    /// Find the manifest at or above `start_dir`, read its translation
    /// settings and locate the content root next to it.
    pub fn discover(start_dir: &Path) -> Result<Self> {
        let manifest = locate::find_manifest(start_dir).with_context(|| {
            format!(
                "no {} found within {} levels of {}",
                locate::MANIFEST_FILE,
                locate::MAX_DEPTH,
                start_dir.display()
            )
        })?;

        let project = ProjectConfig::load(&manifest)?;
        print_feedback(&project.feedback);

        if project.languages.is_empty() {
            bail!(
                "no \"wordpress-languages\" in the extra section of {}",
                manifest.display()
            );
        }

        let project_dir = manifest.parent().unwrap_or(start_dir);
        let content_root = locate::find_content_root(project_dir, project.content_dir.as_deref())
            .with_context(|| {
                format!(
                    "failed to locate the WordPress content directory from {}; \
                     set \"wordpress-content-dir\" in the extra section",
                    project_dir.display()
                )
            })?;

        Ok(Self {
            config: SyncConfig::new(project.languages, content_root),
            manifest,
        })
    }
}

/// `start_dir` if given, otherwise the current directory.
pub fn start_dir(start_dir: Option<PathBuf>) -> Result<PathBuf> {
    match start_dir {
        Some(dir) => Ok(dir),
        None => std::env::current_dir().context("could not determine current directory"),
    }
}
