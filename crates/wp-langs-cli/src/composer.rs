use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use wp_langs::{ComponentDescriptor, Feedback};

const PLUGIN_VENDOR: &str = "wpackagist-plugin/";
const THEME_VENDOR: &str = "wpackagist-theme/";
const CORE_PACKAGE: &str = "johnpbloch/wordpress";

/// Translation settings read from the manifest's `extra` section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectConfig {
    pub languages: Vec<String>,
    /// Content directory name (or relative path) to try before the stock
    /// names.
    pub content_dir: Option<String>,
    pub feedback: Vec<Feedback>,
}

#[derive(Debug, Default, Deserialize)]
struct Manifest {
    #[serde(default)]
    extra: Extra,
}

#[derive(Debug, Default, Deserialize)]
struct Extra {
    #[serde(rename = "wordpress-languages", default)]
    languages: Vec<String>,
    #[serde(rename = "wordpress-content-dir", default)]
    content_dir: Option<String>,
    #[serde(rename = "wordpress-path-to-content-dir", default)]
    legacy_content_dir: Option<String>,
}

impl ProjectConfig {
    pub fn parse(manifest: &str) -> Result<Self> {
        let manifest: Manifest =
            serde_json::from_str(manifest).context("manifest is not valid JSON")?;
        let extra = manifest.extra;
        let mut feedback = Vec::new();

        let content_dir = match (
            non_empty(extra.content_dir),
            non_empty(extra.legacy_content_dir),
        ) {
            (Some(dir), _) => Some(dir),
            (None, Some(dir)) => {
                feedback.push(Feedback::warning(
                    "the \"wordpress-path-to-content-dir\" option is deprecated, \
                     rename it to \"wordpress-content-dir\"",
                ));
                Some(dir)
            }
            (None, None) => None,
        };

        Ok(Self {
            languages: extra.languages,
            content_dir,
            feedback,
        })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::parse(&contents).with_context(|| format!("failed to parse {}", path.display()))
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// A package entry from the lock file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LockedPackage {
    pub name: String,
    #[serde(rename = "type", default)]
    pub package_type: String,
    #[serde(default)]
    pub version: String,
}

#[derive(Debug, Deserialize)]
struct LockFile {
    #[serde(default)]
    packages: Vec<LockedPackage>,
    #[serde(rename = "packages-dev", default)]
    packages_dev: Vec<LockedPackage>,
}

pub fn parse_lock(contents: &str) -> Result<Vec<LockedPackage>> {
    let lock: LockFile = serde_json::from_str(contents).context("lock file is not valid JSON")?;
    Ok(lock.packages.into_iter().chain(lock.packages_dev).collect())
}

pub fn load_lock(path: &Path) -> Result<Vec<LockedPackage>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    parse_lock(&contents).with_context(|| format!("failed to parse {}", path.display()))
}

/// Map a package-manager package to a translatable component. `None` for
/// packages that are not WordPress plugins, themes or core.
pub fn component_for(name: &str, package_type: &str, version: &str) -> Option<ComponentDescriptor> {
    match package_type {
        "wordpress-plugin" => Some(ComponentDescriptor::plugin(
            name.replace(PLUGIN_VENDOR, ""),
            version,
        )),
        "wordpress-theme" => Some(ComponentDescriptor::theme(
            name.replace(THEME_VENDOR, ""),
            version,
        )),
        "package" if name == CORE_PACKAGE => Some(ComponentDescriptor::core(version)),
        _ => None,
    }
}
