use anyhow::{Result, bail};
use wp_langs::{ComponentDescriptor, ComponentKind, SyncConfig, SyncError, Synchronizer};

use super::report;

/// Build the component named on the command line. Plugins and themes need a
/// slug; core never carries one.
pub fn component(
    kind: ComponentKind,
    slug: Option<String>,
    version: String,
) -> Result<ComponentDescriptor> {
    if kind == ComponentKind::Core {
        return Ok(ComponentDescriptor::core(version));
    }

    match slug.map(|s| s.trim().to_owned()) {
        Some(slug) if !slug.is_empty() => Ok(ComponentDescriptor {
            kind,
            slug,
            version,
        }),
        _ => bail!("--slug is required for a {kind}"),
    }
}

/// Sync one explicitly described component. Only an invalid configuration is
/// an error; every other failure is printed as a warning.
pub async fn run(
    sync: &Synchronizer,
    component: &ComponentDescriptor,
    config: &SyncConfig,
) -> Result<()> {
    match sync.sync_all(component, config).await {
        Err(SyncError::InvalidConfig(reason)) => {
            bail!("invalid configuration for {component}: {reason}")
        }
        outcome => {
            report(component, outcome);
            Ok(())
        }
    }
}
