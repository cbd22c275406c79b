use std::path::Path;

use anyhow::Result;
use wp_langs::Synchronizer;

use super::{Project, sync_component};
use crate::composer::component_for;

/// Hook entry for one installed or updated package. Never fails: problems
/// are printed as warnings so the package manager keeps going.
pub async fn run(
    sync: &Synchronizer,
    start_dir: &Path,
    name: &str,
    package_type: &str,
    version: &str,
) -> Result<()> {
    let Some(component) = component_for(name, package_type, version) else {
        println!("Skipping {name}: not a WordPress plugin, theme or core package");
        return Ok(());
    };

    let project = match Project::discover(start_dir) {
        Ok(project) => project,
        Err(e) => {
            eprintln!("warning: {component}: {e:#}");
            return Ok(());
        }
    };

    sync_component(sync, &component, &project.config).await;
    Ok(())
}
