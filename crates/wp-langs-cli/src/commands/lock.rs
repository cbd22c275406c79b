use std::path::{Path, PathBuf};

use anyhow::Result;
use wp_langs::Synchronizer;

use super::{Project, sync_component};
use crate::composer::{component_for, load_lock};

/// Sync every WordPress package in the lock file, one after another.
///
/// The lock file defaults to `composer.lock` next to the manifest. A failing
/// component is reported and the run moves on to the next one.
pub async fn run(sync: &Synchronizer, start_dir: &Path, lockfile: Option<PathBuf>) -> Result<()> {
    let project = Project::discover(start_dir)?;

    let lockfile = lockfile.unwrap_or_else(|| project.manifest.with_file_name("composer.lock"));
    let components: Vec<_> = load_lock(&lockfile)?
        .iter()
        .filter_map(|p| component_for(&p.name, &p.package_type, &p.version))
        .collect();

    if components.is_empty() {
        println!("No WordPress packages in {}", lockfile.display());
        return Ok(());
    }

    for component in &components {
        sync_component(sync, component, &project.config).await;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use wp_langs::ComponentKind;
    use wp_langs::test_support::{InMemoryCatalog, InMemoryFetcher};

    use super::*;
    use crate::commands::tests::project_dir;

    fn write_lock(root: &Path) {
        std::fs::write(
            root.join("composer.lock"),
            r#"{
                "packages": [
                    {"name": "wpackagist-plugin/akismet", "type": "wordpress-plugin", "version": "4.0"},
                    {"name": "guzzlehttp/guzzle", "type": "library", "version": "6.3.0"},
                    {"name": "wpackagist-theme/twentytwelve", "type": "wordpress-theme", "version": "2.2.0.0"},
                    {"name": "johnpbloch/wordpress", "type": "package", "version": "4.8.2"}
                ]
            }"#,
        )
        .unwrap();
    }

    #[tokio::test]
    async fn syncs_every_wordpress_package_despite_failures() {
        let tmp = tempfile::tempdir().unwrap();
        project_dir(tmp.path(), &["sv_SE"]);
        write_lock(tmp.path());

        let catalog = Arc::new(InMemoryCatalog::unavailable("HTTP 503"));
        let sync = Synchronizer::new(
            catalog.clone(),
            Arc::new(InMemoryFetcher::new(tmp.path().join("staging"))),
        );

        run(&sync, tmp.path(), None).await.unwrap();

        let kinds: Vec<_> = catalog.requested().iter().map(|c| c.kind).collect();
        assert_eq!(
            kinds,
            vec![ComponentKind::Plugin, ComponentKind::Theme, ComponentKind::Core]
        );
    }

    #[tokio::test]
    async fn missing_lock_file_is_error() {
        let tmp = tempfile::tempdir().unwrap();
        project_dir(tmp.path(), &["sv_SE"]);

        let sync = Synchronizer::new(
            Arc::new(InMemoryCatalog::empty()),
            Arc::new(InMemoryFetcher::new(tmp.path().join("staging"))),
        );

        assert!(run(&sync, tmp.path(), None).await.is_err());
    }
}
