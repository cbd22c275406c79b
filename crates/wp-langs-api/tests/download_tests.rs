use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};
use wp_langs::test_support::zip_bytes;
use wp_langs::{ArchiveFetcher, ArchiveInstaller, SyncError};
use wp_langs_api::{HttpSettings, PackageDownloader};

fn downloader(staging: &std::path::Path) -> PackageDownloader {
    PackageDownloader::new(&HttpSettings {
        staging_dir: Some(staging.to_path_buf()),
        ..HttpSettings::default()
    })
    .unwrap()
}

#[tokio::test]
async fn downloads_package_to_staging_dir() {
    let server = MockServer::start().await;
    let archive = zip_bytes(&[("akismet-sv_SE.mo", b"mo".as_slice())]);

    Mock::given(method("GET"))
        .and(path("/translation/plugin/akismet/4.0/sv_SE.zip"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(archive.clone(), "application/zip"))
        .mount(&server)
        .await;

    let tmp = tempfile::tempdir().unwrap();
    let staging = tmp.path().join("staging");
    let url = format!("{}/translation/plugin/akismet/4.0/sv_SE.zip", server.uri());

    let fetcher = downloader(&staging);
    assert_eq!(fetcher.staging_dir(), staging);

    let local = fetcher.fetch(&url).await.unwrap();

    assert!(local.path().starts_with(fetcher.staging_dir()));
    assert!(local.path().to_string_lossy().ends_with("sv_SE.zip"));
    assert_eq!(std::fs::read(local.path()).unwrap(), archive);

    let members = ArchiveInstaller::new().members(&local).unwrap();
    assert_eq!(members.len(), 1);
}

#[tokio::test]
async fn same_base_name_from_different_packages_does_not_collide() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/translation/plugin/akismet/4.0/sv_SE.zip"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("akismet", "application/zip"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/translation/plugin/redirection/2.8.1/sv_SE.zip"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("redirection", "application/zip"))
        .mount(&server)
        .await;

    let tmp = tempfile::tempdir().unwrap();
    let d = downloader(tmp.path());

    let a = d
        .fetch(&format!("{}/translation/plugin/akismet/4.0/sv_SE.zip", server.uri()))
        .await
        .unwrap();
    let b = d
        .fetch(&format!(
            "{}/translation/plugin/redirection/2.8.1/sv_SE.zip",
            server.uri()
        ))
        .await
        .unwrap();

    assert_ne!(a.path(), b.path());
    assert_eq!(std::fs::read_to_string(a.path()).unwrap(), "akismet");
    assert_eq!(std::fs::read_to_string(b.path()).unwrap(), "redirection");
}

#[tokio::test]
async fn not_found_is_download_failed() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/translation/plugin/akismet/4.0/xx_YY.zip"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let tmp = tempfile::tempdir().unwrap();
    let result = downloader(tmp.path())
        .fetch(&format!("{}/translation/plugin/akismet/4.0/xx_YY.zip", server.uri()))
        .await;

    match result {
        Err(SyncError::DownloadFailed { reason, .. }) => assert!(reason.contains("404")),
        other => panic!("expected DownloadFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn network_error_is_download_failed() {
    let tmp = tempfile::tempdir().unwrap();
    let result = downloader(tmp.path())
        .fetch("http://127.0.0.1:1/translation/core/4.8.2/sv_SE.zip")
        .await;
    assert!(matches!(result, Err(SyncError::DownloadFailed { .. })));
}
