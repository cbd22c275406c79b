use std::time::Duration;

use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};
use wp_langs::{Catalog, ComponentDescriptor, SyncError};
use wp_langs_api::{HttpSettings, TranslationApi};

fn api_for(server: &MockServer) -> TranslationApi {
    TranslationApi::new(HttpSettings {
        api_base_url: Some(server.uri()),
        ..HttpSettings::default()
    })
    .unwrap()
}

fn fixture(raw: &str, server: &MockServer) -> String {
    raw.replace("{{BASE}}", &server.uri())
}

#[tokio::test]
async fn lists_plugin_translations() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/translations/plugins/1.0/"))
        .and(query_param("slug", "redirection"))
        .and(query_param("version", "2.8.1"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            fixture(include_str!("fixtures/plugin_translations.json"), &server),
            "application/json",
        ))
        .expect(1)
        .mount(&server)
        .await;

    let api = api_for(&server);
    let translations = api
        .list_translations(&ComponentDescriptor::plugin("redirection", "2.8.1"))
        .await
        .unwrap();

    assert_eq!(translations.len(), 2);
    assert_eq!(translations[1].language.as_str(), "sv_SE");
    assert_eq!(
        translations[1].package_url,
        format!("{}/translation/plugin/redirection/2.8.1/sv_SE.zip", server.uri())
    );
    assert_eq!(translations[1].updated(), Some("2017-09-22 10:31:48"));
}

#[tokio::test]
async fn theme_uses_themes_endpoint() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/translations/themes/1.0/"))
        .and(query_param("slug", "twentytwelve"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            fixture(include_str!("fixtures/plugin_translations.json"), &server),
            "application/json",
        ))
        .expect(1)
        .mount(&server)
        .await;

    let api = api_for(&server);
    let translations = api
        .list_translations(&ComponentDescriptor::theme("twentytwelve", "2.2.0.0"))
        .await
        .unwrap();
    assert!(!translations.is_empty());
}

#[tokio::test]
async fn core_query_omits_slug() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/translations/core/1.0/"))
        .and(query_param("version", "4.8.2"))
        .and(query_param_is_missing("slug"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            fixture(include_str!("fixtures/core_translations.json"), &server),
            "application/json",
        ))
        .expect(1)
        .mount(&server)
        .await;

    let mut core = ComponentDescriptor::core("4.8.2");
    core.slug = "wordpress-core".into();

    let translations = api_for(&server).list_translations(&core).await.unwrap();
    assert_eq!(translations.len(), 1);
    assert_eq!(translations[0].language.as_str(), "sv_SE");
}

#[tokio::test]
async fn empty_listing_is_no_translations_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/translations/plugins/1.0/"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            include_str!("fixtures/empty_translations.json"),
            "application/json",
        ))
        .mount(&server)
        .await;

    let result = api_for(&server)
        .list_translations(&ComponentDescriptor::plugin("tiny-plugin", "1.0"))
        .await;

    match result {
        Err(e @ SyncError::NoTranslationsFound { .. }) => assert!(e.is_soft()),
        other => panic!("expected NoTranslationsFound, got {other:?}"),
    }
}

#[tokio::test]
async fn missing_translations_key_is_no_translations_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/translations/plugins/1.0/"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("{}", "application/json"))
        .mount(&server)
        .await;

    let result = api_for(&server)
        .list_translations(&ComponentDescriptor::plugin("tiny-plugin", "1.0"))
        .await;
    assert!(matches!(result, Err(SyncError::NoTranslationsFound { .. })));
}

#[tokio::test]
async fn server_error_is_upstream_unavailable() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/translations/plugins/1.0/"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let result = api_for(&server)
        .list_translations(&ComponentDescriptor::plugin("redirection", "2.8.1"))
        .await;

    match result {
        Err(SyncError::UpstreamUnavailable(reason)) => assert!(reason.contains("503")),
        other => panic!("expected UpstreamUnavailable, got {other:?}"),
    }
}

#[tokio::test]
async fn malformed_body_is_upstream_unavailable() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/translations/plugins/1.0/"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("<html>", "text/html"))
        .mount(&server)
        .await;

    let result = api_for(&server)
        .list_translations(&ComponentDescriptor::plugin("redirection", "2.8.1"))
        .await;
    assert!(matches!(result, Err(SyncError::UpstreamUnavailable(_))));
}

#[tokio::test]
async fn unreachable_host_is_upstream_unavailable() {
    let api = TranslationApi::new(HttpSettings {
        api_base_url: Some("http://127.0.0.1:1".into()),
        ..HttpSettings::default()
    })
    .unwrap();

    let result = api
        .list_translations(&ComponentDescriptor::plugin("redirection", "2.8.1"))
        .await;
    assert!(matches!(result, Err(SyncError::UpstreamUnavailable(_))));
}

#[tokio::test]
async fn slow_server_hits_timeout() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/translations/plugins/1.0/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw("{\"translations\": []}", "application/json")
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let api = TranslationApi::new(HttpSettings {
        api_base_url: Some(server.uri()),
        timeout: Duration::from_millis(200),
        ..HttpSettings::default()
    })
    .unwrap();

    let result = api
        .list_translations(&ComponentDescriptor::plugin("redirection", "2.8.1"))
        .await;
    assert!(matches!(result, Err(SyncError::UpstreamUnavailable(_))));
}
