use serde::Deserialize;
use tracing::debug;
use wp_langs::{Catalog, ComponentDescriptor, ComponentKind, SyncError, TranslationDescriptor};

use crate::http::{ClientError, HttpSettings};

/// Client for the translation API:
/// `GET {base}/translations/{plugins|themes|core}/1.0/?slug=..&version=..`
pub struct TranslationApi {
    client: reqwest::Client,
    settings: HttpSettings,
}

impl TranslationApi {
    pub fn new(settings: HttpSettings) -> Result<Self, ClientError> {
        Ok(Self {
            client: settings.build_client()?,
            settings,
        })
    }

    fn endpoint(&self, kind: ComponentKind) -> String {
        format!(
            "{}/translations/{}/1.0/",
            self.settings.api_base(),
            kind.api_segment()
        )
    }

    fn request_url(&self, component: &ComponentDescriptor) -> Result<reqwest::Url, SyncError> {
        let endpoint = self.endpoint(component.kind);
        let mut url = reqwest::Url::parse(&endpoint).map_err(|e| {
            SyncError::UpstreamUnavailable(format!("invalid API URL {endpoint}: {e}"))
        })?;

        let params = query_params(component);
        if !params.is_empty() {
            url.query_pairs_mut().extend_pairs(params);
        }

        Ok(url)
    }
}

/// `version` when set; `slug` when set and the component is not core.
fn query_params(component: &ComponentDescriptor) -> Vec<(&'static str, &str)> {
    let mut params = Vec::new();

    if !component.version.is_empty() {
        params.push(("version", component.version.as_str()));
    }

    if !component.slug.is_empty() && component.kind != ComponentKind::Core {
        params.push(("slug", component.slug.as_str()));
    }

    params
}

#[derive(Debug, Deserialize)]
struct CatalogResponse {
    #[serde(default)]
    translations: Vec<TranslationDescriptor>,
}

#[async_trait::async_trait]
impl Catalog for TranslationApi {
    async fn list_translations(
        &self,
        component: &ComponentDescriptor,
    ) -> Result<Vec<TranslationDescriptor>, SyncError> {
        let url = self.request_url(component)?;
        debug!(%url, "listing translations");

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| SyncError::UpstreamUnavailable(format!("request to {url} failed: {e}")))?;

        if !response.status().is_success() {
            return Err(SyncError::UpstreamUnavailable(format!(
                "{url} returned HTTP {}",
                response.status()
            )));
        }

        let body: CatalogResponse = response.json().await.map_err(|e| {
            SyncError::UpstreamUnavailable(format!("malformed response from {url}: {e}"))
        })?;

        if body.translations.is_empty() {
            return Err(SyncError::NoTranslationsFound {
                component: component.to_string(),
            });
        }

        debug!(count = body.translations.len(), "translations listed");
        Ok(body.translations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plugin_query_has_version_and_slug() {
        let plugin = ComponentDescriptor::plugin("redirection", "2.8.1");
        assert_eq!(
            query_params(&plugin),
            vec![("version", "2.8.1"), ("slug", "redirection")]
        );
    }

    #[test]
    fn core_query_never_has_slug() {
        let mut core = ComponentDescriptor::core("4.8.2");
        core.slug = "wordpress-core".into();
        assert_eq!(query_params(&core), vec![("version", "4.8.2")]);
    }

    #[test]
    fn empty_fields_are_omitted() {
        let theme = ComponentDescriptor::theme("", "");
        assert!(query_params(&theme).is_empty());
    }

    #[test]
    fn url_without_params_has_no_query() {
        let api = TranslationApi::new(HttpSettings::default()).unwrap();
        let url = api.request_url(&ComponentDescriptor::core("")).unwrap();
        assert_eq!(url.as_str(), "https://api.wordpress.org/translations/core/1.0/");
    }
}
