use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Deserialize;

use crate::component::{ComponentDescriptor, LanguageCode};
use crate::error::SyncError;

/// One published translation for a component, as listed by the catalog.
///
/// Only `language` and `package` are interpreted. Everything else upstream
/// sends (`version`, `updated`, `english_name`, ...) is kept in `metadata`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TranslationDescriptor {
    pub language: LanguageCode,
    #[serde(rename = "package")]
    pub package_url: String,
    #[serde(flatten)]
    pub metadata: BTreeMap<String, serde_json::Value>,
}

impl TranslationDescriptor {
    pub fn new(language: impl Into<LanguageCode>, package_url: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            package_url: package_url.into(),
            metadata: BTreeMap::new(),
        }
    }

    /// Upstream's `updated` timestamp, if present.
    pub fn updated(&self) -> Option<&str> {
        self.metadata.get("updated").and_then(|v| v.as_str())
    }
}

/// Lists translations published for a component.
#[async_trait::async_trait]
pub trait Catalog: Send + Sync {
    /// Return every translation upstream publishes for `component`.
    ///
    /// Fails with [`SyncError::NoTranslationsFound`] when the listing is
    /// valid but empty, and [`SyncError::UpstreamUnavailable`] when the
    /// listing could not be obtained.
    async fn list_translations(
        &self,
        component: &ComponentDescriptor,
    ) -> Result<Vec<TranslationDescriptor>, SyncError>;
}

#[async_trait::async_trait]
impl<T: Catalog + ?Sized> Catalog for Arc<T> {
    async fn list_translations(
        &self,
        component: &ComponentDescriptor,
    ) -> Result<Vec<TranslationDescriptor>, SyncError> {
        (**self).list_translations(component).await
    }
}

/// First descriptor whose language matches exactly.
pub fn find_translation<'a>(
    translations: &'a [TranslationDescriptor],
    language: &LanguageCode,
) -> Option<&'a TranslationDescriptor> {
    translations.iter().find(|t| &t.language == language)
}
