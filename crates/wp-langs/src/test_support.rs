use std::collections::HashMap;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::{
    ArchiveFetcher, Catalog, ComponentDescriptor, LocalArchive, SyncError, TranslationDescriptor,
};

/// Build a zip archive in memory. Each entry is (member name, content).
pub fn zip_bytes(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options =
        zip::write::FileOptions::default().compression_method(zip::CompressionMethod::Stored);

    for (name, content) in entries {
        writer.start_file(*name, options).unwrap();
        writer.write_all(content).unwrap();
    }

    writer.finish().unwrap().into_inner()
}

/// Write a zip archive to `path`.
pub fn write_zip(path: &Path, entries: &[(&str, &[u8])]) {
    std::fs::write(path, zip_bytes(entries)).unwrap();
}

/// What an [`InMemoryCatalog`] answers with.
enum CatalogReply {
    Translations(Vec<TranslationDescriptor>),
    Empty,
    Unavailable(String),
}

/// Catalog double that answers every component the same way and counts
/// calls.
pub struct InMemoryCatalog {
    reply: CatalogReply,
    calls: AtomicUsize,
    requested: Mutex<Vec<ComponentDescriptor>>,
}

impl InMemoryCatalog {
    pub fn new(translations: Vec<TranslationDescriptor>) -> Self {
        Self::with_reply(CatalogReply::Translations(translations))
    }

    /// Listing succeeds but contains no translations.
    pub fn empty() -> Self {
        Self::with_reply(CatalogReply::Empty)
    }

    /// Listing fails as if upstream were down.
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::with_reply(CatalogReply::Unavailable(reason.into()))
    }

    fn with_reply(reply: CatalogReply) -> Self {
        Self {
            reply,
            calls: AtomicUsize::new(0),
            requested: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requested(&self) -> Vec<ComponentDescriptor> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl Catalog for InMemoryCatalog {
    async fn list_translations(
        &self,
        component: &ComponentDescriptor,
    ) -> Result<Vec<TranslationDescriptor>, SyncError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requested.lock().unwrap().push(component.clone());

        match &self.reply {
            CatalogReply::Translations(list) if !list.is_empty() => Ok(list.clone()),
            CatalogReply::Translations(_) | CatalogReply::Empty => {
                Err(SyncError::NoTranslationsFound {
                    component: component.to_string(),
                })
            }
            CatalogReply::Unavailable(reason) => {
                Err(SyncError::UpstreamUnavailable(reason.clone()))
            }
        }
    }
}

/// Fetcher double serving archives from memory. Each fetch writes the bytes
/// to a fresh file under the staging directory. URLs without a registered
/// archive fail with [`SyncError::DownloadFailed`].
pub struct InMemoryFetcher {
    staging: PathBuf,
    archives: Mutex<HashMap<String, Vec<u8>>>,
    calls: AtomicUsize,
}

impl InMemoryFetcher {
    pub fn new(staging: impl Into<PathBuf>) -> Self {
        Self {
            staging: staging.into(),
            archives: Mutex::new(HashMap::new()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Serve `bytes` for `url`, replacing any earlier registration.
    pub fn add(&self, url: impl Into<String>, bytes: Vec<u8>) {
        self.archives.lock().unwrap().insert(url.into(), bytes);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl ArchiveFetcher for InMemoryFetcher {
    async fn fetch(&self, url: &str) -> Result<LocalArchive, SyncError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);

        let bytes = self
            .archives
            .lock()
            .unwrap()
            .get(url)
            .cloned()
            .ok_or_else(|| SyncError::DownloadFailed {
                url: url.to_owned(),
                reason: "HTTP 404 Not Found".into(),
            })?;

        std::fs::create_dir_all(&self.staging).unwrap();
        let path = self.staging.join(format!("{n}-{}", crate::fetch::url_basename(url)));
        std::fs::write(&path, bytes).unwrap();
        Ok(LocalArchive::new(path))
    }
}
