pub mod catalog;
pub mod component;
pub mod config;
pub mod error;
pub mod feedback;
pub mod fetch;
pub mod fingerprint;
pub mod install;
pub mod sync;

pub use catalog::{Catalog, TranslationDescriptor};
pub use component::{ComponentDescriptor, ComponentKind, LanguageCode};
pub use config::SyncConfig;
pub use error::SyncError;
pub use feedback::Feedback;
pub use fetch::{ArchiveFetcher, LocalArchive};
pub use fingerprint::Fingerprint;
pub use install::{ArchiveInstaller, catalog_file_names, destination_dir};
pub use sync::{SyncResult, Synchronizer};

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
