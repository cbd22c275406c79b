pub mod catalog;
pub mod download;
pub mod http;

pub use catalog::TranslationApi;
pub use download::PackageDownloader;
pub use http::{ClientError, DEFAULT_API_BASE, HttpSettings};
