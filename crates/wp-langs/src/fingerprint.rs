//! Content fingerprints used to decide whether an install changed anything.

use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

use crate::error::SyncError;

const BUFFER_SIZE: usize = 64 * 1024;

/// SHA-256 fingerprint of one file or a set of files.
///
/// A missing file fingerprints as [`Fingerprint::Missing`], which never
/// equals the digest of a real file, so "newly installed" and "content
/// changed" are detected the same way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fingerprint {
    Missing,
    Digest([u8; 32]),
}

impl Fingerprint {
    /// Fingerprint a single file.
    pub fn of_file(path: &Path) -> Result<Self, SyncError> {
        match digest_file(path)? {
            Some(digest) => Ok(Self::Digest(digest)),
            None => Ok(Self::Missing),
        }
    }

    /// Fingerprint a set of files under `root`. Names are sorted first, so
    /// the order they are given in does not matter. Missing files contribute
    /// a marker rather than being skipped. All files missing yields
    /// [`Fingerprint::Missing`].
    pub fn of_files<P: AsRef<Path>>(root: &Path, names: &[P]) -> Result<Self, SyncError> {
        let mut sorted: Vec<PathBuf> = names.iter().map(|n| n.as_ref().to_path_buf()).collect();
        sorted.sort();
        sorted.dedup();

        let mut hasher = Sha256::new();
        let mut any_present = false;

        for name in &sorted {
            hasher.update(name.to_string_lossy().as_bytes());
            hasher.update([0u8]);
            match digest_file(&root.join(name))? {
                Some(digest) => {
                    any_present = true;
                    hasher.update([1u8]);
                    hasher.update(digest);
                }
                None => hasher.update([0u8]),
            }
        }

        if !any_present {
            return Ok(Self::Missing);
        }
        Ok(Self::Digest(hasher.finalize().into()))
    }

    /// Fingerprint raw bytes, as a file with that content would be.
    pub fn of_bytes(bytes: &[u8]) -> Self {
        Self::Digest(Sha256::digest(bytes).into())
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    /// Lowercase hex digest, or `missing`.
    pub fn to_hex(&self) -> String {
        match self {
            Self::Missing => "missing".to_owned(),
            Self::Digest(bytes) => bytes.iter().map(|b| format!("{b:02x}")).collect(),
        }
    }
}

fn digest_file(path: &Path) -> Result<Option<[u8; 32]>, SyncError> {
    let mut file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(SyncError::Fingerprint {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let mut hasher = Sha256::new();
    let mut buffer = vec![0u8; BUFFER_SIZE];

    loop {
        let bytes_read = file.read(&mut buffer).map_err(|source| SyncError::Fingerprint {
            path: path.to_path_buf(),
            source,
        })?;

        if bytes_read == 0 {
            break;
        }

        hasher.update(&buffer[..bytes_read]);
    }

    Ok(Some(hasher.finalize().into()))
}
