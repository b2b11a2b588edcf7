//! Per-file fingerprints: size, modification time and content hash

use std::fs;
use std::path::Path;
use std::time::SystemTime;

use anyhow::Context;

use super::hash::{FileHash, FileHasher};
use crate::error::Result;

/// Cheap metadata half of a fingerprint, read without touching file contents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileStamp {
    /// Size in bytes
    pub size: u64,
    /// Last modification time
    pub modified: SystemTime,
}

impl FileStamp {
    /// Read size and modification time of a file
    ///
    /// # Errors
    ///
    /// Returns an error if metadata cannot be read or the platform does not
    /// report modification times.
    pub fn read(path: &Path) -> Result<Self> {
        let metadata = fs::metadata(path)
            .with_context(|| format!("Failed to read metadata for: {}", path.display()))?;

        let modified = metadata
            .modified()
            .with_context(|| format!("Failed to get modification time for: {}", path.display()))?;

        Ok(Self {
            size: metadata.len(),
            modified,
        })
    }
}

/// Full fingerprint used to decide whether two files are equivalent
///
/// Never persisted; recomputed on every pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncFingerprint {
    /// Size and modification time
    pub stamp: FileStamp,
    /// SHA-256 of the contents
    pub hash: FileHash,
}

impl SyncFingerprint {
    /// Add the content hash to an already-read stamp
    ///
    /// # Errors
    ///
    /// Returns an error if the contents cannot be read.
    pub fn complete(stamp: FileStamp, path: &Path) -> Result<Self> {
        let hash = FileHasher::hash(path)?;
        Ok(Self { stamp, hash })
    }
}
