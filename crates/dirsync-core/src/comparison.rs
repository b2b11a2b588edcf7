//! File fingerprinting and equivalence checks
//!
//! A destination file is considered equivalent to its source only when it
//! exists and its size, modification time and SHA-256 content hash all
//! match. Size and time are compared first so that obviously different
//! files are never hashed; the hash always has the final say before two
//! files are declared identical.

mod fingerprint;
mod hash;


use std::io::ErrorKind;
use std::path::Path;

pub use fingerprint::{FileStamp, SyncFingerprint};
pub use hash::{FileHash, FileHasher, HASH_CHUNK_SIZE};

use crate::error::Result;

/// Result of comparing a source file with its destination counterpart
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Equivalence {
    /// Size, modification time and content hash all match
    Identical,
    /// Destination file does not exist
    Missing,
    /// Destination exists but could not be read
    Unreadable,
    /// Byte sizes differ
    SizeDiffers,
    /// Modification times differ
    TimeDiffers,
    /// Metadata matches but the content hashes differ
    ContentDiffers,
}

impl Equivalence {
    /// Whether the destination can be left untouched
    #[must_use]
    pub const fn is_identical(self) -> bool {
        matches!(self, Self::Identical)
    }

    /// Short human-readable reason, used in diagnostics
    #[must_use]
    pub const fn describe(self) -> &'static str {
        match self {
            Self::Identical => "identical",
            Self::Missing => "missing at destination",
            Self::Unreadable => "destination unreadable",
            Self::SizeDiffers => "size differs",
            Self::TimeDiffers => "modification time differs",
            Self::ContentDiffers => "content differs",
        }
    }
}

/// Decides whether a destination file already mirrors its source
pub struct FileComparator;

impl FileComparator {
    /// Compare a source file with its destination counterpart
    ///
    /// # Errors
    ///
    /// Returns an error only when the *source* cannot be read. Problems with
    /// the destination side are folded into [`Equivalence::Unreadable`],
    /// since overwriting it is the remedy either way.
    pub fn compare(source: &Path, destination: &Path) -> Result<Equivalence> {
        let source_stamp = FileStamp::read(source)?;

        let dest_stamp = match FileStamp::read(destination) {
            Ok(stamp) => stamp,
            Err(e) => return Ok(Self::classify_dest_error(&e)),
        };

        if source_stamp.size != dest_stamp.size {
            return Ok(Equivalence::SizeDiffers);
        }
        if source_stamp.modified != dest_stamp.modified {
            return Ok(Equivalence::TimeDiffers);
        }

        let source_print = SyncFingerprint::complete(source_stamp, source)?;
        let Ok(dest_print) = SyncFingerprint::complete(dest_stamp, destination) else {
            return Ok(Equivalence::Unreadable);
        };

        if source_print == dest_print {
            Ok(Equivalence::Identical)
        } else {
            Ok(Equivalence::ContentDiffers)
        }
    }

    fn classify_dest_error(error: &anyhow::Error) -> Equivalence {
        let not_found = error
            .downcast_ref::<std::io::Error>()
            .is_some_and(|io| io.kind() == ErrorKind::NotFound);

        if not_found {
            Equivalence::Missing
        } else {
            Equivalence::Unreadable
        }
    }
}
