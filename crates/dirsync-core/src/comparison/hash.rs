//! Streaming SHA-256 content digests

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use anyhow::Context;
use sha2::{Digest, Sha256};

use crate::error::Result;

/// Read buffer size when streaming file contents into the digest
pub const HASH_CHUNK_SIZE: usize = 8192;

/// SHA-256 digest of a file's bytes
pub type FileHash = [u8; 32];

/// Content digests for change detection
pub struct FileHasher;

impl FileHasher {
    /// Digest a file without loading it into memory
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or read.
    pub fn hash(path: &Path) -> Result<FileHash> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open file for hashing: {}", path.display()))?;

        Self::hash_reader(BufReader::with_capacity(HASH_CHUNK_SIZE, file))
            .with_context(|| format!("Failed to read file: {}", path.display()))
    }

    /// Digest everything `reader` yields
    ///
    /// # Errors
    ///
    /// Returns an error if reading fails part-way.
    pub fn hash_reader(mut reader: impl Read) -> Result<FileHash> {
        let mut digest = Sha256::new();
        io::copy(&mut reader, &mut digest)?;
        Ok(digest.finalize().into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_equal_bytes_equal_digest() {
        let tmp = TempDir::new().unwrap();
        let a = tmp.path().join("a.txt");
        fs::write(&a, "same content").unwrap();

        assert_eq!(
            FileHasher::hash(&a).unwrap(),
            FileHasher::hash_reader(&b"same content"[..]).unwrap()
        );
    }

    #[test]
    fn test_one_byte_difference() {
        assert_ne!(
            FileHasher::hash_reader(&b"content A"[..]).unwrap(),
            FileHasher::hash_reader(&b"content B"[..]).unwrap()
        );
    }

    #[test]
    fn test_difference_past_first_chunk() {
        let tmp = TempDir::new().unwrap();
        let first = tmp.path().join("first.bin");
        let second = tmp.path().join("second.bin");

        let mut content = vec![7u8; HASH_CHUNK_SIZE * 3 + 17];
        fs::write(&first, &content).unwrap();
        *content.last_mut().unwrap() = 8;
        fs::write(&second, &content).unwrap();

        assert_ne!(
            FileHasher::hash(&first).unwrap(),
            FileHasher::hash(&second).unwrap()
        );
    }

    #[test]
    fn test_empty_input_digest() {
        let digest = FileHasher::hash_reader(io::empty()).unwrap();
        assert_eq!(digest[..4], [0xe3, 0xb0, 0xc4, 0x42]);
    }

    #[test]
    fn test_missing_file() {
        let tmp = TempDir::new().unwrap();
        let err = FileHasher::hash(&tmp.path().join("missing.txt")).unwrap_err();
        assert!(err.to_string().contains("Failed to open file for hashing"));
    }
}
