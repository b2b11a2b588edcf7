//! Filesystem mutations applied to the destination tree

use std::fs::{self, File};
use std::io;
use std::path::Path;

use anyhow::Context;

use crate::error::Result;
use crate::scanner::EntryKind;

/// Prefix of in-flight copy files
///
/// Fixed length, so the temp name fits wherever the destination name does.
pub const TEMP_PREFIX: &str = ".dirsync-";

/// Suffix of in-flight copy files; a leftover one is removed on the next pass
pub const TEMP_SUFFIX: &str = ".dirsync-tmp";

/// Applies destination mutations, or only pretends to in dry-run mode
#[derive(Debug, Clone, Copy)]
pub struct FileOperationExecutor {
    dry_run: bool,
}

impl FileOperationExecutor {
    /// Create a new executor
    #[must_use]
    pub const fn new(dry_run: bool) -> Self {
        Self { dry_run }
    }

    /// Whether mutations are suppressed
    #[must_use]
    pub const fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Create a directory along with any missing parents
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn create_dir(&self, dest: &Path) -> Result<()> {
        if self.dry_run {
            return Ok(());
        }

        fs::create_dir_all(dest)
            .with_context(|| format!("Failed to create directory: {}", dest.display()))
    }

    /// Remove a destination entry; directories are removed with their contents
    ///
    /// `kind` must come from a listing that did not follow links, so a link
    /// to a directory is unlinked instead of emptied.
    ///
    /// # Errors
    ///
    /// Returns an error if the entry cannot be removed.
    pub fn remove(&self, dest: &Path, kind: EntryKind) -> Result<()> {
        if self.dry_run {
            return Ok(());
        }

        match kind {
            EntryKind::Directory => fs::remove_dir_all(dest)
                .with_context(|| format!("Failed to remove directory: {}", dest.display())),
            EntryKind::File | EntryKind::Other => fs::remove_file(dest)
                .with_context(|| format!("Failed to remove file: {}", dest.display())),
        }
    }

    /// Copy a file, preserving permission bits and modification time
    ///
    /// Content is written to a temporary file next to `dest` and renamed over
    /// it, so a read-only or half-written destination never blocks an update.
    ///
    /// # Errors
    ///
    /// Returns an error if reading the source or writing the destination fails.
    pub fn copy_file(&self, source: &Path, dest: &Path) -> Result<()> {
        if self.dry_run {
            return Ok(());
        }

        let parent = dest
            .parent()
            .with_context(|| format!("Destination has no parent: {}", dest.display()))?;
        let mut reader = File::open(source)
            .with_context(|| format!("Failed to open source file: {}", source.display()))?;
        let metadata = reader
            .metadata()
            .with_context(|| format!("Failed to read metadata for: {}", source.display()))?;
        let modified = metadata
            .modified()
            .with_context(|| format!("Failed to get modification time for: {}", source.display()))?;

        let mut temp = tempfile::Builder::new()
            .prefix(TEMP_PREFIX)
            .suffix(TEMP_SUFFIX)
            .tempfile_in(parent)
            .with_context(|| format!("Failed to create temporary file in: {}", parent.display()))?;

        io::copy(&mut reader, temp.as_file_mut()).with_context(|| {
            format!("Failed to copy {} to {}", source.display(), dest.display())
        })?;

        let file = temp.as_file();
        file.set_permissions(metadata.permissions())
            .with_context(|| format!("Failed to set permissions on: {}", dest.display()))?;
        file.set_modified(modified)
            .with_context(|| format!("Failed to set modification time on: {}", dest.display()))?;

        temp.persist(dest)
            .map_err(|e| e.error)
            .with_context(|| format!("Failed to move copy into place: {}", dest.display()))?;

        Ok(())
    }
}
