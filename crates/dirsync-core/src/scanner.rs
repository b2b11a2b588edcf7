//! Single-level directory listing
//!
//! The reconciler works one directory level at a time, so listings here are
//! never recursive. Names are kept sorted to make passes deterministic.

use std::collections::BTreeMap;
use std::ffi::{OsStr, OsString};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use anyhow::Context;

use crate::error::Result;

/// Kind tag of a directory entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Regular file
    File,
    /// Directory
    Directory,
    /// Anything else the host reports (sockets, FIFOs, unresolvable links)
    Other,
}

impl EntryKind {
    fn from_file_type(file_type: fs::FileType) -> Self {
        if file_type.is_dir() {
            Self::Directory
        } else if file_type.is_file() {
            Self::File
        } else {
            Self::Other
        }
    }
}

/// A name within a directory plus its kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    /// File name (single path component)
    pub name: OsString,
    /// Entry kind
    pub kind: EntryKind,
}

/// How symbolic links are classified while listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkMode {
    /// Classify a link by its target (source side)
    Follow,
    /// Classify a link as the link itself (destination side), so removal
    /// never descends into a link target
    NoFollow,
}

/// Sorted listing of one directory level
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryListing {
    entries: BTreeMap<OsString, EntryKind>,
}

impl DirectoryListing {
    /// List a directory
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be read.
    pub fn read(dir: &Path, links: LinkMode) -> Result<Self> {
        let mut entries = BTreeMap::new();

        for entry in fs::read_dir(dir)
            .with_context(|| format!("Failed to read directory: {}", dir.display()))?
        {
            let entry =
                entry.with_context(|| format!("Failed to read entry in: {}", dir.display()))?;

            let kind = match links {
                LinkMode::NoFollow => entry
                    .file_type()
                    .map_or(EntryKind::Other, EntryKind::from_file_type),
                LinkMode::Follow => fs::metadata(entry.path())
                    .map_or(EntryKind::Other, |m| EntryKind::from_file_type(m.file_type())),
            };

            entries.insert(entry.file_name(), kind);
        }

        Ok(Self { entries })
    }

    /// List a directory, treating a missing directory as empty
    ///
    /// # Errors
    ///
    /// Returns an error if the directory exists but cannot be read.
    pub fn read_or_empty(dir: &Path, links: LinkMode) -> Result<Self> {
        match fs::symlink_metadata(dir) {
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Self::default()),
            _ => Self::read(dir, links),
        }
    }

    /// Kind of the entry with the given name, if present
    #[must_use]
    pub fn kind(&self, name: &OsStr) -> Option<EntryKind> {
        self.entries.get(name).copied()
    }

    /// Whether an entry with the given name exists
    #[must_use]
    pub fn contains(&self, name: &OsStr) -> bool {
        self.entries.contains_key(name)
    }

    /// Entries in name order
    pub fn entries(&self) -> impl Iterator<Item = DirectoryEntry> + '_ {
        self.entries.iter().map(|(name, kind)| DirectoryEntry {
            name: name.clone(),
            kind: *kind,
        })
    }

    /// Entries present here but absent from `other`, in name order
    pub fn difference<'a>(
        &'a self,
        other: &'a Self,
    ) -> impl Iterator<Item = DirectoryEntry> + 'a {
        self.entries().filter(|entry| !other.contains(&entry.name))
    }

    /// Number of entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the listing is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
