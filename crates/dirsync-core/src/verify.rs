//! Read-only check that a destination tree mirrors its source

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::Context;
use walkdir::WalkDir;

use crate::comparison::FileHasher;
use crate::config::PatternMatcher;
use crate::error::Result;
use crate::scanner::EntryKind;

/// A difference between source and destination, by relative path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Divergence {
    /// Present in the source only
    MissingInDestination(PathBuf),
    /// Present in the destination only
    ExtraInDestination(PathBuf),
    /// Present in both with different kinds
    KindMismatch(PathBuf),
    /// Files whose content hashes differ
    ContentMismatch(PathBuf),
}

impl fmt::Display for Divergence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingInDestination(p) => write!(f, "missing in destination: {}", p.display()),
            Self::ExtraInDestination(p) => write!(f, "extra in destination: {}", p.display()),
            Self::KindMismatch(p) => write!(f, "kind mismatch: {}", p.display()),
            Self::ContentMismatch(p) => write!(f, "content mismatch: {}", p.display()),
        }
    }
}

/// Compare two trees without modifying either
///
/// Entries excluded by `filter` are ignored on both sides, as are source
/// entries that are neither files nor directories. Extra destination
/// directories are reported once, not per descendant.
///
/// # Errors
///
/// Returns an error if either tree cannot be walked or a file cannot be hashed.
pub fn verify_mirror(
    source: &Path,
    dest: &Path,
    filter: &PatternMatcher,
) -> Result<Vec<Divergence>> {
    let source_tree = collect_tree(source, filter, true)?;
    let dest_tree = if dest.exists() {
        collect_tree(dest, filter, false)?
    } else {
        BTreeMap::new()
    };

    let mut divergences = Vec::new();

    for (rel, kind) in &source_tree {
        match (kind, dest_tree.get(rel)) {
            (EntryKind::Other, _) => {}
            (_, None) => divergences.push(Divergence::MissingInDestination(rel.clone())),
            (expected, Some(actual)) if expected != actual => {
                divergences.push(Divergence::KindMismatch(rel.clone()));
            }
            (EntryKind::File, Some(_)) => {
                if FileHasher::hash(&source.join(rel))? != FileHasher::hash(&dest.join(rel))? {
                    divergences.push(Divergence::ContentMismatch(rel.clone()));
                }
            }
            _ => {}
        }
    }

    let mut last_extra: Option<&PathBuf> = None;
    for rel in dest_tree.keys() {
        if source_tree.contains_key(rel) || last_extra.is_some_and(|top| rel.starts_with(top)) {
            continue;
        }
        divergences.push(Divergence::ExtraInDestination(rel.clone()));
        last_extra = Some(rel);
    }

    Ok(divergences)
}

fn collect_tree(
    root: &Path,
    filter: &PatternMatcher,
    follow_links: bool,
) -> Result<BTreeMap<PathBuf, EntryKind>> {
    let mut tree = BTreeMap::new();

    let walker = WalkDir::new(root)
        .min_depth(1)
        .follow_links(follow_links)
        .into_iter()
        .filter_entry(|entry| {
            entry
                .path()
                .strip_prefix(root)
                .map_or(true, |rel| filter.should_include(rel, entry.file_type().is_dir()))
        });

    for entry in walker {
        let entry = entry.with_context(|| format!("Failed to walk: {}", root.display()))?;
        let rel = entry
            .path()
            .strip_prefix(root)
            .with_context(|| format!("Failed to strip prefix from {}", entry.path().display()))?
            .to_path_buf();

        let file_type = entry.file_type();
        let kind = if file_type.is_dir() {
            EntryKind::Directory
        } else if file_type.is_file() {
            EntryKind::File
        } else {
            EntryKind::Other
        };

        tree.insert(rel, kind);
    }

    Ok(tree)
}
