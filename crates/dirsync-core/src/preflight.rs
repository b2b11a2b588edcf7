//! Source/destination checks performed once, before the first pass

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::StartupError;

/// A validated source/destination pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncPair {
    /// Source directory, as given by the user
    pub source: PathBuf,
    /// Destination directory, as given by the user
    pub destination: PathBuf,
}

impl SyncPair {
    /// Validate a source/destination pair
    ///
    /// The destination does not need to exist yet; the first pass creates it.
    ///
    /// # Errors
    ///
    /// Returns a [`StartupError`] if the source is missing or not a
    /// directory, or if the destination is the source or lies inside it.
    pub fn resolve(source: &Path, destination: &Path) -> Result<Self, StartupError> {
        match fs::metadata(source) {
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(StartupError::SourceMissing(source.to_path_buf()));
            }
            Err(error) => {
                return Err(StartupError::Resolve {
                    path: source.to_path_buf(),
                    error,
                });
            }
            Ok(metadata) if !metadata.is_dir() => {
                return Err(StartupError::SourceNotDirectory(source.to_path_buf()));
            }
            Ok(_) => {}
        }

        let root = dunce::canonicalize(source).map_err(|error| StartupError::Resolve {
            path: source.to_path_buf(),
            error,
        })?;
        let target = canonicalize_lenient(destination)?;

        if target.starts_with(&root) {
            return Err(StartupError::DestinationInsideSource {
                root,
                destination: target,
            });
        }

        Ok(Self {
            source: source.to_path_buf(),
            destination: destination.to_path_buf(),
        })
    }
}

/// Canonicalize a path that may not exist yet by resolving its nearest
/// existing ancestor and re-attaching the remaining components
fn canonicalize_lenient(path: &Path) -> Result<PathBuf, StartupError> {
    let resolve_error = |error| StartupError::Resolve {
        path: path.to_path_buf(),
        error,
    };

    let absolute = std::path::absolute(path).map_err(resolve_error)?;

    for ancestor in absolute.ancestors() {
        if fs::symlink_metadata(ancestor).is_err() {
            continue;
        }
        let base = dunce::canonicalize(ancestor).map_err(resolve_error)?;
        let rest = absolute.strip_prefix(ancestor).unwrap_or(Path::new(""));
        return Ok(base.join(rest));
    }

    Ok(absolute)
}
