//! Error types shared across the crate

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using `anyhow::Error`
pub type Result<T> = anyhow::Result<T>;

/// Fatal errors detected before the first reconciliation pass
#[derive(Debug, Error)]
pub enum StartupError {
    /// The source folder does not exist
    #[error("Source folder '{}' does not exist.", .0.display())]
    SourceMissing(PathBuf),

    /// The source path exists but is not a directory
    #[error("Source '{}' is not a directory.", .0.display())]
    SourceNotDirectory(PathBuf),

    /// The destination equals the source or lies somewhere beneath it
    #[error(
        "Destination '{}' is inside source '{}'.",
        destination.display(),
        root.display()
    )]
    DestinationInsideSource {
        /// Canonical source path
        root: PathBuf,
        /// Canonical destination path
        destination: PathBuf,
    },

    /// A path could not be canonicalized
    #[error("Failed to resolve path '{}': {error}", path.display())]
    Resolve {
        /// Path that failed to resolve
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        error: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_missing_message() {
        let err = StartupError::SourceMissing(PathBuf::from("/no/such/dir"));
        assert_eq!(err.to_string(), "Source folder '/no/such/dir' does not exist.");
    }

    #[test]
    fn test_destination_inside_source_message() {
        let err = StartupError::DestinationInsideSource {
            root: PathBuf::from("/data"),
            destination: PathBuf::from("/data/backup"),
        };
        assert!(err.to_string().contains("'/data/backup' is inside source '/data'"));
    }
}
