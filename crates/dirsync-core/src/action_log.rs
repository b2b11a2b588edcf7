//! Action events emitted by the reconciler and the sinks that record them
//!
//! Every mutation of the destination tree produces one [`SyncEvent`]. The
//! reconciler never writes output itself; it hands events to whatever
//! [`LogSink`] the caller supplies.

use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::error::Result;

/// A single action performed (or attempted) on the destination tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncEvent {
    /// The destination directory did not exist and was created
    CreatedDestinationFolder(PathBuf),
    /// A destination-only file or directory was removed
    Removed(PathBuf),
    /// A file was copied to a path that did not previously exist
    Created(PathBuf),
    /// An existing destination file was overwritten
    Copied(PathBuf),
    /// An entry could not be synchronized during this pass
    Failed {
        /// Destination path of the entry
        path: PathBuf,
        /// Error description
        reason: String,
    },
}

impl SyncEvent {
    /// The action label written at the start of each log line
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::CreatedDestinationFolder(_) => "Created destination folder",
            Self::Removed(_) => "Removed file",
            Self::Created(_) => "Created",
            Self::Copied(_) => "Copied file",
            Self::Failed { .. } => "Failed to sync",
        }
    }

    /// The path the event refers to
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::CreatedDestinationFolder(path)
            | Self::Removed(path)
            | Self::Created(path)
            | Self::Copied(path)
            | Self::Failed { path, .. } => path,
        }
    }
}

impl fmt::Display for SyncEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.label(), self.path().display())?;
        if let Self::Failed { reason, .. } = self {
            write!(f, " ({reason})")?;
        }
        Ok(())
    }
}

/// Destination for [`SyncEvent`]s
pub trait LogSink {
    /// Record one event
    ///
    /// Implementations must not fail the pass; write errors are reported
    /// through diagnostics and otherwise dropped.
    fn record(&mut self, event: &SyncEvent);
}

/// In-memory sink, mainly for tests and embedding
#[derive(Debug, Clone, Default)]
pub struct MemoryLog {
    events: Vec<SyncEvent>,
}

impl MemoryLog {
    /// Create an empty log
    #[must_use]
    pub const fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// All recorded events in order
    #[must_use]
    pub fn events(&self) -> &[SyncEvent] {
        &self.events
    }

    /// Recorded events rendered as log lines
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.events.iter().map(ToString::to_string).collect()
    }

}

impl LogSink for MemoryLog {
    fn record(&mut self, event: &SyncEvent) {
        self.events.push(event.clone());
    }
}

/// Append-only text log file, mirrored to standard output
///
/// The file is opened in append mode for every line, so it can be rotated or
/// removed externally between passes.
#[derive(Debug, Clone)]
pub struct FileLog {
    path: PathBuf,
    dry_run: bool,
    echo: bool,
}

impl FileLog {
    /// Create a sink appending to `path`
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            dry_run: false,
            echo: true,
        }
    }

    /// Prefix every line with `[DRY RUN]`
    #[must_use]
    pub const fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Enable or disable mirroring lines to standard output
    #[must_use]
    pub const fn with_echo(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }

    /// Path of the log file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn format_line(&self, event: &SyncEvent) -> String {
        if self.dry_run {
            format!("[DRY RUN] {event}")
        } else {
            event.to_string()
        }
    }

    fn append(&self, line: &str) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("Failed to open log file: {}", self.path.display()))?;

        writeln!(file, "{line}")
            .with_context(|| format!("Failed to write log file: {}", self.path.display()))?;

        Ok(())
    }
}

impl LogSink for FileLog {
    fn record(&mut self, event: &SyncEvent) {
        let line = self.format_line(event);

        if self.echo {
            println!("{line}");
        }

        if let Err(e) = self.append(&line) {
            tracing::warn!("{e:#}");
        }
    }
}
