//! One-way tree reconciliation
//!
//! A pass works one directory level at a time, depth first:
//! 1. create the destination directory if it is missing
//! 2. remove destination entries that are absent from the source
//! 3. copy new or changed files and recurse into subdirectories
//!
//! All deletions at a level happen before any creation at that level.

mod actions;
mod executor;
mod orchestrator;
mod reporting;


use std::path::Path;

pub use executor::{TEMP_PREFIX, TEMP_SUFFIX};
pub use orchestrator::Reconciler;
pub use reporting::SyncReporter;

use crate::action_log::LogSink;
use crate::config::PatternMatcher;

/// Options for a reconciliation pass
#[derive(Debug, Clone, Default)]
pub struct ReconcileOptions {
    /// Report actions without touching the destination
    pub dry_run: bool,
    /// Entries excluded from mirroring on both sides
    pub filter: PatternMatcher,
}

/// Counters collected during a pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncStats {
    /// Directories created
    pub created_dirs: usize,
    /// Files copied to paths that did not exist
    pub created: usize,
    /// Existing files overwritten
    pub copied: usize,
    /// Top-level destination entries removed
    pub removed: usize,
    /// Files already identical
    pub unchanged: usize,
    /// Source entries that cannot be mirrored (sockets, FIFOs, dangling links)
    pub skipped: usize,
    /// Entries matched by ignore patterns
    pub excluded: usize,
    /// Entries that failed and will be retried on the next pass
    pub failed: usize,
}

impl SyncStats {
    /// Total mutations performed
    #[must_use]
    pub const fn total_operations(&self) -> usize {
        self.created_dirs + self.created + self.copied + self.removed
    }
}

/// Result of one reconciliation pass
#[derive(Debug, Clone, Default)]
pub struct SyncOutcome {
    /// True only if nothing had to be created, copied, removed, and nothing failed
    pub fully_synced: bool,
    /// Per-action counters
    pub stats: SyncStats,
    /// Error messages for entries that failed
    pub errors: Vec<String>,
}

impl SyncOutcome {
    /// Whether the pass completed without entry failures
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Run one reconciliation pass with default options
///
/// Returns `true` if the destination already mirrored the source.
pub fn reconcile(source: &Path, dest: &Path, sink: &mut dyn LogSink) -> bool {
    Reconciler::default().run(source, dest, sink).fully_synced
}
