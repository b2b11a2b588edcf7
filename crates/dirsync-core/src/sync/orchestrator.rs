//! Sync orchestration - the depth-first reconciliation pass

use std::collections::HashSet;
use std::ffi::OsString;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use tracing::{debug, info, warn};

use super::actions::{SyncAction, SyncActionResolver};
use super::executor::FileOperationExecutor;
use super::{ReconcileOptions, SyncOutcome};
use crate::action_log::{LogSink, SyncEvent};
use crate::comparison::{Equivalence, FileComparator};
use crate::scanner::{DirectoryListing, EntryKind, LinkMode};

/// Mutable state threaded through one pass
struct PassState<'a> {
    sink: &'a mut dyn LogSink,
    outcome: SyncOutcome,
}

impl PassState<'_> {
    fn emit(&mut self, event: SyncEvent) {
        self.sink.record(&event);
    }

    fn fail(&mut self, path: &Path, error: &anyhow::Error) {
        warn!(path = %path.display(), "{error:#}");
        self.outcome.stats.failed += 1;
        self.outcome
            .errors
            .push(format!("{}: {error:#}", path.display()));
        self.emit(SyncEvent::Failed {
            path: path.to_path_buf(),
            reason: format!("{error:#}"),
        });
    }
}

/// Mirrors a source tree onto a destination tree
///
/// Each call to [`Reconciler::run`] is a complete, stateless pass: nothing is
/// remembered between passes and the filesystem is the only state.
#[derive(Debug, Clone, Default)]
pub struct Reconciler {
    options: ReconcileOptions,
}

impl Reconciler {
    /// Create a reconciler with the given options
    #[must_use]
    pub const fn new(options: ReconcileOptions) -> Self {
        Self { options }
    }

    /// Options this reconciler runs with
    #[must_use]
    pub const fn options(&self) -> &ReconcileOptions {
        &self.options
    }

    /// Run one reconciliation pass from `source` onto `dest`
    ///
    /// Never fails as a whole: per-entry errors are recorded in the outcome,
    /// reported to `sink` as [`SyncEvent::Failed`], and leave the pass
    /// flagged as not fully synced.
    pub fn run(&self, source: &Path, dest: &Path, sink: &mut dyn LogSink) -> SyncOutcome {
        let mut state = PassState {
            sink,
            outcome: SyncOutcome::default(),
        };
        let executor = FileOperationExecutor::new(self.options.dry_run);

        let synced = self.sync_level(&executor, source, dest, Path::new(""), false, &mut state);

        let mut outcome = state.outcome;
        outcome.fully_synced = synced;

        info!(
            source = %source.display(),
            dest = %dest.display(),
            dry_run = executor.is_dry_run(),
            fully_synced = outcome.fully_synced,
            operations = outcome.stats.total_operations(),
            failed = outcome.stats.failed,
            "pass finished"
        );

        outcome
    }

    /// Reconcile one directory level and everything beneath it
    ///
    /// `rel` is the path relative to the sync root, used for pattern matching.
    /// `fresh` means the destination is known not to exist (it was just
    /// removed to make room for this directory).
    fn sync_level(
        &self,
        executor: &FileOperationExecutor,
        source: &Path,
        dest: &Path,
        rel: &Path,
        fresh: bool,
        state: &mut PassState<'_>,
    ) -> bool {
        let mut synced = true;

        let dest_missing = fresh
            || matches!(fs::symlink_metadata(dest), Err(e) if e.kind() == ErrorKind::NotFound);

        if dest_missing {
            if let Err(e) = executor.create_dir(dest) {
                state.fail(dest, &e);
                return false;
            }
            state.outcome.stats.created_dirs += 1;
            state.emit(SyncEvent::CreatedDestinationFolder(dest.to_path_buf()));
            synced = false;
        }

        let source_listing = match DirectoryListing::read(source, LinkMode::Follow) {
            Ok(listing) => listing,
            Err(e) => {
                state.fail(dest, &e);
                return false;
            }
        };

        let dest_listing = if dest_missing {
            DirectoryListing::default()
        } else {
            match DirectoryListing::read_or_empty(dest, LinkMode::NoFollow) {
                Ok(listing) => listing,
                Err(e) => {
                    state.fail(dest, &e);
                    return false;
                }
            }
        };

        // Deletion phase: everything below is removed before anything is created
        for entry in dest_listing.difference(&source_listing) {
            let rel_path = rel.join(&entry.name);
            if !self.is_included(&rel_path, entry.kind) {
                state.outcome.stats.excluded += 1;
                continue;
            }
            Self::remove(executor, &dest.join(&entry.name), entry.kind, state);
            synced = false;
        }

        // Entries whose destination counterpart has the wrong kind
        let mut replaced: HashSet<OsString> = HashSet::new();
        let mut blocked: HashSet<OsString> = HashSet::new();
        for entry in source_listing.entries() {
            let Some(dest_kind) = dest_listing.kind(&entry.name) else {
                continue;
            };
            if !SyncActionResolver::needs_replacement(entry.kind, dest_kind)
                || !self.is_included(&rel.join(&entry.name), entry.kind)
            {
                continue;
            }

            let path = dest.join(&entry.name);
            synced = false;
            if Self::remove(executor, &path, dest_kind, state) {
                replaced.insert(entry.name);
            } else {
                blocked.insert(entry.name);
            }
        }

        // Reconciliation phase
        for entry in source_listing.entries() {
            let rel_path = rel.join(&entry.name);
            if !self.is_included(&rel_path, entry.kind) {
                state.outcome.stats.excluded += 1;
                continue;
            }
            if blocked.contains(&entry.name) {
                continue;
            }

            let source_path = source.join(&entry.name);
            let dest_path = dest.join(&entry.name);
            let is_replaced = replaced.contains(&entry.name);

            let action = match SyncActionResolver::resolve_entry(
                source_path.clone(),
                dest_path.clone(),
                entry.kind,
            ) {
                Some(action) => action,
                None => {
                    let equivalence = if is_replaced {
                        Equivalence::Missing
                    } else {
                        match FileComparator::compare(&source_path, &dest_path) {
                            Ok(equivalence) => equivalence,
                            Err(e) => {
                                state.fail(&dest_path, &e);
                                synced = false;
                                continue;
                            }
                        }
                    };
                    debug!(path = %rel_path.display(), reason = equivalence.describe(), "compared");
                    SyncActionResolver::resolve_file(source_path, dest_path, equivalence)
                }
            };

            synced &= self.apply(executor, action, &rel_path, is_replaced, state);
        }

        synced
    }

    /// Execute one action, returning whether the entry was already in sync
    fn apply(
        &self,
        executor: &FileOperationExecutor,
        action: SyncAction,
        rel: &Path,
        replaced: bool,
        state: &mut PassState<'_>,
    ) -> bool {
        match action {
            SyncAction::Descend { source, dest } => {
                self.sync_level(executor, &source, &dest, rel, replaced, state)
            }
            SyncAction::Create { source, dest } => {
                match executor.copy_file(&source, &dest) {
                    Ok(()) => {
                        state.outcome.stats.created += 1;
                        state.emit(SyncEvent::Created(dest));
                    }
                    Err(e) => state.fail(&dest, &e),
                }
                false
            }
            SyncAction::Update { source, dest } => {
                match executor.copy_file(&source, &dest) {
                    Ok(()) => {
                        state.outcome.stats.copied += 1;
                        state.emit(SyncEvent::Copied(dest));
                    }
                    Err(e) => state.fail(&dest, &e),
                }
                false
            }
            SyncAction::Unchanged { path } => {
                debug!(path = %path.display(), "unchanged");
                state.outcome.stats.unchanged += 1;
                true
            }
            SyncAction::Skip { path, reason } => {
                warn!(path = %path.display(), "skipped: {reason}");
                state.outcome.stats.skipped += 1;
                true
            }
        }
    }

    /// Remove one destination entry, returning whether it succeeded
    fn remove(
        executor: &FileOperationExecutor,
        path: &Path,
        kind: EntryKind,
        state: &mut PassState<'_>,
    ) -> bool {
        match executor.remove(path, kind) {
            Ok(()) => {
                state.outcome.stats.removed += 1;
                state.emit(SyncEvent::Removed(path.to_path_buf()));
                true
            }
            Err(e) => {
                state.fail(path, &e);
                false
            }
        }
    }

    fn is_included(&self, rel: &Path, kind: EntryKind) -> bool {
        let is_dir = matches!(kind, EntryKind::Directory);
        match self.options.filter.excluded_by(rel, is_dir) {
            Some(pattern) => {
                debug!(path = %rel.display(), pattern, "excluded");
                false
            }
            None => true,
        }
    }
}
