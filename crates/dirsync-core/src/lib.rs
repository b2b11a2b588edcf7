//! # dirsync-core
//!
//! Core library for one-way directory mirroring.
//!
//! A reconciliation pass compares a source tree against a destination tree
//! and mutates the destination until it matches: destination-only entries
//! are removed, new or changed files are copied, and every mutation is
//! reported to a [`LogSink`](action_log::LogSink).

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Error types and the crate-wide result alias
pub mod error;

/// Action events and the sinks that record them
pub mod action_log;

/// File fingerprinting and equivalence checks
pub mod comparison;

/// Configuration file parsing and management
pub mod config;

/// Source/destination validation performed once at startup
pub mod preflight;

/// Directory listing for a single tree level
pub mod scanner;

/// The tree reconciler
pub mod sync;

/// Read-only mirror verification
pub mod verify;

pub use action_log::{FileLog, LogSink, MemoryLog, SyncEvent};
pub use preflight::SyncPair;
pub use sync::{ReconcileOptions, Reconciler, SyncOutcome, SyncReporter, SyncStats, reconcile};
