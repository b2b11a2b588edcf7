//! Pass summaries for the console

use std::fmt::Write;

use super::SyncOutcome;

/// Sync operation reporter
pub struct SyncReporter;

impl SyncReporter {
    /// Generate a summary report
    #[must_use]
    pub fn generate_summary(outcome: &SyncOutcome) -> String {
        let stats = &outcome.stats;
        let mut output = String::new();

        output.push_str("\n=== Sync Summary ===\n");
        let _ = writeln!(output, "Folders created: {}", stats.created_dirs);
        let _ = writeln!(output, "Files created:   {}", stats.created);
        let _ = writeln!(output, "Files copied:    {}", stats.copied);
        let _ = writeln!(output, "Removed:         {}", stats.removed);
        let _ = writeln!(output, "Unchanged:       {}", stats.unchanged);

        if stats.skipped > 0 {
            let _ = writeln!(output, "Skipped:         {}", stats.skipped);
        }
        if stats.excluded > 0 {
            let _ = writeln!(output, "Excluded:        {}", stats.excluded);
        }

        if !outcome.errors.is_empty() {
            let _ = writeln!(output, "\nErrors ({}):", outcome.errors.len());
            for error in &outcome.errors {
                let _ = writeln!(output, "  - {error}");
            }
        }

        let _ = writeln!(output, "\nTotal operations: {}", stats.total_operations());

        let status = if !outcome.is_success() {
            "✗ Completed with errors"
        } else if outcome.fully_synced {
            "✓ Fully synced"
        } else {
            "✓ Changes applied"
        };
        let _ = writeln!(output, "Status: {status}");

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sync::SyncStats;

    #[test]
    fn test_summary_fully_synced() {
        let outcome = SyncOutcome {
            fully_synced: true,
            stats: SyncStats {
                unchanged: 4,
                ..SyncStats::default()
            },
            errors: Vec::new(),
        };

        let summary = SyncReporter::generate_summary(&outcome);

        assert!(summary.contains("Unchanged:       4"));
        assert!(summary.contains("Total operations: 0"));
        assert!(summary.contains("✓ Fully synced"));
        assert!(!summary.contains("Skipped"));
    }

    #[test]
    fn test_summary_changes_applied() {
        let outcome = SyncOutcome {
            fully_synced: false,
            stats: SyncStats {
                created: 2,
                copied: 1,
                removed: 3,
                ..SyncStats::default()
            },
            errors: Vec::new(),
        };

        let summary = SyncReporter::generate_summary(&outcome);

        assert!(summary.contains("Files created:   2"));
        assert!(summary.contains("Removed:         3"));
        assert!(summary.contains("Total operations: 6"));
        assert!(summary.contains("✓ Changes applied"));
    }

    #[test]
    fn test_summary_with_errors() {
        let outcome = SyncOutcome {
            fully_synced: false,
            stats: SyncStats {
                failed: 1,
                ..SyncStats::default()
            },
            errors: vec!["dst/x: Permission denied".to_string()],
        };

        let summary = SyncReporter::generate_summary(&outcome);

        assert!(summary.contains("Errors (1)"));
        assert!(summary.contains("dst/x: Permission denied"));
        assert!(summary.contains("✗ Completed with errors"));
    }
}
