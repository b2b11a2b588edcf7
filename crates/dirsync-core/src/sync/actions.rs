//! Per-entry action determination

use std::path::PathBuf;

use crate::comparison::Equivalence;
use crate::scanner::EntryKind;

/// What to do with a single source entry at the current directory level
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncAction {
    /// Copy to a destination path that does not exist yet
    Create { source: PathBuf, dest: PathBuf },
    /// Overwrite an existing destination file
    Update { source: PathBuf, dest: PathBuf },
    /// Recurse into a directory pair
    Descend { source: PathBuf, dest: PathBuf },
    /// Destination already mirrors the source
    Unchanged { path: PathBuf },
    /// Entry cannot be mirrored and is left alone
    Skip { path: PathBuf, reason: &'static str },
}

/// Resolves source/destination state into sync actions
pub struct SyncActionResolver;

impl SyncActionResolver {
    /// Determine the action for a source file from its comparison result
    #[must_use]
    pub fn resolve_file(source: PathBuf, dest: PathBuf, equivalence: Equivalence) -> SyncAction {
        match equivalence {
            Equivalence::Identical => SyncAction::Unchanged { path: dest },
            Equivalence::Missing => SyncAction::Create { source, dest },
            Equivalence::Unreadable
            | Equivalence::SizeDiffers
            | Equivalence::TimeDiffers
            | Equivalence::ContentDiffers => SyncAction::Update { source, dest },
        }
    }

    /// Determine the action for a source entry of the given kind
    ///
    /// Files still need a comparison, so they resolve to `None` here.
    #[must_use]
    pub fn resolve_entry(source: PathBuf, dest: PathBuf, kind: EntryKind) -> Option<SyncAction> {
        match kind {
            EntryKind::Directory => Some(SyncAction::Descend { source, dest }),
            EntryKind::File => None,
            EntryKind::Other => Some(SyncAction::Skip {
                path: source,
                reason: "not a regular file or directory",
            }),
        }
    }

    /// Whether a destination entry of kind `dest` has to be removed before
    /// a source entry of kind `source` can take its place
    #[must_use]
    pub const fn needs_replacement(source: EntryKind, dest: EntryKind) -> bool {
        match source {
            EntryKind::Directory => !matches!(dest, EntryKind::Directory),
            EntryKind::File => !matches!(dest, EntryKind::File),
            EntryKind::Other => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths() -> (PathBuf, PathBuf) {
        (PathBuf::from("src/a.txt"), PathBuf::from("dst/a.txt"))
    }

    #[test]
    fn test_identical_is_unchanged() {
        let (source, dest) = paths();
        let action = SyncActionResolver::resolve_file(source, dest.clone(), Equivalence::Identical);
        assert_eq!(action, SyncAction::Unchanged { path: dest });
    }

    #[test]
    fn test_missing_is_created() {
        let (source, dest) = paths();
        let action =
            SyncActionResolver::resolve_file(source.clone(), dest.clone(), Equivalence::Missing);
        assert_eq!(action, SyncAction::Create { source, dest });
    }

    #[test]
    fn test_any_difference_is_updated() {
        for equivalence in [
            Equivalence::Unreadable,
            Equivalence::SizeDiffers,
            Equivalence::TimeDiffers,
            Equivalence::ContentDiffers,
        ] {
            let (source, dest) = paths();
            let action =
                SyncActionResolver::resolve_file(source.clone(), dest.clone(), equivalence);
            assert_eq!(action, SyncAction::Update { source, dest });
        }
    }

    #[test]
    fn test_entry_kinds() {
        let (source, dest) = paths();
        assert!(matches!(
            SyncActionResolver::resolve_entry(source.clone(), dest.clone(), EntryKind::Directory),
            Some(SyncAction::Descend { .. })
        ));
        assert_eq!(
            SyncActionResolver::resolve_entry(source.clone(), dest.clone(), EntryKind::File),
            None
        );
        assert!(matches!(
            SyncActionResolver::resolve_entry(source, dest, EntryKind::Other),
            Some(SyncAction::Skip { .. })
        ));
    }

    #[test]
    fn test_needs_replacement() {
        assert!(SyncActionResolver::needs_replacement(EntryKind::File, EntryKind::Directory));
        assert!(SyncActionResolver::needs_replacement(EntryKind::Directory, EntryKind::File));
        assert!(SyncActionResolver::needs_replacement(EntryKind::Directory, EntryKind::Other));
        assert!(SyncActionResolver::needs_replacement(EntryKind::File, EntryKind::Other));
        assert!(!SyncActionResolver::needs_replacement(EntryKind::File, EntryKind::File));
        assert!(!SyncActionResolver::needs_replacement(
            EntryKind::Directory,
            EntryKind::Directory
        ));
    }
}
