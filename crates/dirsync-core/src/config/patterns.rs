//! Gitignore-style entry filtering using the ignore crate

use std::path::Path;

use anyhow::Context;
use ignore::gitignore::{Gitignore, GitignoreBuilder};
use ignore::Match;

use crate::error::Result;

/// Decides which entries take part in mirroring
///
/// Paths are relative to the sync root, so an anchored pattern such as
/// `/build` only matches at the top of the tree. An entry is excluded when
/// it or any of its parent directories is ignored.
#[derive(Debug, Clone)]
pub struct PatternMatcher {
    rules: Gitignore,
}

impl Default for PatternMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl PatternMatcher {
    /// Matcher that excludes nothing
    #[must_use]
    pub fn new() -> Self {
        Self {
            rules: Gitignore::empty(),
        }
    }

    /// Compile ignore patterns plus re-include patterns
    ///
    /// Every `include` pattern becomes a negated rule added after all
    /// `ignore` rules, so it overrides them for the paths it matches.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first pattern that fails to compile.
    pub fn with_patterns(ignore: &[String], include: &[String]) -> Result<Self> {
        if ignore.is_empty() && include.is_empty() {
            return Ok(Self::new());
        }

        let mut builder = GitignoreBuilder::new("");
        let negated = include.iter().map(|p| (format!("!{p}"), p, "include"));
        let rules = ignore
            .iter()
            .map(|p| (p.clone(), p, "ignore"))
            .chain(negated);

        for (line, pattern, kind) in rules {
            builder
                .add_line(None, &line)
                .with_context(|| format!("Invalid {kind} pattern: '{pattern}'"))?;
        }

        let rules = builder.build().context("Failed to compile patterns")?;
        Ok(Self { rules })
    }

    /// Whether the entry at `path` (relative to the sync root) is mirrored
    #[must_use]
    pub fn should_include(&self, path: &Path, is_dir: bool) -> bool {
        self.excluded_by(path, is_dir).is_none()
    }

    /// The ignore pattern that excludes `path`, if any
    #[must_use]
    pub fn excluded_by(&self, path: &Path, is_dir: bool) -> Option<&str> {
        if self.rules.is_empty() {
            return None;
        }
        match self.rules.matched_path_or_any_parents(path, is_dir) {
            Match::Ignore(glob) => Some(glob.original()),
            Match::Whitelist(_) | Match::None => None,
        }
    }

    /// Number of compiled rules, ignores and re-includes together
    #[must_use]
    pub fn len(&self) -> u64 {
        self.rules.num_ignores() + self.rules.num_whitelists()
    }

    /// Whether no rules are configured
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher(ignore: &[&str], include: &[&str]) -> PatternMatcher {
        let owned = |items: &[&str]| items.iter().map(ToString::to_string).collect::<Vec<_>>();
        PatternMatcher::with_patterns(&owned(ignore), &owned(include)).unwrap()
    }

    #[test]
    fn test_empty_matcher_includes_everything() {
        let m = PatternMatcher::new();

        assert!(m.is_empty());
        assert_eq!(m.len(), 0);
        assert!(m.should_include(Path::new("anything/at/all.txt"), false));
    }

    #[test]
    fn test_empty_lists_build_empty_matcher() {
        assert!(matcher(&[], &[]).is_empty());
    }

    #[test]
    fn test_glob_excludes_at_any_depth() {
        let m = matcher(&["*.tmp"], &[]);

        assert!(!m.should_include(Path::new("scratch.tmp"), false));
        assert!(!m.should_include(Path::new("a/b/scratch.tmp"), false));
        assert!(m.should_include(Path::new("notes.txt"), false));
        assert_eq!(m.excluded_by(Path::new("x.tmp"), false), Some("*.tmp"));
    }

    #[test]
    fn test_include_overrides_ignore() {
        let m = matcher(&["*.tmp"], &["keep.tmp"]);

        assert_eq!(m.len(), 2);
        assert!(m.should_include(Path::new("keep.tmp"), false));
        assert!(!m.should_include(Path::new("drop.tmp"), false));
    }

    #[test]
    fn test_directory_only_pattern() {
        let m = matcher(&["cache/"], &[]);

        assert!(!m.should_include(Path::new("cache"), true));
        assert!(m.should_include(Path::new("cache"), false));
    }

    #[test]
    fn test_ignored_parent_excludes_descendants() {
        let m = matcher(&["cache/"], &[]);

        assert!(!m.should_include(Path::new("cache/deep/blob"), false));
        assert_eq!(
            m.excluded_by(Path::new("cache/deep/blob"), false),
            Some("cache/")
        );
    }

    #[test]
    fn test_anchored_pattern() {
        let m = matcher(&["/build"], &[]);

        assert!(!m.should_include(Path::new("build"), true));
        assert!(m.should_include(Path::new("sub/build"), true));
    }

    #[test]
    fn test_invalid_pattern_named_in_error() {
        let err = PatternMatcher::with_patterns(&[], &["[z-a]".to_string()]).unwrap_err();
        assert!(err.to_string().contains("Invalid include pattern: '[z-a]'"));
    }
}
