//! Config file schema

use serde::Deserialize;

/// Settings read from a `dirsync` TOML file
///
/// ```toml
/// ignore = ["*.tmp", ".DS_Store"]
/// include = ["keep.tmp"]
/// dry_run = false
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Gitignore-style patterns excluded from mirroring, relative to the sync root
    pub ignore: Vec<String>,

    /// Patterns re-included even though an ignore pattern matches them
    pub include: Vec<String>,

    /// Report actions without touching the destination
    pub dry_run: bool,
}

impl Config {
    /// Layer a higher-precedence config on top of this one
    ///
    /// Pattern lists accumulate; `dry_run` stays on once any layer sets it.
    pub fn absorb(&mut self, other: Self) {
        self.ignore.extend(other.ignore);
        self.include.extend(other.include);
        self.dry_run |= other.dry_run;
    }
}
