//! Configuration file parsing, merging, and pattern matching
//!
//! This module handles:
//! - Config file discovery (explicit path, project file, global file)
//! - TOML parsing with serde
//! - Config merging with precedence rules
//! - Gitignore-style pattern matching
//! - Validation and error reporting

mod discovery;
mod merge;
mod patterns;
mod types;
mod validation;


use std::path::Path;

pub use discovery::{ConfigDiscovery, ConfigFiles, ConfigLayer, PROJECT_CONFIG_NAME};
pub use merge::ConfigMerger;
pub use patterns::PatternMatcher;
pub use types::Config;
pub use validation::ConfigValidator;

use crate::error::Result;
use crate::sync::ReconcileOptions;

/// Configuration manager that coordinates discovery, parsing, merging, and validation
pub struct ConfigManager;

impl ConfigManager {
    /// Load and merge configuration from all sources
    ///
    /// With `no_config` set, no file is read and the defaults are returned.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicitly requested file does not exist, or if
    /// any config file is unreadable or invalid.
    pub fn load(cli_config_path: Option<&Path>, no_config: bool) -> Result<Config> {
        if no_config {
            return Ok(Config::default());
        }

        if let Some(path) = cli_config_path {
            if !path.is_file() {
                anyhow::bail!("Config file not found: {}", path.display());
            }
        }

        let files = ConfigDiscovery::discover(cli_config_path);
        Self::load_files(&files)
    }

    /// Merge and validate an explicit set of config files
    ///
    /// # Errors
    ///
    /// Returns an error if any config file is unreadable or invalid.
    pub fn load_files(files: &ConfigFiles) -> Result<Config> {
        let merged = ConfigMerger::merge(files)?;
        ConfigValidator::validate(&merged)?;
        Ok(merged)
    }
}

impl Config {
    /// Build reconciliation options from this configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the patterns do not compile.
    pub fn reconcile_options(&self) -> Result<ReconcileOptions> {
        Ok(ReconcileOptions {
            dry_run: self.dry_run,
            filter: PatternMatcher::with_patterns(&self.ignore, &self.include)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_config_returns_defaults() {
        let config = ConfigManager::load(Some(Path::new("/definitely/not/here.toml")), true)
            .unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_missing_explicit_config_is_error() {
        let err = ConfigManager::load(Some(Path::new("/definitely/not/here.toml")), false)
            .unwrap_err();
        assert!(err.to_string().contains("Config file not found"));
    }

    #[test]
    fn test_reconcile_options_from_config() {
        let config = Config {
            ignore: vec!["*.tmp".to_string()],
            include: Vec::new(),
            dry_run: true,
        };

        let options = config.reconcile_options().unwrap();

        assert!(options.dry_run);
        assert!(!options.filter.should_include(Path::new("x.tmp"), false));
    }
}
