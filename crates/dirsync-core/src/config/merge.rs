//! Combining config layers
//!
//! Layers are applied global, then project, then command-line. See
//! [`Config::absorb`] for how two layers combine.

use std::fs;
use std::path::Path;

use anyhow::Context;

use super::discovery::{ConfigFiles, ConfigLayer};
use super::types::Config;
use crate::error::Result;

/// Configuration merger
pub struct ConfigMerger;

impl ConfigMerger {
    /// Read every discovered layer and fold them into one config
    ///
    /// # Errors
    ///
    /// Returns an error naming the layer and file that could not be read or parsed.
    pub fn merge(files: &ConfigFiles) -> Result<Config> {
        files
            .layers()
            .try_fold(Config::default(), |mut merged, (layer, path)| {
                merged.absorb(Self::read_layer(layer, path)?);
                Ok(merged)
            })
    }

    fn read_layer(layer: ConfigLayer, path: &Path) -> Result<Config> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {layer} config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse {layer} config file: {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_no_files_gives_defaults() {
        let config = ConfigMerger::merge(&ConfigFiles::default()).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_layers_accumulate_in_order() {
        let tmp = TempDir::new().unwrap();
        let files = ConfigFiles {
            global: Some(write(&tmp, "global.toml", r#"ignore = ["*.tmp"]"#)),
            project: Some(write(&tmp, "project.toml", "ignore = [\"*.log\"]\ndry_run = true")),
            cli: Some(write(&tmp, "cli.toml", r#"include = ["keep.log"]"#)),
        };

        let config = ConfigMerger::merge(&files).unwrap();

        assert_eq!(config.ignore, vec!["*.tmp", "*.log"]);
        assert_eq!(config.include, vec!["keep.log"]);
        assert!(config.dry_run);
    }

    #[test]
    fn test_later_layer_cannot_clear_dry_run() {
        let tmp = TempDir::new().unwrap();
        let files = ConfigFiles {
            global: Some(write(&tmp, "global.toml", "dry_run = true")),
            cli: Some(write(&tmp, "cli.toml", "dry_run = false")),
            ..ConfigFiles::default()
        };

        assert!(ConfigMerger::merge(&files).unwrap().dry_run);
    }

    #[test]
    fn test_parse_error_names_layer() {
        let tmp = TempDir::new().unwrap();
        let files = ConfigFiles {
            project: Some(write(&tmp, "broken.toml", "ignore = [")),
            ..ConfigFiles::default()
        };

        let err = ConfigMerger::merge(&files).unwrap_err();
        assert!(err.to_string().contains("Failed to parse project config file"));
    }

    #[test]
    fn test_unreadable_layer() {
        let tmp = TempDir::new().unwrap();
        let files = ConfigFiles {
            cli: Some(tmp.path().join("absent.toml")),
            ..ConfigFiles::default()
        };

        let err = ConfigMerger::merge(&files).unwrap_err();
        assert!(err.to_string().contains("Failed to read command-line config file"));
    }
}
