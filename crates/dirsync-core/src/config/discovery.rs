//! Locating config files: explicit path, project file, global file

use std::fmt;
use std::path::{Path, PathBuf};

/// Project config file name, searched in the current directory and its parents
pub const PROJECT_CONFIG_NAME: &str = ".dirsync.toml";

/// Where a config file came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigLayer {
    /// `<config_dir>/dirsync/config.toml`
    Global,
    /// Nearest `.dirsync.toml` at or above the working directory
    Project,
    /// Passed with `--config`
    Cli,
}

impl fmt::Display for ConfigLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Global => "global",
            Self::Project => "project",
            Self::Cli => "command-line",
        })
    }
}

/// Config files found for one run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigFiles {
    /// Explicit file, applied last
    pub cli: Option<PathBuf>,
    /// Project file
    pub project: Option<PathBuf>,
    /// Global file, applied first
    pub global: Option<PathBuf>,
}

impl ConfigFiles {
    /// Present files, lowest precedence first
    pub fn layers(&self) -> impl Iterator<Item = (ConfigLayer, &Path)> {
        [
            (ConfigLayer::Global, &self.global),
            (ConfigLayer::Project, &self.project),
            (ConfigLayer::Cli, &self.cli),
        ]
        .into_iter()
        .filter_map(|(layer, path)| path.as_deref().map(|p| (layer, p)))
    }
}

/// Config file discovery
pub struct ConfigDiscovery;

impl ConfigDiscovery {
    /// Look up every config layer
    ///
    /// The explicit path is recorded as given; the caller decides whether a
    /// missing explicit file is an error.
    #[must_use]
    pub fn discover(cli_path: Option<&Path>) -> ConfigFiles {
        let project = std::env::current_dir()
            .ok()
            .and_then(|cwd| Self::find_upwards(&cwd, PROJECT_CONFIG_NAME));

        ConfigFiles {
            cli: cli_path.map(Path::to_path_buf),
            project,
            global: Self::global_config(),
        }
    }

    /// Nearest regular file called `name` in `start` or an ancestor
    #[must_use]
    pub fn find_upwards(start: &Path, name: &str) -> Option<PathBuf> {
        start
            .ancestors()
            .map(|dir| dir.join(name))
            .find(|candidate| candidate.is_file())
    }

    fn global_config() -> Option<PathBuf> {
        let path = dirs::config_dir()?.join("dirsync").join("config.toml");
        path.is_file().then_some(path)
    }
}
