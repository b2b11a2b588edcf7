use clap::Parser;
use std::path::PathBuf;

/// One-way directory mirroring
///
/// Keeps DESTINATION an exact copy of SOURCE, re-checking every INTERVAL
/// seconds and appending each action to LOG_FILE
#[derive(Parser, Debug)]
#[command(name = "dirsync")]
#[command(about, long_about = None, version)]
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Directory to mirror from (never modified)
    pub source: PathBuf,

    /// Directory to mirror into (created if missing)
    pub destination: PathBuf,

    /// Seconds to wait between passes
    pub interval: u64,

    /// File that actions are appended to
    pub log_file: PathBuf,

    /// Print pass summaries and enable debug diagnostics
    #[arg(short, long)]
    pub verbose: bool,

    /// Write actions to LOG_FILE only, not to stdout
    #[arg(short, long)]
    pub quiet: bool,

    /// Run a single pass and exit
    #[arg(long)]
    pub once: bool,

    /// Report actions without touching the destination
    #[arg(long)]
    pub dry_run: bool,

    /// After the pass, check that the destination mirrors the source
    #[arg(long, requires = "once")]
    pub verify: bool,

    /// Use specific config file
    #[arg(long, value_name = "PATH", conflicts_with = "no_config")]
    pub config: Option<PathBuf>,

    /// Ignore all config files
    #[arg(long, conflicts_with = "config")]
    pub no_config: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_positional_arguments() {
        let cli = Cli::try_parse_from(["dirsync", "src", "dst", "30", "sync.log"]).unwrap();

        assert_eq!(cli.source, PathBuf::from("src"));
        assert_eq!(cli.destination, PathBuf::from("dst"));
        assert_eq!(cli.interval, 30);
        assert_eq!(cli.log_file, PathBuf::from("sync.log"));
        assert!(!cli.once);
        assert!(!cli.quiet);
    }

    #[test]
    fn test_quiet_short_flag() {
        let cli = Cli::try_parse_from(["dirsync", "-q", "a", "b", "1", "l"]).unwrap();
        assert!(cli.quiet);
        assert!(!cli.verbose);
    }

    #[test]
    fn test_negative_interval_rejected() {
        assert!(Cli::try_parse_from(["dirsync", "src", "dst", "-5", "sync.log"]).is_err());
    }

    #[test]
    fn test_verify_requires_once() {
        assert!(Cli::try_parse_from(["dirsync", "--verify", "a", "b", "1", "l"]).is_err());
        assert!(Cli::try_parse_from(["dirsync", "--once", "--verify", "a", "b", "1", "l"]).is_ok());
    }

    #[test]
    fn test_config_conflicts_with_no_config() {
        let result = Cli::try_parse_from([
            "dirsync",
            "--config",
            "x.toml",
            "--no-config",
            "a",
            "b",
            "1",
            "l",
        ]);
        assert!(result.is_err());
    }
}
