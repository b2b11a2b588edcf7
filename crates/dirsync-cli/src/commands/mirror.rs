use std::ops::ControlFlow;
use std::time::Duration;

use anyhow::Context;
use dirsync_core::config::ConfigManager;
use dirsync_core::verify::verify_mirror;
use dirsync_core::{FileLog, Reconciler, SyncOutcome, SyncPair, SyncReporter};

use crate::cli::Cli;
use crate::runner::SyncLoop;

pub struct Mirror;

impl Mirror {
    pub fn execute(cli: &Cli) -> anyhow::Result<()> {
        let pair = SyncPair::resolve(&cli.source, &cli.destination)?;

        let config = ConfigManager::load(cli.config.as_deref(), cli.no_config)
            .context("Failed to load configuration")?;
        let mut options = config.reconcile_options()?;
        options.dry_run |= cli.dry_run;

        if cli.verbose {
            println!("Source: {}", pair.source.display());
            println!("Destination: {}", pair.destination.display());
            println!("Log file: {}", cli.log_file.display());
            println!("Dry run: {}", options.dry_run);
        }

        let mut log = FileLog::new(&cli.log_file)
            .with_dry_run(options.dry_run)
            .with_echo(!cli.quiet);
        let reconciler = Reconciler::new(options);

        if cli.once {
            let outcome = reconciler.run(&pair.source, &pair.destination, &mut log);
            Self::report(&outcome, cli.verbose);
            if cli.verify {
                Self::verify(&pair, &reconciler)?;
            }
            return Ok(());
        }

        SyncLoop::new(Duration::from_secs(cli.interval)).run(|_| {
            let outcome = reconciler.run(&pair.source, &pair.destination, &mut log);
            Self::report(&outcome, cli.verbose);
            ControlFlow::Continue(())
        });

        Ok(())
    }

    fn report(outcome: &SyncOutcome, verbose: bool) {
        if verbose {
            println!("{}", SyncReporter::generate_summary(outcome));
        }
    }

    fn verify(pair: &SyncPair, reconciler: &Reconciler) -> anyhow::Result<()> {
        let divergences = verify_mirror(
            &pair.source,
            &pair.destination,
            &reconciler.options().filter,
        )
        .context("Verification failed")?;

        if divergences.is_empty() {
            println!("Verified: destination mirrors source");
            return Ok(());
        }

        for divergence in &divergences {
            eprintln!("  {divergence}");
        }
        anyhow::bail!(
            "Destination diverges from source ({} difference(s))",
            divergences.len()
        )
    }
}
