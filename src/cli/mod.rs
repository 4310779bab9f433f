//! Command-line interface for lbrmeta.
//!
//! One command: update the distributor metadata of every EAGLE library in a
//! directory, or of a single library with `--file`.
//!
//! # Usage
//!
//! ```bash
//! # Every .lbr directly inside ./libraries
//! lbrmeta libraries
//!
//! # Include subdirectories, with per-part status lines
//! lbrmeta -r -v libraries
//!
//! # One file, custom config, warnings to a specific log
//! lbrmeta -f connectors.lbr --config ~/lbrmeta.toml --log-file ~/lbr-warnings.txt
//! ```
//!
//! # Output
//!
//! - A progress bar over the files (hidden by `--no-progress` and `--quiet`)
//! - One yellow line per warning, also appended to the warning log
//! - Per-file errors (e.g. a file that is not an EAGLE library), after which
//!   the batch continues
//! - `Finished`, followed by a pointer to the log when warnings were raised
//!
//! # Settings Precedence
//!
//! Built-in defaults, then the configuration file (`--config`, or
//! `~/.lbrmeta/config.toml` when present), then command-line flags.

mod batch;


use crate::config::UpdaterConfig;
use crate::core::LbrError;
use crate::resolver::{AttemptPolicy, DistributorResolver, HttpPageSource};
use crate::updater::{MetadataUpdater, WarningLog};
use crate::utils::fs::find_libraries;
use crate::utils::progress::ProgressBar;
use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

pub use batch::{BatchSummary, process_library, run_batch};

/// Run settings derived from the command-line flags alone.
///
/// Kept separate from [`Cli`] so tests can inspect flag handling without
/// touching the filesystem or the global subscriber.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    /// `tracing` filter directive used when `RUST_LOG` is not set.
    pub log_level: String,

    /// Hide progress bars.
    pub no_progress: bool,

    /// Whether warnings are echoed to the terminal.
    pub echo_warnings: bool,

    /// Configuration file given with `--config`, with `~` expanded.
    pub config_path: Option<PathBuf>,
}

/// Update distributor metadata in EAGLE libraries.
#[derive(Parser, Debug)]
#[command(
    name = "lbrmeta",
    about = "Update distributor metadata of EAGLE libraries",
    version,
    long_about = "Scans EAGLE libraries for DISTLINK fields, looks each product up at the \
                  distributor, and rewrites the DIST, DISTPN, MFR, MPN and PRICE fields \
                  next to the link."
)]
pub struct Cli {
    /// Directory to scan for libraries, or a library file with --file
    #[arg(value_name = "PATH")]
    path: PathBuf,

    /// PATH points to a single library
    #[arg(short, long)]
    file: bool,

    /// Debug logging and per-part status lines
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Only report errors
    #[arg(short, long)]
    quiet: bool,

    /// Disable progress bars
    #[arg(long)]
    no_progress: bool,

    /// Also scan subdirectories of PATH
    #[arg(short, long, conflicts_with = "file")]
    recursive: bool,

    /// Configuration file [default: ~/.lbrmeta/config.toml]
    #[arg(short, long, value_name = "FILE")]
    config: Option<String>,

    /// Warning log location [default: log.txt]
    #[arg(long, value_name = "FILE")]
    log_file: Option<String>,

    /// Page fetches per link before it is reported invalid
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
    max_attempts: Option<u32>,

    /// Pause between page fetches
    #[arg(long, value_name = "MS")]
    retry_delay_ms: Option<u64>,
}

impl Cli {
    /// Run the command.
    ///
    /// # Errors
    ///
    /// Returns run-level errors only: an invalid directory, an unusable
    /// configuration, or a failure to set up the HTTP client. Errors in
    /// individual files are reported and skipped.
    pub async fn execute(self) -> Result<()> {
        let cli_config = self.build_config();
        init_logging(&cli_config.log_level);
        self.execute_with_config(cli_config).await
    }

    /// Derive [`CliConfig`] from the parsed flags.
    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            "debug".to_string()
        } else if self.quiet {
            "error".to_string()
        } else {
            // Per-link warnings are echoed by the batch runner instead.
            "warn,lbrmeta::updater=error".to_string()
        };

        CliConfig {
            log_level,
            no_progress: self.no_progress || self.quiet,
            echo_warnings: !self.quiet,
            config_path: self.config.as_deref().map(expand_path),
        }
    }

    /// Run with explicit run settings; logging must already be set up.
    ///
    /// # Errors
    ///
    /// See [`execute`](Self::execute).
    pub async fn execute_with_config(self, cli_config: CliConfig) -> Result<()> {
        let config = self.updater_config(&cli_config).await?;
        let files = self.input_files()?;
        debug!("{} libraries to process", files.len());

        let log = WarningLog::new(&config.log_file);
        let progress = ProgressBar::new(files.len() as u64, cli_config.no_progress);
        let resolver = DistributorResolver::new(
            HttpPageSource::new()?,
            AttemptPolicy::from_config(&config),
            config.distributor_name.clone(),
        )?;
        let updater = MetadataUpdater::new(resolver, config)?
            .with_warning_log(log.clone())
            .with_progress(progress.clone());

        let summary = run_batch(&files, &updater, &progress, cli_config.echo_warnings).await;
        progress.finish_and_clear();

        println!("Finished");
        if summary.warnings > 0 {
            println!("Check {} for warnings", log.path().display());
        }
        Ok(())
    }

    /// Layer the configuration file and the flags over the defaults.
    async fn updater_config(&self, cli_config: &CliConfig) -> Result<UpdaterConfig> {
        let mut config = match &cli_config.config_path {
            Some(path) => UpdaterConfig::load_from(path).await?,
            None => UpdaterConfig::load_with_optional(None).await?,
        };

        if let Some(log_file) = &self.log_file {
            config.log_file = expand_path(log_file);
        }
        if let Some(max_attempts) = self.max_attempts {
            config.max_attempts = max_attempts;
        }
        if let Some(delay) = self.retry_delay_ms {
            config.retry_delay_ms = delay;
        }
        config.verbose = self.verbose;

        config.validate()?;
        Ok(config)
    }

    fn input_files(&self) -> Result<Vec<PathBuf>> {
        if self.file {
            if !self.path.is_file() {
                return Err(LbrError::FileSystemError {
                    operation: "open".to_string(),
                    path: self.path.display().to_string(),
                }
                .into());
            }
            return Ok(vec![self.path.clone()]);
        }

        let dir = std::path::absolute(&self.path).unwrap_or_else(|_| self.path.clone());
        find_libraries(&dir, self.recursive)
    }
}

/// Install the global subscriber. `RUST_LOG` takes precedence over `level`.
fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn expand_path(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).as_ref())
}
