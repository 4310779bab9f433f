//! Configuration for a metadata update run.
//!
//! Settings come from three layers, later layers winning:
//!
//! 1. Built-in defaults from [`crate::constants`]
//! 2. The TOML configuration file (`~/.lbrmeta/config.toml` or `--config`)
//! 3. Command-line flags
//!
//! # File Format
//!
//! ```toml
//! # Field token that marks distributor links
//! link_token = "DISTLINK"
//!
//! # Only links containing this substring are resolved
//! distributor_match = "digikey"
//! distributor_name = "Digikey"
//!
//! # Resolver attempt policy
//! max_attempts = 300000
//! retry_delay_ms = 0
//! search_check_interval = 10
//!
//! # Append-only warning log
//! log_file = "log.txt"
//! ```

mod settings;

pub use settings::UpdaterConfig;
