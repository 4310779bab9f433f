//! lbrmeta - distributor metadata for EAGLE libraries
//!
//! Keeps the ordering metadata of EAGLE `.lbr` libraries in sync with the
//! distributor. Every part definition that carries a `DISTLINK` field gets
//! `DIST`, `DISTPN`, `MFR`, `MPN` and `PRICE` fields, scraped from the product
//! page the link points at and inserted right after the link.
//!
//! # Architecture Overview
//!
//! ```text
//! cli ──> utils::fs (discovery) ──> library (parse + guard)
//!                                      │
//!                                      v
//!                updater (rewrite engine) ──> resolver (fetch + scrape)
//!                      │
//!                      v
//!          library (serialize) ──> utils::fs (atomic write)
//! ```
//!
//! ## Naming Contract
//!
//! A link field may carry an affix, and the generated names mirror it:
//!
//! | Link field       | Generated fields                      |
//! |------------------|---------------------------------------|
//! | `DISTLINK`       | `DIST`, `DISTPN`, `MFR`, `MPN`, `PRICE` |
//! | `DISTLINK_CRIMP` | `DIST_CRIMP`, ..., `PRICE_CRIMP`      |
//! | `CRIMP_DISTLINK` | `CRIMP_DIST`, ..., `CRIMP_PRICE`      |
//!
//! Previously generated fields are removed before each run, so running twice
//! yields the same library as running once.
//!
//! # Core Modules
//!
//! - [`cli`] - Command-line interface and batch driver
//! - [`config`] - `UpdaterConfig` and its TOML file (`~/.lbrmeta/config.toml`)
//! - [`core`] - Error types and user-facing error display
//! - [`library`] - Typed XML model of library files
//! - [`metadata`] - Metadata records and the field naming contract
//! - [`resolver`] - Product link resolution with a bounded attempt policy
//! - [`updater`] - The rewrite engine, warnings and the warning log
//! - [`utils`] - Atomic writes, library discovery and progress bars
//!
//! # Command-Line Usage
//!
//! ```bash
//! # Update every library in a directory
//! lbrmeta ~/eagle/lbr
//!
//! # Update one library, printing per-part status
//! lbrmeta --file ~/eagle/lbr/connectors.lbr --verbose
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod core;
pub mod library;
pub mod metadata;
pub mod resolver;
pub mod updater;
pub mod utils;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
