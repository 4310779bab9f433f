//! Global constants used throughout the lbrmeta codebase.
//!
//! This module contains the default field token, distributor identifiers,
//! retry parameters, and file names used across multiple modules. Every value
//! here that users may want to change is also exposed through
//! [`UpdaterConfig`](crate::config::UpdaterConfig).

/// Field-name token identifying a distributor product link (`DISTLINK`).
///
/// Library attributes named `[PREFIX_]DISTLINK[_SUFFIX]` are treated as link
/// markers.
pub const DEFAULT_LINK_TOKEN: &str = "DISTLINK";

/// Substring a link must contain to be resolved against the distributor.
pub const DEFAULT_DISTRIBUTOR_MATCH: &str = "digikey";

/// Value written to the `DIST` attribute for resolved links.
pub const DEFAULT_DISTRIBUTOR_NAME: &str = "Digikey";

/// Maximum number of page fetches per link before it is reported invalid.
///
/// The distributor answers bursts of requests with 403 pages instead of
/// throttling, so the ceiling has to be generous. At typical response times
/// this is roughly ten minutes of attempts for a single link.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 300_000;

/// Delay between two fetch attempts (0ms, no backoff).
///
/// Measured end-to-end runs got slower with a delay, so the default keeps
/// hammering. Raise it through `retry_delay_ms` if the distributor changes.
pub const DEFAULT_RETRY_DELAY_MS: u64 = 0;

/// Every Nth attempt checks whether the page is a search-results listing.
pub const DEFAULT_SEARCH_CHECK_INTERVAL: u32 = 10;

/// Default location of the append-only warning log.
pub const DEFAULT_LOG_FILE: &str = "log.txt";

/// File extension of EAGLE part libraries.
pub const LIBRARY_EXTENSION: &str = "lbr";

/// Root element every EAGLE document must have.
pub const LIBRARY_ROOT_ELEMENT: &str = "eagle";

/// Price placeholder used when no single-unit price row exists.
pub const PRICE_NOT_AVAILABLE: &str = "N/A";
