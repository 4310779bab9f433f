//! Link resolution: product link in, [`MetadataRecord`] out.
//!
//! The rewrite engine only sees the [`LinkResolver`] trait. The production
//! implementation, [`DistributorResolver`], fetches pages through a
//! [`PageSource`] and classifies them with [`ProductSelectors`].
//!
//! # Failure Model
//!
//! Resolution fails in exactly two ways, both recovered by skipping the link:
//!
//! - [`ResolveError::Ambiguous`]: the link leads to a search listing
//! - [`ResolveError::Invalid`]: no product page within the attempt budget
//!
//! # Attempt Policy
//!
//! The distributor answers bursts with 403 pages rather than slowing down, so
//! a fetch that does not yield a product is simply repeated, up to
//! [`AttemptPolicy::max_attempts`] times. The delay between attempts defaults
//! to zero and is configurable.

mod distributor;
pub mod page;
mod source;

use crate::config::UpdaterConfig;
use crate::metadata::MetadataRecord;
use std::future::Future;
use thiserror::Error;

pub use distributor::DistributorResolver;
pub use page::{PageOutcome, ProductSelectors};
pub use source::{HttpPageSource, PageSource};

/// Why a link produced no record.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// The link opens a search-results listing instead of a product.
    #[error("link leads to a search page")]
    Ambiguous,

    /// No product page could be obtained.
    #[error("no product page after {attempts} attempts")]
    Invalid {
        /// Number of fetches made before giving up.
        attempts: u32,
    },
}

/// Resolves a distributor product link into metadata.
pub trait LinkResolver {
    /// Resolve `link`.
    fn resolve(&self, link: &str) -> impl Future<Output = Result<MetadataRecord, ResolveError>>;
}

/// Bounded attempt policy for page fetches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttemptPolicy {
    /// Total fetches allowed per link, at least 1.
    pub max_attempts: u32,
    /// Pause between fetches in milliseconds.
    pub delay_ms: u64,
    /// Check for a search page on every Nth attempt, starting with the first.
    pub search_check_interval: u32,
}

impl AttemptPolicy {
    /// Policy described by the run configuration.
    pub fn from_config(config: &UpdaterConfig) -> Self {
        Self {
            max_attempts: config.max_attempts.max(1),
            delay_ms: config.retry_delay_ms,
            search_check_interval: config.search_check_interval.max(1),
        }
    }

    /// Whether attempt number `attempt` (0-based) checks for a search page.
    pub fn checks_search_on(&self, attempt: u32) -> bool {
        attempt % self.search_check_interval == 0
    }
}

impl Default for AttemptPolicy {
    fn default() -> Self {
        Self::from_config(&UpdaterConfig::default())
    }
}
