use super::page::{PageOutcome, ProductSelectors};
use super::source::PageSource;
use super::{AttemptPolicy, LinkResolver, ResolveError};
use crate::metadata::MetadataRecord;
use anyhow::Result;
use std::time::Duration;
use tokio_retry::RetryIf;
use tokio_retry::strategy::FixedInterval;
use tracing::{debug, trace};

/// Why a single fetch attempt did not produce a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AttemptFailure {
    /// Search listing seen on a checking attempt; not worth retrying.
    SearchResults,
    /// Anything else; retried until the budget runs out.
    NoProduct,
}

/// Resolves links by scraping the distributor's product pages.
#[derive(Debug, Clone)]
pub struct DistributorResolver<S> {
    source: S,
    selectors: ProductSelectors,
    policy: AttemptPolicy,
    distributor_name: String,
}

impl<S: PageSource> DistributorResolver<S> {
    /// Create a resolver.
    ///
    /// # Errors
    ///
    /// Returns an error if the page selectors fail to compile.
    pub fn new(source: S, policy: AttemptPolicy, distributor_name: impl Into<String>) -> Result<Self> {
        Ok(Self {
            source,
            selectors: ProductSelectors::new()?,
            policy,
            distributor_name: distributor_name.into(),
        })
    }
}

impl<S: PageSource> LinkResolver for DistributorResolver<S> {
    async fn resolve(&self, link: &str) -> Result<MetadataRecord, ResolveError> {
        let policy = self.policy;
        let retries = policy.max_attempts.saturating_sub(1) as usize;
        let strategy = FixedInterval::new(Duration::from_millis(policy.delay_ms)).take(retries);

        let source = &self.source;
        let selectors = &self.selectors;
        let distributor = self.distributor_name.as_str();
        let mut attempt = 0u32;
        let action = move || {
            let current = attempt;
            attempt += 1;
            fetch_attempt(source, selectors, distributor, link, current, policy)
        };

        let outcome = RetryIf::spawn(strategy, action, |failure: &AttemptFailure| {
            *failure == AttemptFailure::NoProduct
        })
        .await;

        match outcome {
            Ok(record) => Ok(record),
            Err(AttemptFailure::SearchResults) => {
                debug!("{} leads to a search page", link);
                Err(ResolveError::Ambiguous)
            }
            Err(AttemptFailure::NoProduct) => {
                debug!("Giving up on {} after {} attempts", link, policy.max_attempts);
                Err(ResolveError::Invalid {
                    attempts: policy.max_attempts,
                })
            }
        }
    }
}

async fn fetch_attempt<S: PageSource>(
    source: &S,
    selectors: &ProductSelectors,
    distributor: &str,
    link: &str,
    attempt: u32,
    policy: AttemptPolicy,
) -> Result<MetadataRecord, AttemptFailure> {
    let html = match source.fetch(link).await {
        Ok(html) => html,
        Err(e) => {
            trace!("Attempt {} for {}: {:#}", attempt + 1, link, e);
            return Err(AttemptFailure::NoProduct);
        }
    };

    match selectors.parse(&html, distributor) {
        PageOutcome::Product(record) => Ok(record),
        PageOutcome::SearchResults if policy.checks_search_on(attempt) => {
            Err(AttemptFailure::SearchResults)
        }
        _ => {
            trace!("Attempt {} for {}: no product details", attempt + 1, link);
            Err(AttemptFailure::NoProduct)
        }
    }
}
