//! Scripted stand-ins for the network-facing seams.

use crate::metadata::MetadataRecord;
use crate::resolver::{LinkResolver, PageSource, ResolveError};
use anyhow::Result;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// A [`PageSource`] replaying a fixed sequence of page bodies.
///
/// Once the script is exhausted the last page repeats. Clones share the
/// script position and the fetch counter.
#[derive(Clone, Debug)]
pub struct ScriptedPages {
    pages: Arc<Vec<String>>,
    fetched: Arc<Mutex<usize>>,
}

impl ScriptedPages {
    /// Script that returns `pages` in order.
    pub fn new<I, S>(pages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            pages: Arc::new(pages.into_iter().map(Into::into).collect()),
            fetched: Arc::new(Mutex::new(0)),
        }
    }

    /// Number of fetches made so far.
    pub fn fetch_count(&self) -> usize {
        *self.fetched.lock().unwrap()
    }
}

impl PageSource for ScriptedPages {
    async fn fetch(&self, _url: &str) -> Result<String> {
        let mut fetched = self.fetched.lock().unwrap();
        let index = (*fetched).min(self.pages.len().saturating_sub(1));
        *fetched += 1;
        Ok(self.pages.get(index).cloned().unwrap_or_default())
    }
}

/// A [`LinkResolver`] answering from a fixed table.
///
/// Unknown links resolve as invalid. Every call is recorded.
#[derive(Clone, Debug, Default)]
pub struct StubResolver {
    responses: HashMap<String, Result<MetadataRecord, ResolveError>>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl StubResolver {
    /// A resolver with no known links.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve `link` to `record`.
    pub fn with_record(mut self, link: &str, record: MetadataRecord) -> Self {
        self.responses.insert(link.to_string(), Ok(record));
        self
    }

    /// Fail `link` with `error`.
    pub fn with_error(mut self, link: &str, error: ResolveError) -> Self {
        self.responses.insert(link.to_string(), Err(error));
        self
    }

    /// Links resolved so far, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl LinkResolver for StubResolver {
    async fn resolve(&self, link: &str) -> Result<MetadataRecord, ResolveError> {
        self.calls.lock().unwrap().push(link.to_string());
        self.responses.get(link).cloned().unwrap_or(Err(ResolveError::Invalid {
            attempts: 1,
        }))
    }
}
