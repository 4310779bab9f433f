use anyhow::{Context, Result, bail};
use std::future::Future;

/// Fetches the HTML behind a link.
///
/// The resolver retries on any error, so implementations should not retry on
/// their own.
pub trait PageSource {
    /// Fetch the page body for `url`.
    fn fetch(&self, url: &str) -> impl Future<Output = Result<String>>;
}

/// [`PageSource`] backed by a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpPageSource {
    client: reqwest::Client,
}

impl HttpPageSource {
    /// Build a client identifying itself as lbrmeta.
    ///
    /// # Errors
    ///
    /// Returns an error if the TLS backend cannot be initialised.
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("lbrmeta/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            client,
        })
    }
}

impl PageSource for HttpPageSource {
    async fn fetch(&self, url: &str) -> Result<String> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("Failed to fetch {url}"))?;

        let status = response.status();
        if !status.is_success() {
            bail!("HTTP {status} from {url}");
        }

        response.text().await.with_context(|| format!("Failed to read body of {url}"))
    }
}
