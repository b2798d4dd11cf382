//! Single-location job search fetcher
//!
//! [`JobFetcher`] is the seam the batch driver talks to; [`HttpJobFetcher`]
//! is the real implementation issuing one GET per location and keeping only
//! the first lines of the body.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};
use tracing::{debug, info, instrument, warn};

use crate::config::SearchConfig;
use crate::error::describe;
use crate::models::{FetchResult, LocationQuery};
use crate::preview::LinePreview;
use crate::search_url::build_search_url;
use crate::{FetchError, JobMarketError};

const USER_AGENT: &str = concat!("jobmarket/", env!("CARGO_PKG_VERSION"));

/// Fetches the search results for one location.
///
/// Implementations never fail outright: every call yields exactly one
/// [`FetchResult`], with failures tagged inside it.
#[async_trait]
pub trait JobFetcher: Send + Sync {
    async fn fetch(&self, query: &LocationQuery) -> FetchResult;
}

/// Job search client backed by reqwest, with transient retries
pub struct HttpJobFetcher {
    client: ClientWithMiddleware,
    search: SearchConfig,
}

impl HttpJobFetcher {
    /// Create a new fetcher from the search settings
    pub fn new(search: SearchConfig) -> crate::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(search.timeout_seconds.into()))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| JobMarketError::client(describe(&e)))?;

        let retry_policy = ExponentialBackoff::builder()
            .retry_bounds(Duration::from_millis(250), Duration::from_secs(5))
            .build_with_max_retries(search.max_retries);

        let client = ClientBuilder::new(client)
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build();

        Ok(Self { client, search })
    }

    /// URL that will be requested for `query`
    #[must_use]
    pub fn url_for(&self, query: &LocationQuery) -> String {
        build_search_url(&self.search, query)
    }
}

#[async_trait]
impl JobFetcher for HttpJobFetcher {
    #[instrument(name = "fetch_location", skip(self, query), fields(location = %query))]
    async fn fetch(&self, query: &LocationQuery) -> FetchResult {
        let url = self.url_for(query);
        let start = Instant::now();
        debug!("Requesting {}", url);

        let mut response = match self.client.get(&url).send().await {
            Ok(response) => response,
            Err(e) => {
                let error = FetchError::from(e);
                warn!("{}", error);
                return FetchResult::failure(query.clone(), url, error, elapsed_ms(start));
            }
        };

        let status = response.status().as_u16();
        let mut preview = LinePreview::new(self.search.preview_lines);

        // The response is dropped on every path out of this loop, which
        // closes the connection when the preview fills before the body ends.
        let outcome = loop {
            match response.chunk().await {
                Ok(Some(chunk)) => {
                    if preview.push(&chunk) {
                        break Ok(());
                    }
                }
                Ok(None) => break Ok(()),
                Err(e) => break Err(FetchError::Read(describe(&e))),
            }
        };
        drop(response);

        let elapsed = elapsed_ms(start);
        match outcome {
            Ok(()) => {
                let lines = preview.finish();
                info!(
                    "HTTP {} with {} preview lines in {}ms",
                    status,
                    lines.len(),
                    elapsed
                );
                FetchResult::success(query.clone(), url, status, lines, elapsed)
            }
            Err(error) => {
                warn!("HTTP {} but body failed: {}", status, error);
                FetchResult {
                    query: query.clone(),
                    url: Some(url),
                    status: Some(status),
                    preview: preview.into_partial(),
                    error: Some(error),
                    elapsed_ms: elapsed,
                }
            }
        }
    }
}

fn elapsed_ms(start: Instant) -> u64 {
    u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX)
}
