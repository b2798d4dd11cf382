//! Batch driver: runs one fetch per location with bounded concurrency

use std::future::{Future, pending};
use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use futures::StreamExt;
use futures::stream;
use tracing::{info, warn};

use crate::FetchError;
use crate::fetcher::JobFetcher;
use crate::models::{BatchReport, FetchResult, LocationQuery};

/// Runs a batch of location fetches.
///
/// At most `concurrency` requests are in flight. Results come back in input
/// order, one per query, whatever happened to the others.
pub struct BatchRunner {
    fetcher: Arc<dyn JobFetcher>,
    concurrency: usize,
}

impl BatchRunner {
    #[must_use]
    pub fn new(fetcher: Arc<dyn JobFetcher>, concurrency: usize) -> Self {
        Self {
            fetcher,
            concurrency: concurrency.max(1),
        }
    }

    /// Fetch every location and collect the results
    pub async fn run(&self, queries: &[LocationQuery]) -> BatchReport {
        self.run_until(queries, pending::<()>(), |_| {}).await
    }

    /// Fetch every location, handing each result to `sink` as soon as it is
    /// next in input order.
    ///
    /// When `shutdown` resolves, in-flight requests are dropped, queued ones
    /// are never sent, and each location without an outcome is reported as
    /// [`FetchError::Cancelled`].
    pub async fn run_until<S, F>(
        &self,
        queries: &[LocationQuery],
        shutdown: S,
        mut sink: F,
    ) -> BatchReport
    where
        S: Future<Output = ()>,
        F: FnMut(&FetchResult),
    {
        let started_at = Utc::now();
        let start = Instant::now();
        info!(
            "Fetching {} locations with concurrency {}",
            queries.len(),
            self.concurrency
        );

        let mut results = Vec::with_capacity(queries.len());
        let mut fetches = stream::iter(queries)
            .map(|query| self.fetcher.fetch(query))
            .buffered(self.concurrency);

        tokio::pin!(shutdown);
        loop {
            tokio::select! {
                next = fetches.next() => match next {
                    Some(result) => {
                        sink(&result);
                        results.push(result);
                    }
                    None => break,
                },
                () = &mut shutdown => {
                    warn!(
                        "Batch cancelled with {} of {} locations done",
                        results.len(),
                        queries.len()
                    );
                    break;
                }
            }
        }
        drop(fetches);

        for query in &queries[results.len()..] {
            let result = FetchResult::cancelled(query.clone());
            sink(&result);
            results.push(result);
        }

        let report = BatchReport::new(started_at, results);
        info!(
            "Batch finished in {:.3}s: {} succeeded, {} failed",
            start.elapsed().as_secs_f64(),
            report.succeeded(),
            report.failed()
        );
        report
    }
}
