//! Outcome of one location fetch and of a whole batch

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::FetchError;
use crate::models::LocationQuery;

/// Outcome of fetching one location: status and preview, or a tagged failure
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct FetchResult {
    /// The location this result answers
    pub query: LocationQuery,
    /// URL that was requested; absent when the request was never sent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// HTTP status, absent when no response was obtained
    pub status: Option<u16>,
    /// First lines of the response body, at most the configured preview size
    pub preview: Vec<String>,
    /// Failure, if any. A `Read` failure keeps the status and partial preview.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<FetchError>,
    /// Wall-clock time spent on the request in milliseconds
    pub elapsed_ms: u64,
}

impl FetchResult {
    /// A response was received and the preview read without error
    #[must_use]
    pub fn success(
        query: LocationQuery,
        url: String,
        status: u16,
        preview: Vec<String>,
        elapsed_ms: u64,
    ) -> Self {
        Self {
            query,
            url: Some(url),
            status: Some(status),
            preview,
            error: None,
            elapsed_ms,
        }
    }

    /// No usable outcome; nothing from the body was kept
    #[must_use]
    pub fn failure(query: LocationQuery, url: String, error: FetchError, elapsed_ms: u64) -> Self {
        Self {
            query,
            url: Some(url),
            status: None,
            preview: Vec::new(),
            error: Some(error),
            elapsed_ms,
        }
    }

    /// The batch stopped before this location was requested or finished
    #[must_use]
    pub fn cancelled(query: LocationQuery) -> Self {
        Self {
            query,
            url: None,
            status: None,
            preview: Vec::new(),
            error: Some(FetchError::Cancelled),
            elapsed_ms: 0,
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// All results of one batch, in input order
#[derive(Debug, Serialize, Clone)]
pub struct BatchReport {
    pub started_at: DateTime<Utc>,
    pub results: Vec<FetchResult>,
}

impl BatchReport {
    #[must_use]
    pub fn new(started_at: DateTime<Utc>, results: Vec<FetchResult>) -> Self {
        Self {
            started_at,
            results,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.results.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Number of locations that produced a clean preview
    #[must_use]
    pub fn succeeded(&self) -> usize {
        self.results.iter().filter(|r| r.is_success()).count()
    }

    /// Number of locations that carry a failure
    #[must_use]
    pub fn failed(&self) -> usize {
        self.len() - self.succeeded()
    }
}
