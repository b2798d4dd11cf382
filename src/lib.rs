//! `jobmarket` - job market snapshots per city and region
//!
//! Runs one job search per location against a search endpoint and keeps a
//! short preview of each raw response. Failures are reported per location;
//! one bad location never stops the batch.

pub mod batch;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod logging;
pub mod models;
pub mod preview;
pub mod report;
pub mod search_url;

// Re-export core types for public API
pub use batch::BatchRunner;
pub use config::JobMarketConfig;
pub use error::{FetchError, JobMarketError};
pub use fetcher::{HttpJobFetcher, JobFetcher};
pub use models::{BatchReport, FetchResult, LocationQuery};
pub use report::OutputFormat;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, JobMarketError>;
