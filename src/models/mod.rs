//! Data models for the jobmarket application
//!
//! - Location: the (city, region) pair a search is run for
//! - Fetch result: per-location outcome and the batch report that collects them

pub mod fetch_result;
pub mod location;

// Re-export all public types for convenient access
pub use fetch_result::{BatchReport, FetchResult};
pub use location::LocationQuery;
