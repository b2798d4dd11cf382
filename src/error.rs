//! Error types and handling for the `jobmarket` application

use serde::Serialize;
use thiserror::Error;

/// Main error type for the `jobmarket` application
#[derive(Error, Debug)]
pub enum JobMarketError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// HTTP client setup errors
    #[error("HTTP client error: {message}")]
    Client { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl JobMarketError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new HTTP client error
    pub fn client<S: Into<String>>(message: S) -> Self {
        Self::Client {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            JobMarketError::Config { message } => {
                format!("Configuration error: {message}. Please check your config file.")
            }
            JobMarketError::Validation { message } => {
                format!("Invalid input: {message}")
            }
            JobMarketError::Client { .. } => {
                "Unable to set up the HTTP client. Please check your TLS and proxy settings."
                    .to_string()
            }
            JobMarketError::Io { .. } => {
                "Writing the report failed. Is the output stream still open?".to_string()
            }
        }
    }
}

/// Failure of a single location fetch.
///
/// Carried inside a [`crate::FetchResult`] rather than returned, so one bad
/// location never stops the rest of a batch.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "reason")]
pub enum FetchError {
    /// No response was obtained (DNS, refused connection, timeout).
    #[error("Transport error: {0}")]
    Transport(String),

    /// A response arrived but its body could not be read for the preview.
    #[error("Read error: {0}")]
    Read(String),

    /// The batch was cancelled before this location finished.
    #[error("Cancelled before completion")]
    Cancelled,
}

impl From<reqwest_middleware::Error> for FetchError {
    fn from(err: reqwest_middleware::Error) -> Self {
        FetchError::Transport(describe(&err))
    }
}

/// Flatten an error and its sources into one line.
pub(crate) fn describe(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let config_err = JobMarketError::config("bad concurrency");
        assert!(matches!(config_err, JobMarketError::Config { .. }));

        let client_err = JobMarketError::client("tls backend missing");
        assert!(matches!(client_err, JobMarketError::Client { .. }));

        let validation_err = JobMarketError::validation("empty city");
        assert!(matches!(validation_err, JobMarketError::Validation { .. }));
    }

    #[test]
    fn test_user_messages() {
        let config_err = JobMarketError::config("test");
        assert!(config_err.user_message().contains("Configuration error"));

        let client_err = JobMarketError::client("test");
        assert!(client_err.user_message().contains("HTTP client"));

        let validation_err = JobMarketError::validation("test input");
        assert!(validation_err.user_message().contains("test input"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
        let err: JobMarketError = io_err.into();
        assert!(matches!(err, JobMarketError::Io { .. }));
    }

    #[test]
    fn test_fetch_error_display() {
        assert_eq!(
            FetchError::Transport("connection refused".into()).to_string(),
            "Transport error: connection refused"
        );
        assert_eq!(
            FetchError::Read("unexpected eof".into()).to_string(),
            "Read error: unexpected eof"
        );
        assert_eq!(FetchError::Cancelled.to_string(), "Cancelled before completion");
    }

    #[test]
    fn test_fetch_error_serializes_tagged() {
        let json = serde_json::to_value(FetchError::Read("reset".into())).unwrap();
        assert_eq!(json, serde_json::json!({"kind": "Read", "reason": "reset"}));

        let json = serde_json::to_value(FetchError::Cancelled).unwrap();
        assert_eq!(json, serde_json::json!({"kind": "Cancelled"}));
    }

    #[test]
    fn test_describe_includes_sources() {
        let inner = std::io::Error::new(std::io::ErrorKind::TimedOut, "timed out");
        let outer = std::io::Error::new(std::io::ErrorKind::Other, inner);
        assert!(describe(&outer).contains("timed out"));
    }
}
