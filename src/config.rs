//! Configuration management for the `jobmarket` application
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::JobMarketError;
use crate::models::LocationQuery;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure for the `jobmarket` application
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobMarketConfig {
    /// Search endpoint and HTTP client configuration
    #[serde(default)]
    pub search: SearchConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Locations searched in one batch, in report order
    #[serde(default = "default_locations")]
    pub locations: Vec<LocationQuery>,
}

/// Search endpoint and HTTP client settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Job search endpoint, queried with `q` and `l` parameters
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Search term sent for every location
    #[serde(default = "default_term")]
    pub term: String,
    /// Keywords added to (or excluded from) the search term
    #[serde(default)]
    pub keywords: Vec<KeywordFilter>,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u32,
    /// Maximum number of retries for transient failures
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// Maximum number of requests in flight
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
    /// Number of body lines kept per response
    #[serde(default = "default_preview_lines")]
    pub preview_lines: usize,
}

/// A keyword narrowing the search, e.g. `Python` or `-Java`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordFilter {
    pub name: String,
    #[serde(default = "default_include")]
    pub include: bool,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_base_url() -> String {
    "https://ca.indeed.com/jobs".to_string()
}

fn default_term() -> String {
    "software developer".to_string()
}

fn default_timeout() -> u32 {
    30
}

fn default_max_retries() -> u32 {
    2
}

fn default_concurrency() -> usize {
    5
}

fn default_preview_lines() -> usize {
    5
}

fn default_include() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_locations() -> Vec<LocationQuery> {
    [("Ottawa", "ON"), ("Vancouver", "BC"), ("Halifax", "NS")]
        .into_iter()
        .map(|(city, region)| LocationQuery {
            city: city.to_string(),
            region: region.to_string(),
        })
        .collect()
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            term: default_term(),
            keywords: Vec::new(),
            timeout_seconds: default_timeout(),
            max_retries: default_max_retries(),
            concurrency: default_concurrency(),
            preview_lines: default_preview_lines(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Default for JobMarketConfig {
    fn default() -> Self {
        Self {
            search: SearchConfig::default(),
            logging: LoggingConfig::default(),
            locations: default_locations(),
        }
    }
}

impl JobMarketConfig {
    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        // An explicit path must exist; the default location is optional
        match config_path {
            Some(path) => {
                builder = builder.add_source(
                    File::from(path.clone())
                        .required(true)
                        .format(config::FileFormat::Toml),
                );
            }
            None => {
                if let Some(path) = Self::get_config_path().filter(|p| p.exists()) {
                    builder = builder.add_source(
                        File::from(path)
                            .required(false)
                            .format(config::FileFormat::Toml),
                    );
                }
            }
        }

        // Environment overrides, e.g. JOBMARKET_SEARCH__CONCURRENCY=8
        builder = builder.add_source(
            Environment::with_prefix("JOBMARKET")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let config: JobMarketConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("jobmarket").join("config.toml"))
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        self.validate_locations()?;
        Ok(())
    }

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.search.timeout_seconds == 0 || self.search.timeout_seconds > 300 {
            return Err(
                JobMarketError::config("Search timeout must be between 1 and 300 seconds").into(),
            );
        }

        if self.search.max_retries > 10 {
            return Err(JobMarketError::config("Search max retries cannot exceed 10").into());
        }

        if self.search.concurrency == 0 || self.search.concurrency > 32 {
            return Err(JobMarketError::config("Concurrency must be between 1 and 32").into());
        }

        if self.search.preview_lines == 0 || self.search.preview_lines > 100 {
            return Err(JobMarketError::config("Preview lines must be between 1 and 100").into());
        }

        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(JobMarketError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(JobMarketError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        if !self.search.base_url.starts_with("http://")
            && !self.search.base_url.starts_with("https://")
        {
            return Err(
                JobMarketError::config("Search base URL must be a valid HTTP or HTTPS URL").into(),
            );
        }

        if self.search.term.trim().is_empty() {
            return Err(JobMarketError::config("Search term cannot be empty").into());
        }

        if self.search.keywords.iter().any(|k| k.name.trim().is_empty()) {
            return Err(JobMarketError::config("Keyword filters cannot be empty").into());
        }

        Ok(())
    }

    /// Every configured location needs a city and a region
    fn validate_locations(&self) -> Result<()> {
        for location in &self.locations {
            location
                .validate()
                .with_context(|| format!("Invalid location entry '{location}'"))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = JobMarketConfig::default();
        assert_eq!(config.search.base_url, "https://ca.indeed.com/jobs");
        assert_eq!(config.search.term, "software developer");
        assert_eq!(config.search.timeout_seconds, 30);
        assert_eq!(config.search.max_retries, 2);
        assert_eq!(config.search.concurrency, 5);
        assert_eq!(config.search.preview_lines, 5);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.locations.len(), 3);
        assert_eq!(config.locations[0].to_string(), "Ottawa, ON");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_invalid_log_level() {
        let mut config = JobMarketConfig::default();
        config.logging.level = "invalid".to_string();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid log level"));
    }

    #[test]
    fn test_config_validation_numeric_ranges() {
        let mut config = JobMarketConfig::default();
        config.search.timeout_seconds = 500;
        let result = config.validate();
        assert!(result.unwrap_err().to_string().contains("timeout must be between"));

        let mut config = JobMarketConfig::default();
        config.search.concurrency = 0;
        let result = config.validate();
        assert!(result.unwrap_err().to_string().contains("Concurrency"));
    }

    #[test]
    fn test_config_validation_base_url() {
        let mut config = JobMarketConfig::default();
        config.search.base_url = "ftp://example.com".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_blank_location() {
        let mut config = JobMarketConfig::default();
        config.locations.push(LocationQuery {
            city: "Calgary".to_string(),
            region: " ".to_string(),
        });
        let err = config.validate().unwrap_err();
        assert!(format!("{err:#}").contains("region cannot be empty"));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[search]
term = "rust developer"
concurrency = 2

[[search.keywords]]
name = "Tokio"

[[search.keywords]]
name = "PHP"
include = false

[[locations]]
city = "Toronto"
region = "ON"
"#
        )
        .unwrap();

        let config = JobMarketConfig::load_from_path(Some(file.path().to_path_buf())).unwrap();
        assert_eq!(config.search.term, "rust developer");
        assert_eq!(config.search.concurrency, 2);
        // untouched values keep their defaults
        assert_eq!(config.search.preview_lines, 5);
        assert_eq!(config.logging.format, "pretty");
        assert_eq!(
            config.search.keywords,
            vec![
                KeywordFilter { name: "Tokio".into(), include: true },
                KeywordFilter { name: "PHP".into(), include: false },
            ]
        );
        assert_eq!(config.locations.len(), 1);
        assert_eq!(config.locations[0].city, "Toronto");
    }

    #[test]
    fn test_load_from_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = JobMarketConfig::load_from_path(Some(dir.path().join("nope.toml")));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[search]\npreview_lines = 0").unwrap();
        let result = JobMarketConfig::load_from_path(Some(file.path().to_path_buf()));
        assert!(result.unwrap_err().to_string().contains("Preview lines"));
    }

    #[test]
    fn test_config_path_generation() {
        if let Some(path) = JobMarketConfig::get_config_path() {
            assert!(path.to_string_lossy().contains("jobmarket"));
            assert!(path.to_string_lossy().ends_with("config.toml"));
        }
    }
}
