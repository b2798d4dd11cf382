//! Tracing subscriber setup

use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

/// Install the global subscriber. Logs go to stderr so the report on stdout
/// stays clean; `RUST_LOG` wins over the configured level when set.
pub fn init(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(&logging.level)));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    // A subscriber may already be set (tests, embedding); keep the first one.
    let _ = match logging.format.as_str() {
        "json" => builder.json().try_init(),
        _ => builder.try_init(),
    };
}

/// Our own crate at `level`, dependencies one notch quieter
fn default_directive(level: &str) -> String {
    let deps = match level {
        "trace" | "debug" => "info",
        _ => "warn",
    };
    format!("{deps},jobmarket={level}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive() {
        assert_eq!(default_directive("info"), "warn,jobmarket=info");
        assert_eq!(default_directive("debug"), "info,jobmarket=debug");
    }

    #[test]
    fn test_init_twice_does_not_panic() {
        let logging = LoggingConfig::default();
        init(&logging);
        init(&logging);
    }
}
