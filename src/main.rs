use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, error};

use jobmarket::report::{self, OutputFormat};
use jobmarket::{BatchRunner, HttpJobFetcher, JobMarketConfig, JobMarketError, LocationQuery};

/// Job market snapshot: previews job search results per city and region
#[derive(Parser, Debug)]
#[command(name = "jobmarket", version, about)]
struct Cli {
    /// Path to a TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Location to search as CITY,REGION; repeat to search several.
    /// Replaces the configured locations.
    #[arg(short, long = "location", value_name = "CITY,REGION")]
    locations: Vec<LocationQuery>,

    /// Job search endpoint
    #[arg(long)]
    base_url: Option<String>,

    /// Maximum number of requests in flight
    #[arg(long)]
    concurrency: Option<usize>,

    /// Number of body lines to show per location
    #[arg(long)]
    preview_lines: Option<usize>,

    /// Request timeout in seconds
    #[arg(long)]
    timeout: Option<u32>,

    /// Report format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    /// Command line values win over file and environment
    fn apply_overrides(&self, config: &mut JobMarketConfig) {
        if !self.locations.is_empty() {
            config.locations = self.locations.clone();
        }
        if let Some(base_url) = &self.base_url {
            config.search.base_url = base_url.clone();
        }
        if let Some(concurrency) = self.concurrency {
            config.search.concurrency = concurrency;
        }
        if let Some(preview_lines) = self.preview_lines {
            config.search.preview_lines = preview_lines;
        }
        if let Some(timeout) = self.timeout {
            config.search.timeout_seconds = timeout;
        }
        if self.verbose {
            config.logging.level = "debug".to_string();
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            let message = e
                .downcast_ref::<JobMarketError>()
                .map_or_else(|| format!("{e:#}"), JobMarketError::user_message);
            eprintln!("Error: {message}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = JobMarketConfig::load_from_path(cli.config.clone())?;
    cli.apply_overrides(&mut config);
    config.validate()?;

    jobmarket::logging::init(&config.logging);
    debug!("Using config: {:?}", config);

    let fetcher = HttpJobFetcher::new(config.search.clone())?;
    let runner = BatchRunner::new(Arc::new(fetcher), config.search.concurrency);

    let shutdown = async {
        if tokio::signal::ctrl_c().await.is_err() {
            std::future::pending::<()>().await;
        }
    };

    let stdout = std::io::stdout();
    let mut write_error: Option<std::io::Error> = None;
    let report = runner
        .run_until(&config.locations, shutdown, |result| {
            if cli.format == OutputFormat::Text && write_error.is_none() {
                if let Err(e) = report::write_result(&mut stdout.lock(), result) {
                    write_error = Some(e);
                }
            }
        })
        .await;

    if let Some(e) = write_error {
        return Err(JobMarketError::from(e)).context("Failed to write report");
    }

    let mut out = stdout.lock();
    let written = match cli.format {
        OutputFormat::Text => report::write_summary(&mut out, &report),
        OutputFormat::Json => report::write_report(&mut out, &report, OutputFormat::Json),
    };
    written
        .map_err(JobMarketError::from)
        .context("Failed to write report")?;
    out.flush().context("Failed to flush report")?;

    Ok(())
}
