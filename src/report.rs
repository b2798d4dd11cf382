//! Text and JSON rendering of fetch results

use std::io::Write;

use clap::ValueEnum;

use crate::models::{BatchReport, FetchResult};

/// Output format of the batch report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// One human-readable block per location
    #[default]
    Text,
    /// The whole report as pretty-printed JSON
    Json,
}

/// Write one result as a text block
pub fn write_result<W: Write>(out: &mut W, result: &FetchResult) -> std::io::Result<()> {
    writeln!(out, "== {} ==", result.query)?;
    if let Some(url) = &result.url {
        writeln!(out, "URL: {url}")?;
    }
    if let Some(status) = result.status {
        writeln!(out, "Status: {} ({} ms)", status, result.elapsed_ms)?;
    }
    for line in &result.preview {
        writeln!(out, "  | {line}")?;
    }
    if let Some(error) = &result.error {
        writeln!(out, "Failed: {error}")?;
    }
    writeln!(out)
}

/// Closing line of a text report
pub fn write_summary<W: Write>(out: &mut W, report: &BatchReport) -> std::io::Result<()> {
    writeln!(
        out,
        "{} locations: {} succeeded, {} failed",
        report.len(),
        report.succeeded(),
        report.failed()
    )
}

/// Write the full report in the given format
pub fn write_report<W: Write>(
    out: &mut W,
    report: &BatchReport,
    format: OutputFormat,
) -> std::io::Result<()> {
    match format {
        OutputFormat::Text => {
            for result in &report.results {
                write_result(out, result)?;
            }
            write_summary(out, report)
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, report)?;
            writeln!(out)
        }
    }
}
