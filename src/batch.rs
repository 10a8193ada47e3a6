//! Batch driver: split the input line, run the pipeline per URL, report.
//!
//! URLs are processed one after another. A failure on one URL is reported and
//! the next URL is processed as usual.

use std::io::{self, Write};

use tracing::{debug, info};

use crate::fetch::{FetchError, FetchOutcome, Pipeline, SeenDigests, SkipReason, UrlReport};

/// Closing line printed after every batch.
pub const CLOSING_MESSAGE: &str = "Connection strengthened. Community enriched.";

/// Counts of per-URL outcomes for one batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    saved: usize,
    skipped: usize,
    failed: usize,
}

impl BatchSummary {
    /// Images written to disk.
    #[must_use]
    pub fn saved(&self) -> usize {
        self.saved
    }

    /// URLs rejected by policy (not an image, too large, duplicate).
    #[must_use]
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// URLs that hit a network, HTTP or write error.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.failed
    }

    /// Total URLs processed.
    #[must_use]
    pub fn total(&self) -> usize {
        self.saved + self.skipped + self.failed
    }

    fn record(&mut self, outcome: &FetchOutcome) {
        match outcome {
            FetchOutcome::Saved(_) => self.saved += 1,
            FetchOutcome::Skipped(_) => self.skipped += 1,
            FetchOutcome::Failed(_) => self.failed += 1,
        }
    }
}

/// Splits a comma-separated input line into trimmed, non-empty URL candidates.
///
/// # Examples
///
/// ```
/// use image_fetcher::batch::split_urls;
///
/// assert_eq!(split_urls(" a.com/x.png, ,b.com/y.gif,"), vec!["a.com/x.png", "b.com/y.gif"]);
/// ```
#[must_use]
pub fn split_urls(input: &str) -> Vec<&str> {
    input
        .split(',')
        .map(str::trim)
        .filter(|candidate| !candidate.is_empty())
        .collect()
}

/// Runs `pipeline` over every URL in order, writing status lines to `out`.
///
/// The digest set lives for the duration of this call, so duplicates are only
/// detected within one batch.
///
/// # Errors
///
/// Returns an error only if writing to `out` fails.
pub async fn run_batch<W: Write>(
    pipeline: &Pipeline,
    urls: &[&str],
    out: &mut W,
) -> io::Result<BatchSummary> {
    let mut seen = SeenDigests::new();
    let mut summary = BatchSummary::default();

    for (index, raw_url) in urls.iter().enumerate() {
        debug!(index, url = %raw_url, "processing URL");
        let report = pipeline.run(raw_url, &mut seen).await;
        summary.record(&report.outcome);
        for line in status_lines(&report) {
            writeln!(out, "{line}")?;
        }
    }

    info!(
        saved = summary.saved(),
        skipped = summary.skipped(),
        failed = summary.failed(),
        total = summary.total(),
        "batch complete"
    );
    Ok(summary)
}

/// Writes the closing tally and message.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn write_closing<W: Write>(summary: &BatchSummary, out: &mut W) -> io::Result<()> {
    writeln!(out)?;
    writeln!(
        out,
        "Fetched {}, skipped {}, failed {}.",
        summary.saved(),
        summary.skipped(),
        summary.failed()
    )?;
    writeln!(out, "{CLOSING_MESSAGE}")
}

/// Human-readable status lines for one URL.
#[must_use]
pub fn status_lines(report: &UrlReport) -> Vec<String> {
    let url = &report.url;
    let mut lines = Vec::with_capacity(2);
    if report.is_insecure() {
        lines.push(format!(
            "⚠️ Warning: {url} is not using HTTPS. Proceed with caution."
        ));
    }
    match &report.outcome {
        FetchOutcome::Saved(saved) => {
            lines.push(format!("✓ Successfully fetched: {}", saved.filename));
            lines.push(format!("✓ Image saved to {}", saved.path.display()));
        }
        FetchOutcome::Skipped(reason @ SkipReason::TooLarge { .. }) => {
            lines.push(format!("⚠️ Skipped {url} ({reason})"));
        }
        FetchOutcome::Skipped(reason) => {
            lines.push(format!("✗ Skipped {url} ({reason})"));
        }
        FetchOutcome::Failed(error @ FetchError::Io { .. }) => {
            lines.push(format!("✗ Could not save {url}: {error}"));
        }
        FetchOutcome::Failed(error) => {
            lines.push(format!("✗ Connection error for {url}: {error}"));
        }
    }
    lines
}
