//! CLI entry point for the image fetcher.

use std::io::{self, BufRead, IsTerminal, Write};

use anyhow::{Context, Result};
use clap::Parser;
use image_fetcher::batch::write_closing;
use image_fetcher::{Pipeline, run_batch, split_urls};
use tracing::{debug, info};

mod cli;

use cli::Args;

const WELCOME: &str = "Welcome to the Ubuntu Image Fetcher";
const TAGLINE: &str = "A tool for mindfully collecting images from the web";
const PROMPT: &str = "Please enter one or more image URLs (separated by commas): ";

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (warn)
    let default_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    debug!(?args, "CLI arguments parsed");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "{WELCOME}")?;
    writeln!(out, "{TAGLINE}\n")?;

    let input = if args.urls.is_empty() {
        read_input_line(&mut out)?
    } else {
        args.urls.join(",")
    };

    let urls = split_urls(&input);
    info!(urls = urls.len(), "parsed input");

    let pipeline = Pipeline::new(&args.fetch_config());
    let summary = run_batch(&pipeline, &urls, &mut out).await?;
    write_closing(&summary, &mut out)?;

    // Per-URL failures are reported above; the process itself succeeded.
    Ok(())
}

/// Reads one line of comma-separated URLs, prompting when stdin is a terminal.
fn read_input_line<W: Write>(out: &mut W) -> Result<String> {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        write!(out, "{PROMPT}")?;
        out.flush()?;
    }
    let mut line = String::new();
    stdin
        .lock()
        .read_line(&mut line)
        .context("failed to read URLs from stdin")?;
    Ok(line)
}
