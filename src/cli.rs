//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::Parser;

use image_fetcher::FetchConfig;
use image_fetcher::fetch::{DEFAULT_SAVE_DIR, MAX_IMAGE_BYTES};

/// Mindfully fetch images from the web and save them locally.
///
/// URLs are taken from the arguments, or from one comma-separated line on
/// stdin. Non-images, oversized files and repeated content are skipped.
#[derive(Parser, Debug)]
#[command(name = "image-fetcher")]
#[command(author, version, about)]
pub struct Args {
    /// Image URLs (comma-separated lists are accepted too)
    pub urls: Vec<String>,

    /// Directory to save images into (created if missing)
    #[arg(short, long, default_value = DEFAULT_SAVE_DIR)]
    pub output_dir: PathBuf,

    /// Largest accepted image in bytes
    #[arg(long, default_value_t = MAX_IMAGE_BYTES, value_parser = clap::value_parser!(u64).range(1..))]
    pub max_bytes: u64,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    /// Pipeline settings derived from the flags.
    pub fn fetch_config(&self) -> FetchConfig {
        FetchConfig {
            output_dir: self.output_dir.clone(),
            max_bytes: self.max_bytes,
            ..FetchConfig::default()
        }
    }
}
