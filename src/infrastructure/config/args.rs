use super::app_config::{LogLevel, SourceKind};
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Default, Parser)]
#[command(
    name = "galeria",
    version,
    about = "Terminal photo gallery with batched, retrying image loads",
    long_about = None
)]
pub struct CliArgs {
    /// Configuration file path.
    #[arg(short, long, value_name = "PATH", env = "GALERIA_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[arg(long, value_name = "PATH", env = "GALERIA_LOG_PATH")]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[arg(long, value_enum, env = "GALERIA_LOG_LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Origin of the gallery API.
    #[arg(long, value_name = "URL", env = "GALERIA_API_BASE_URL")]
    pub api_base_url: Option<String>,

    /// Image source.
    #[arg(long, value_enum, env = "GALERIA_SOURCE")]
    pub source: Option<SourceKind>,

    /// CDN base for the direct source.
    #[arg(long, value_name = "URL", env = "GALERIA_CDN_BASE_URL")]
    pub cdn_base_url: Option<String>,

    /// Images loaded concurrently per batch.
    #[arg(long)]
    pub batch_size: Option<usize>,

    /// Pause between batches, in milliseconds.
    #[arg(long)]
    pub batch_delay_ms: Option<u64>,

    /// Attempts per image, first one included.
    #[arg(long)]
    pub max_attempts: Option<u32>,

    /// JSON file mapping image ids to alt text.
    #[arg(long, value_name = "PATH", env = "GALERIA_ALT_TEXT_PATH")]
    pub alt_text_path: Option<PathBuf>,

    /// Load once, print a summary, and exit.
    #[arg(long)]
    pub headless: bool,
}
