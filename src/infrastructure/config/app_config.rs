//! Application configuration.

use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::services::{BackoffPolicy, BatchCoordinator};
use crate::domain::entities::{DEFAULT_CDN_BASE, SourceStrategy};

use super::args::CliArgs;

pub(crate) const APP_NAME: &str = "galeria";
pub(crate) const APP_QUALIFIER: &str = "com";
pub(crate) const APP_ORGANIZATION: &str = "galeria";

/// Log level configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level.
    Trace,
    /// Debug level.
    Debug,
    /// Info level.
    #[default]
    Info,
    /// Warning level.
    Warn,
    /// Error level.
    Error,
}

impl LogLevel {
    /// Converts to tracing level.
    #[must_use]
    pub const fn to_tracing_level(self) -> tracing::Level {
        match self {
            Self::Trace => tracing::Level::TRACE,
            Self::Debug => tracing::Level::DEBUG,
            Self::Info => tracing::Level::INFO,
            Self::Warn => tracing::Level::WARN,
            Self::Error => tracing::Level::ERROR,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Trace => write!(f, "trace"),
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Where gallery images are fetched from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Straight from the CDN.
    #[default]
    Direct,
    /// Through the API's image proxy.
    Proxy,
}

/// Application configuration.
#[derive(Debug, Serialize, Deserialize)]
pub struct AppConfig {
    /// Configuration file path.
    #[serde(skip)]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[serde(default)]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Gallery settings.
    #[serde(default)]
    pub gallery: GallerySettings,
}

/// Gallery loading settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GallerySettings {
    /// Origin of the gallery API.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Path of the image list endpoint.
    #[serde(default = "default_metadata_path")]
    pub metadata_path: String,

    /// Image source.
    #[serde(default)]
    pub source: SourceKind,

    /// CDN base for the direct source.
    #[serde(default = "default_cdn_base_url")]
    pub cdn_base_url: String,

    /// Images loaded concurrently per batch.
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Pause between batches, in milliseconds.
    #[serde(default = "default_batch_delay_ms")]
    pub batch_delay_ms: u64,

    /// Attempts per image, first one included.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Per-request timeout, in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Decoded images kept in memory.
    #[serde(default = "default_memory_cache_size")]
    pub memory_cache_size: usize,

    /// Optional JSON file mapping image ids to alt text.
    #[serde(default)]
    pub alt_text_path: Option<PathBuf>,
}

fn default_api_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_metadata_path() -> String {
    "/api/images".to_string()
}

fn default_cdn_base_url() -> String {
    DEFAULT_CDN_BASE.to_string()
}

const fn default_batch_size() -> usize {
    4
}

const fn default_batch_delay_ms() -> u64 {
    1000
}

const fn default_max_attempts() -> u32 {
    5
}

const fn default_request_timeout_secs() -> u64 {
    30
}

const fn default_memory_cache_size() -> usize {
    50
}

impl Default for GallerySettings {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            metadata_path: default_metadata_path(),
            source: SourceKind::default(),
            cdn_base_url: default_cdn_base_url(),
            batch_size: default_batch_size(),
            batch_delay_ms: default_batch_delay_ms(),
            max_attempts: default_max_attempts(),
            request_timeout_secs: default_request_timeout_secs(),
            memory_cache_size: default_memory_cache_size(),
            alt_text_path: None,
        }
    }
}

impl GallerySettings {
    /// Clamps values that would stall the pipeline.
    #[must_use]
    pub fn sanitized(mut self) -> Self {
        self.batch_size = self.batch_size.max(1);
        self.max_attempts = self.max_attempts.max(1);
        self.request_timeout_secs = self.request_timeout_secs.max(1);
        self.memory_cache_size = self.memory_cache_size.max(1);
        self
    }

    /// Full URL of the image list endpoint.
    #[must_use]
    pub fn metadata_url(&self) -> String {
        let base = self.api_base_url.trim_end_matches('/');
        let path = self.metadata_path.trim_start_matches('/');
        format!("{base}/{path}")
    }

    /// Source strategy for gallery slots.
    #[must_use]
    pub fn strategy(&self) -> SourceStrategy {
        match self.source {
            SourceKind::Direct => SourceStrategy::Direct {
                cdn_base: self.cdn_base_url.clone(),
            },
            SourceKind::Proxy => SourceStrategy::Proxy {
                api_base: self.api_base_url.clone(),
            },
        }
    }

    /// Backoff policy with the configured attempt ceiling.
    #[must_use]
    pub fn backoff_policy(&self) -> BackoffPolicy {
        BackoffPolicy::with_max_attempts(self.max_attempts)
    }

    /// Batch coordinator with the configured size and delay.
    #[must_use]
    pub fn coordinator(&self) -> BatchCoordinator {
        BatchCoordinator::new(self.batch_size, Duration::from_millis(self.batch_delay_ms))
    }

    /// Per-request timeout.
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl AppConfig {
    /// Merges CLI arguments into the configuration.
    pub fn merge_with_args(&mut self, args: &CliArgs) {
        if let Some(config_path) = &args.config {
            self.config = Some(config_path.clone());
        }
        if let Some(log_path) = &args.log_path {
            self.log_path = Some(log_path.clone());
        }
        if let Some(log_level) = args.log_level {
            self.log_level = log_level;
        }
        if let Some(api_base_url) = &args.api_base_url {
            self.gallery.api_base_url.clone_from(api_base_url);
        }
        if let Some(source) = args.source {
            self.gallery.source = source;
        }
        if let Some(cdn_base_url) = &args.cdn_base_url {
            self.gallery.cdn_base_url.clone_from(cdn_base_url);
        }
        if let Some(batch_size) = args.batch_size {
            self.gallery.batch_size = batch_size;
        }
        if let Some(batch_delay_ms) = args.batch_delay_ms {
            self.gallery.batch_delay_ms = batch_delay_ms;
        }
        if let Some(max_attempts) = args.max_attempts {
            self.gallery.max_attempts = max_attempts;
        }
        if let Some(alt_text_path) = &args.alt_text_path {
            self.gallery.alt_text_path = Some(alt_text_path.clone());
        }
    }

    /// Returns default config directory.
    #[must_use]
    pub fn default_config_dir() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Returns default log file path.
    #[must_use]
    pub fn default_log_path() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.data_dir().join("galeria.log"))
    }

    /// Returns effective log path.
    #[must_use]
    pub fn effective_log_path(&self) -> Option<PathBuf> {
        self.log_path.clone().or_else(Self::default_log_path)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            config: None,
            log_path: None,
            log_level: LogLevel::Info,
            gallery: GallerySettings::default(),
        }
    }
}
