//! Config file storage.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info, warn};

use super::app_config::AppConfig;

const CONFIG_FILE_NAME: &str = "config.toml";

/// Config storage failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No per-user config directory exists on this platform.
    #[error("no config directory for this platform; pass --config")]
    NoConfigDir,
    /// Reading or writing the config file failed.
    #[error("{path}: {source}")]
    Io {
        /// File or directory being accessed.
        path: PathBuf,
        /// Underlying failure.
        #[source]
        source: std::io::Error,
    },
    /// The config could not be rendered as TOML.
    #[error("could not render config: {0}")]
    Render(#[from] toml::ser::Error),
}

impl ConfigError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// How [`StorageManager::load_config`] produced its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigOrigin {
    /// Parsed from an existing file.
    File,
    /// No file existed; defaults were written to it.
    Created,
    /// The file did not parse; defaults were used and the file left alone.
    Fallback,
}

/// Owns the location of the gallery's TOML config file.
#[derive(Debug)]
pub struct StorageManager {
    default_path: PathBuf,
}

impl StorageManager {
    /// Points at `config.toml` in the platform config directory.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoConfigDir`] when the platform has no such directory.
    pub fn new() -> Result<Self, ConfigError> {
        AppConfig::default_config_dir()
            .map(Self::with_dir)
            .ok_or(ConfigError::NoConfigDir)
    }

    /// Points at `config.toml` inside `dir`.
    #[must_use]
    pub fn with_dir(dir: PathBuf) -> Self {
        Self {
            default_path: dir.join(CONFIG_FILE_NAME),
        }
    }

    /// Path used when no override is given.
    #[must_use]
    pub fn default_path(&self) -> &Path {
        &self.default_path
    }

    /// Loads the config from `path_override` or the default path.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file exists but cannot be read, or if
    /// writing the defaults for a missing file fails.
    pub fn load_config(&self, path_override: Option<&Path>) -> Result<AppConfig, ConfigError> {
        self.load_with_origin(path_override).map(|(config, _)| config)
    }

    /// Like [`Self::load_config`], also reporting where the values came from.
    ///
    /// # Errors
    ///
    /// See [`Self::load_config`].
    pub fn load_with_origin(
        &self,
        path_override: Option<&Path>,
    ) -> Result<(AppConfig, ConfigOrigin), ConfigError> {
        let path = path_override.unwrap_or(&self.default_path);

        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!(path = %path.display(), "No config file yet, writing defaults");
                let config = AppConfig::default();
                write_atomically(path, &config)?;
                return Ok((config, ConfigOrigin::Created));
            }
            Err(e) => return Err(ConfigError::io(path, e)),
        };

        match toml::from_str::<AppConfig>(&content) {
            Ok(config) => {
                debug!(path = %path.display(), "Config loaded");
                Ok((config, ConfigOrigin::File))
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Config file does not parse, using defaults");
                Ok((AppConfig::default(), ConfigOrigin::Fallback))
            }
        }
    }

    /// Writes `config` to the default path.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be written.
    pub fn save_config(&self, config: &AppConfig) -> Result<(), ConfigError> {
        write_atomically(&self.default_path, config)
    }
}

/// Renders `config` next to `path` and renames it into place.
fn write_atomically(path: &Path, config: &AppConfig) -> Result<(), ConfigError> {
    let rendered = toml::to_string_pretty(config)?;

    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(|e| ConfigError::io(dir, e))?;

    let mut staged = tempfile::NamedTempFile::new_in(dir).map_err(|e| ConfigError::io(dir, e))?;
    staged
        .write_all(rendered.as_bytes())
        .map_err(|e| ConfigError::io(staged.path(), e))?;
    staged
        .persist(path)
        .map_err(|e| ConfigError::io(path, e.error))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::config::SourceKind;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_is_created_with_defaults() {
        let dir = tempdir().unwrap();
        let manager = StorageManager::with_dir(dir.path().join("galeria"));

        let (config, origin) = manager.load_with_origin(None).unwrap();

        assert_eq!(origin, ConfigOrigin::Created);
        assert_eq!(config.gallery.batch_size, 4);
        let written = fs::read_to_string(manager.default_path()).unwrap();
        assert!(written.contains("[gallery]"));
    }

    #[test]
    fn test_unparsable_file_falls_back_and_is_kept() {
        let dir = tempdir().unwrap();
        let manager = StorageManager::with_dir(dir.path().to_path_buf());
        fs::write(manager.default_path(), "batch_size = [").unwrap();

        let (config, origin) = manager.load_with_origin(None).unwrap();

        assert_eq!(origin, ConfigOrigin::Fallback);
        assert_eq!(config.gallery.max_attempts, 5);
        assert_eq!(
            fs::read_to_string(manager.default_path()).unwrap(),
            "batch_size = ["
        );
    }

    #[test]
    fn test_saved_gallery_settings_survive_reload() {
        let dir = tempdir().unwrap();
        let manager = StorageManager::with_dir(dir.path().to_path_buf());

        let mut config = AppConfig::default();
        config.gallery.batch_size = 6;
        config.gallery.alt_text_path = Some(PathBuf::from("/srv/alt_texts.json"));
        manager.save_config(&config).unwrap();

        let (loaded, origin) = manager.load_with_origin(None).unwrap();
        assert_eq!(origin, ConfigOrigin::File);
        assert_eq!(loaded.gallery, config.gallery);
    }

    #[test]
    fn test_override_path_wins_over_default() {
        let dir = tempdir().unwrap();
        let manager = StorageManager::with_dir(dir.path().join("default"));
        let custom = dir.path().join("custom.toml");
        fs::write(&custom, "[gallery]\nsource = \"proxy\"\n").unwrap();

        let config = manager.load_config(Some(&custom)).unwrap();

        assert_eq!(config.gallery.source, SourceKind::Proxy);
        assert!(!manager.default_path().exists());
    }

    #[test]
    fn test_unreadable_path_is_io_error() {
        let dir = tempdir().unwrap();
        let manager = StorageManager::with_dir(dir.path().to_path_buf());

        let err = manager.load_config(Some(dir.path())).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
