//! TOML configuration for the shell.
//!
//! Settings are read once at startup and never written back.  The file lives
//! in the platform config directory unless `--config` names another one:
//! - Windows:  `%APPDATA%\LowRes NX\shell.toml`
//! - Linux:    `~/.config/lowres-nx/shell.toml`
//! - macOS:    `~/Library/Application Support/LowRes NX/shell.toml`
//!
//! Example:
//!
//! ```toml
//! [scheduler]
//! tick_rate_hz = 30
//!
//! [display]
//! window_width = 640
//! window_height = 512
//!
//! [disk]
//! extension = "nx"
//!
//! [logging]
//! level = "info"
//! ```
//!
//! # Serde default values
//!
//! Every field carries `#[serde(default = "some_fn")]`, so a missing file, a
//! missing section, or a missing key all fall back to the built-in value.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform config directory could not be determined.
    #[error("could not determine platform config directory")]
    NoPlatformConfigDir,

    /// A file system I/O error occurred.
    #[error("I/O error accessing config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

// ── Config schema types ───────────────────────────────────────────────────────

/// Top-level shell configuration.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct ShellConfig {
    #[serde(default)]
    pub scheduler: SchedulerConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub disk: DiskConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Frame timing.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SchedulerConfig {
    /// Core frames per second.
    #[serde(default = "default_tick_rate_hz")]
    pub tick_rate_hz: u32,
}

/// Initial window size in pixels.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct DisplayConfig {
    #[serde(default = "default_window_width")]
    pub window_width: u32,
    #[serde(default = "default_window_height")]
    pub window_height: u32,
}

/// Disk image files.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct DiskConfig {
    /// File extension of disk images, without the dot.
    #[serde(default = "default_extension")]
    pub extension: String,
}

/// Log output.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LoggingConfig {
    /// `tracing` level: `"error"`, `"warn"`, `"info"`, `"debug"`, `"trace"`.
    /// `RUST_LOG` takes precedence.
    #[serde(default = "default_log_level")]
    pub level: String,
}

// ── Default helpers ───────────────────────────────────────────────────────────

fn default_tick_rate_hz() -> u32 {
    30
}
fn default_window_width() -> u32 {
    640
}
fn default_window_height() -> u32 {
    512
}
fn default_extension() -> String {
    "nx".to_string()
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            tick_rate_hz: default_tick_rate_hz(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            window_width: default_window_width(),
            window_height: default_window_height(),
        }
    }
}

impl Default for DiskConfig {
    fn default() -> Self {
        Self {
            extension: default_extension(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

// ── Loading ───────────────────────────────────────────────────────────────────

/// Resolves the full path to the default config file.
///
/// # Errors
///
/// Returns [`ConfigError::NoPlatformConfigDir`] if the base directory cannot be
/// determined.
pub fn config_file_path() -> Result<PathBuf, ConfigError> {
    platform_config_dir()
        .map(|dir| dir.join("shell.toml"))
        .ok_or(ConfigError::NoPlatformConfigDir)
}

/// Parses configuration text.
///
/// # Errors
///
/// Returns [`ConfigError::Parse`] if the TOML is malformed or a value has the
/// wrong type.
pub fn parse_config(content: &str) -> Result<ShellConfig, ConfigError> {
    Ok(toml::from_str(content)?)
}

/// Loads the configuration.
///
/// With `explicit`, that file must exist.  Without it, the platform config
/// file is used, and a missing file (or platform directory) yields
/// `ShellConfig::default()`.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system errors and
/// [`ConfigError::Parse`] if the TOML is malformed.
pub fn load_config(explicit: Option<&Path>) -> Result<ShellConfig, ConfigError> {
    if let Some(path) = explicit {
        return read_config(path);
    }
    let path = match config_file_path() {
        Ok(path) => path,
        Err(ConfigError::NoPlatformConfigDir) => return Ok(ShellConfig::default()),
        Err(e) => return Err(e),
    };
    match read_config(&path) {
        Err(ConfigError::Io { source, .. }) if source.kind() == std::io::ErrorKind::NotFound => {
            Ok(ShellConfig::default())
        }
        other => other,
    }
}

fn read_config(path: &Path) -> Result<ShellConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&content)
}

/// Resolves the platform config directory for the shell.
fn platform_config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        std::env::var_os("APPDATA").map(|p| PathBuf::from(p).join("LowRes NX"))
    }

    #[cfg(target_os = "linux")]
    {
        // XDG_CONFIG_HOME or ~/.config
        let base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))?;
        Some(base.join("lowres-nx"))
    }

    #[cfg(target_os = "macos")]
    {
        std::env::var_os("HOME").map(|h| {
            PathBuf::from(h)
                .join("Library")
                .join("Application Support")
                .join("LowRes NX")
        })
    }

    #[cfg(not(any(target_os = "windows", target_os = "linux", target_os = "macos")))]
    {
        None
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_matches_documented_values() {
        // Arrange / Act
        let cfg = ShellConfig::default();

        // Assert
        assert_eq!(cfg.scheduler.tick_rate_hz, 30);
        assert_eq!(cfg.display.window_width, 640);
        assert_eq!(cfg.display.window_height, 512);
        assert_eq!(cfg.disk.extension, "nx");
        assert_eq!(cfg.logging.level, "info");
    }

    #[test]
    fn test_empty_file_yields_defaults() {
        assert_eq!(parse_config("").unwrap(), ShellConfig::default());
    }

    #[test]
    fn test_partial_file_keeps_defaults_for_missing_keys() {
        // Arrange
        let text = "[scheduler]\ntick_rate_hz = 60\n\n[display]\nwindow_width = 1024\n";

        // Act
        let cfg = parse_config(text).unwrap();

        // Assert
        assert_eq!(cfg.scheduler.tick_rate_hz, 60);
        assert_eq!(cfg.display.window_width, 1024);
        assert_eq!(cfg.display.window_height, 512);
        assert_eq!(cfg.disk, DiskConfig::default());
    }

    #[test]
    fn test_malformed_toml_is_a_parse_error() {
        let result = parse_config("[scheduler\ntick_rate_hz = ");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_wrong_value_type_is_a_parse_error() {
        let result = parse_config("[disk]\nextension = 5\n");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_explicit_missing_file_is_an_io_error() {
        let path = std::env::temp_dir().join(format!("nx-shell-{}.toml", uuid::Uuid::new_v4()));
        let result = load_config(Some(&path));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn test_explicit_file_is_read() {
        // Arrange
        let path = std::env::temp_dir().join(format!("nx-shell-{}.toml", uuid::Uuid::new_v4()));
        std::fs::write(&path, "[disk]\nextension = \"nxd\"\n").unwrap();

        // Act
        let cfg = load_config(Some(&path)).unwrap();

        // Assert
        assert_eq!(cfg.disk.extension, "nxd");
        let _ = std::fs::remove_file(path);
    }
}
