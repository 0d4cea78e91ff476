//! Configuration management for daylog

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default chrono pattern for record timestamps, e.g. `2024-03-01T09:15:42+0700`
pub const DEFAULT_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%z";

/// Logger configuration
///
/// Owned by a [`crate::logging::Logger`]. Every field may be changed between
/// log calls through `Logger::config_mut`; the next call sees the new value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LogConfig {
    /// IANA time zone name used for timestamps and the day file name
    #[serde(default = "default_time_zone")]
    pub time_zone: String,

    /// chrono strftime pattern for the record timestamp
    #[serde(default = "default_time_format")]
    pub time_format: String,

    /// Directory holding the `<YYYY-MM-DD>.log` files
    #[serde(default = "default_path")]
    pub path: PathBuf,

    /// Append a plain copy of every record to the day's log file
    #[serde(default = "default_true")]
    pub create_log_file: bool,

    /// Print the colorized line to the terminal
    #[serde(default = "default_true")]
    pub debug_mode: bool,

    /// Trailing path segments kept in the location (<= 0 keeps all)
    #[serde(default = "default_nested_location_level")]
    pub nested_location_level: i32,

    /// Include the function name in both renderings
    #[serde(default = "default_true")]
    pub log_func_name: bool,

    /// Trailing `::` segments kept in the function name (<= 0 keeps all)
    #[serde(default = "default_nested_func_level")]
    pub nested_func_level: i32,
}

fn default_time_zone() -> String {
    "Asia/Jakarta".to_string()
}

fn default_time_format() -> String {
    DEFAULT_TIME_FORMAT.to_string()
}

fn default_path() -> PathBuf {
    PathBuf::from("./logs")
}

fn default_true() -> bool {
    true
}

fn default_nested_location_level() -> i32 {
    1 // file name only
}

fn default_nested_func_level() -> i32 {
    2 // module::function
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            time_zone: default_time_zone(),
            time_format: default_time_format(),
            path: default_path(),
            create_log_file: true,
            debug_mode: true,
            nested_location_level: default_nested_location_level(),
            log_func_name: true,
            nested_func_level: default_nested_func_level(),
        }
    }
}

impl LogConfig {
    /// Load configuration from a TOML file, or return defaults if it does not exist
    pub fn load(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file {}", path.display()))?;
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse config file {}", path.display()))
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to a TOML file, creating its parent directory
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content).context("Failed to write config file")?;
        Ok(())
    }

    /// Log directory with `~` and environment variables expanded
    ///
    /// Falls back to the raw path when expansion fails (unset variable, non UTF-8 path).
    pub fn expanded_path(&self) -> PathBuf {
        let Some(raw) = self.path.to_str() else {
            return self.path.clone();
        };
        match shellexpand::full(raw) {
            Ok(expanded) => PathBuf::from(expanded.into_owned()),
            Err(e) => {
                tracing::debug!("Could not expand log path {}: {}", raw, e);
                self.path.clone()
            }
        }
    }
}

/// Default location of the config file (`<config dir>/daylog/config.toml`)
/// Falls back to ./daylog.toml if the platform config directory cannot be determined
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join("daylog").join("config.toml"))
        .unwrap_or_else(|| {
            tracing::warn!("Could not determine config directory, using current directory");
            PathBuf::from("daylog.toml")
        })
}
