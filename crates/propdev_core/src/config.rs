//! Runtime configuration for the core crate.
//!
//! # Responsibility
//! - Hold validated logging settings (level + directory).
//! - Read overrides from the process environment.
//!
//! # Invariants
//! - A constructed `LoggingConfig` always has a supported level and an
//!   absolute, non-empty log directory.

use std::path::{Path, PathBuf};

/// Environment variable naming the log directory. Logging stays off when unset.
pub const ENV_LOG_DIR: &str = "PROPDEV_LOG_DIR";
/// Environment variable overriding the log level.
pub const ENV_LOG_LEVEL: &str = "PROPDEV_LOG_LEVEL";

/// Validated logging settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    level: &'static str,
    log_dir: PathBuf,
}

impl LoggingConfig {
    /// Builds a config from a level name and a directory path.
    ///
    /// # Errors
    /// - Returns an error when `level` is unsupported.
    /// - Returns an error when `log_dir` is empty or non-absolute.
    pub fn new(level: &str, log_dir: &str) -> Result<Self, String> {
        Ok(Self {
            level: normalize_level(level)?,
            log_dir: normalize_log_dir(log_dir)?,
        })
    }

    /// Reads `PROPDEV_LOG_DIR` and `PROPDEV_LOG_LEVEL`.
    ///
    /// Returns `None` when no log directory is configured.
    pub fn from_env() -> Option<Result<Self, String>> {
        Self::resolve(None, None)
    }

    /// Resolves explicit values first, then the environment.
    ///
    /// Returns `None` when neither source names a log directory.
    pub fn resolve(level: Option<&str>, log_dir: Option<&str>) -> Option<Result<Self, String>> {
        let env_dir = std::env::var(ENV_LOG_DIR).ok();
        let log_dir = log_dir.map(str::to_string).or(env_dir)?;
        let level = match level {
            Some(level) => level.to_string(),
            None => std::env::var(ENV_LOG_LEVEL)
                .ok()
                .filter(|value| !value.trim().is_empty())
                .unwrap_or_else(|| default_log_level().to_string()),
        };
        Some(Self::new(&level, &log_dir))
    }

    pub fn level(&self) -> &'static str {
        self.level
    }

    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }
}

/// Returns the default log level for current build mode.
///
/// - `debug` builds -> `debug`
/// - `release` builds -> `info`
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

fn normalize_level(level: &str) -> Result<&'static str, String> {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok("trace"),
        "debug" => Ok("debug"),
        "info" => Ok("info"),
        "warn" | "warning" => Ok("warn"),
        "error" => Ok("error"),
        other => Err(format!(
            "unsupported log level `{other}`; expected trace|debug|info|warn|error"
        )),
    }
}

fn normalize_log_dir(log_dir: &str) -> Result<PathBuf, String> {
    let trimmed = log_dir.trim();
    if trimmed.is_empty() {
        return Err("log_dir cannot be empty".to_string());
    }
    let path = Path::new(trimmed);
    if !path.is_absolute() {
        return Err(format!("log_dir must be an absolute path, got `{trimmed}`"));
    }
    Ok(path.to_path_buf())
}
