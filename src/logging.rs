use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::model::config::LogConfig;

/// Environment variable holding an EnvFilter directive
pub const LOG_ENV: &str = "TECTASK_LOG";

/// Where diagnostics go
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    /// CLI commands: stderr, keeping stdout for output
    Stderr,
    /// TUI: a file, since the terminal is being drawn on
    File(PathBuf),
}

impl LogTarget {
    /// File target from config, defaulting to tectask.log in `default_dir`
    pub fn file_from_config(config: &LogConfig, default_dir: &Path) -> LogTarget {
        let path = config
            .file
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(|| default_dir.join("tectask.log"));
        LogTarget::File(path)
    }
}

/// Build the filter: TECTASK_LOG if set and valid, else the config level
pub fn build_filter(env_value: Option<&str>, default_level: &str) -> EnvFilter {
    env_value
        .and_then(|directive| EnvFilter::try_new(directive).ok())
        .or_else(|| EnvFilter::try_new(default_level).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

/// Install the global tracing subscriber
pub fn init(target: &LogTarget, config: &LogConfig) -> Result<(), Box<dyn std::error::Error>> {
    let env_value = std::env::var(LOG_ENV).ok();
    let filter = build_filter(env_value.as_deref(), &config.level);

    match target {
        LogTarget::Stderr => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .with_target(false)
                .try_init()
                .map_err(|e| e as Box<dyn std::error::Error>)?;
        }
        LogTarget::File(path) => {
            let file = open_log_file(path)?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .try_init()
                .map_err(|e| e as Box<dyn std::error::Error>)?;
        }
    }
    Ok(())
}

fn open_log_file(path: &Path) -> Result<fs::File, std::io::Error> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn env_directive_overrides_config_level() {
        let filter = build_filter(Some("tectask=trace"), "warn");
        assert_eq!(filter.to_string(), "tectask=trace");
    }

    #[test]
    fn invalid_env_directive_falls_back_to_config() {
        let filter = build_filter(Some("tectask=notalevel"), "warn");
        assert_eq!(filter.to_string(), "warn");
    }

    #[test]
    fn file_target_uses_configured_path() {
        let config = LogConfig {
            level: "debug".into(),
            file: Some("/tmp/tectask-test.log".into()),
        };
        assert_eq!(
            LogTarget::file_from_config(&config, Path::new("/elsewhere")),
            LogTarget::File(PathBuf::from("/tmp/tectask-test.log"))
        );
    }

    #[test]
    fn default_log_file_sits_in_given_dir() {
        let config = LogConfig::default();
        assert_eq!(
            LogTarget::file_from_config(&config, Path::new("/srv/tectask")),
            LogTarget::File(PathBuf::from("/srv/tectask/tectask.log"))
        );
    }

    #[test]
    fn log_file_parent_is_created() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nested/dir/tectask.log");
        open_log_file(&path).unwrap();
        assert!(path.exists());
    }
}
