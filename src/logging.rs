//! Log output. The terminal belongs to the game, so logs only go to a file.

use anyhow::{anyhow, Context, Result};
use clap::ValueEnum;
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing::Level;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => Level::ERROR,
            LogLevel::Warn => Level::WARN,
            LogLevel::Info => Level::INFO,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Trace => Level::TRACE,
        }
    }
}

/// Install a global subscriber appending to `log_file`; no-op without a file
pub fn init(log_file: Option<&Path>, level: LogLevel) -> Result<()> {
    let Some(path) = log_file else {
        return Ok(());
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {:?}", path))?;

    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(Level::from(level))
        .try_init()
        .map_err(|e| anyhow!("Failed to install log subscriber: {e}"))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_mapping() {
        assert_eq!(Level::from(LogLevel::Info), Level::INFO);
        assert_eq!(Level::from(LogLevel::Trace), Level::TRACE);
        assert_eq!(LogLevel::default(), LogLevel::Info);
    }

    #[test]
    fn test_no_file_is_noop() {
        assert!(init(None, LogLevel::Debug).is_ok());
    }

    #[test]
    fn test_unwritable_path_errors() {
        let dir = tempfile::tempdir().unwrap();
        let bad = dir.path().join("missing").join("game.log");
        assert!(init(Some(&bad), LogLevel::Info).is_err());
    }
}
