//! Logger setup on top of `simplelog`.
//!
//! Conversion logs to stderr (and optionally a file). The viewer owns the
//! screen in raw mode, so it only ever logs to a file.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use log::LevelFilter;
use simplelog::{
    ColorChoice, CombinedLogger, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};

/// Where log records may go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    /// stderr, plus the log file if one is configured
    Terminal,
    /// The log file only; nothing is logged without one
    FileOnly,
}

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("Failed to open log file '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Logger already initialized: {0}")]
    AlreadySet(#[from] log::SetLoggerError),
}

fn log_config() -> simplelog::Config {
    ConfigBuilder::new()
        .set_target_level(LevelFilter::Off)
        .set_thread_level(LevelFilter::Off)
        .build()
}

/// Install the global logger. Call once, before any work.
pub fn init(level: LevelFilter, file: Option<&Path>, target: LogTarget) -> Result<(), LoggingError> {
    let mut loggers: Vec<Box<dyn SharedLogger>> = Vec::new();

    if target == LogTarget::Terminal {
        loggers.push(TermLogger::new(
            level,
            log_config(),
            TerminalMode::Stderr,
            ColorChoice::Auto,
        ));
    }

    if let Some(path) = file {
        let io_err = |source| LoggingError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let file = File::create(path).map_err(io_err)?;
        loggers.push(WriteLogger::new(level, log_config(), file));
    }

    if loggers.is_empty() {
        return Ok(());
    }
    CombinedLogger::init(loggers)?;
    Ok(())
}

/// Effective level: `-v` wins over `-q`, both win over the configured level.
pub fn effective_level(configured: LevelFilter, verbose: bool, quiet: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else if quiet {
        LevelFilter::Error
    } else {
        configured
    }
}
