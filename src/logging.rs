//! Process-wide logging bootstrap.
//!
//! The terminal front-end owns stdout/stderr, so desktop builds log to
//! rotated files under the data directory. Android builds hand records to
//! logcat instead.

use anyhow::{Result, anyhow};
use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use log::info;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

const LOG_FILE_BASENAME: &str = "dailynews";
const MAX_LOG_FILE_SIZE_BYTES: u64 = 2 * 1024 * 1024;
const MAX_LOG_FILES: usize = 3;

static LOGGING_STATE: OnceLock<LoggingState> = OnceLock::new();

struct LoggingState {
    log_dir: PathBuf,
    _logger: LoggerHandle,
}

/// Starts file logging in `log_dir`. Later calls are no-ops that report the
/// directory already in use.
pub fn init_logging(level: &str, log_dir: &Path) -> Result<PathBuf> {
    if let Some(state) = LOGGING_STATE.get() {
        return Ok(state.log_dir.clone());
    }

    let logger = Logger::try_with_str(level)
        .map_err(|e| anyhow!("invalid log level `{}`: {}", level, e))?
        .log_to_file(
            FileSpec::default()
                .directory(log_dir)
                .basename(LOG_FILE_BASENAME),
        )
        .rotate(
            Criterion::Size(MAX_LOG_FILE_SIZE_BYTES),
            Naming::Numbers,
            Cleanup::KeepLogFiles(MAX_LOG_FILES),
        )
        .write_mode(WriteMode::BufferAndFlush)
        .append()
        .format_for_files(flexi_logger::detailed_format)
        .start()
        .map_err(|e| anyhow!("failed to start logger: {}", e))?;

    let state = LOGGING_STATE.get_or_init(|| LoggingState {
        log_dir: log_dir.to_path_buf(),
        _logger: logger,
    });

    info!(
        "event=app_start platform={} version={} log_dir={}",
        std::env::consts::OS,
        env!("CARGO_PKG_VERSION"),
        state.log_dir.display()
    );
    Ok(state.log_dir.clone())
}

#[cfg(target_os = "android")]
pub fn init_android_logging(level: &str) {
    use android_logger::Config as LogConfig;
    use log::LevelFilter;

    let filter = level.parse::<LevelFilter>().unwrap_or(LevelFilter::Info);
    android_logger::init_once(
        LogConfig::default()
            .with_max_level(filter)
            .with_tag("DailyNewsRust"),
    );
}
