use std::{
    io::{self, Write as _},
    sync::{OnceLock, PoisonError, RwLock},
};

use colored::{Color, Colorize as _};
use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};

static LOGGER: OnceLock<AppLogger> = OnceLock::new();

pub fn get_logger() -> &'static AppLogger {
    // default configuration
    const DEFAULT_LEVEL: LevelFilter = LevelFilter::Warn;

    LOGGER.get_or_init(|| AppLogger::new(DEFAULT_LEVEL))
}

/// Installs the app logger with the given minimum level.
pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
    log::set_logger(get_logger())?;
    log::set_max_level(LevelFilter::Trace);
    get_logger().set_min_level(level);
    Ok(())
}

/// Writes records to stderr as `LEVEL source -> message`.
pub struct AppLogger {
    min_level: RwLock<LevelFilter>,
}

impl AppLogger {
    fn new(min_level: LevelFilter) -> Self {
        Self {
            min_level: RwLock::new(min_level),
        }
    }

    pub fn min_level(&self) -> LevelFilter {
        *self.min_level.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn set_min_level(&self, level: LevelFilter) {
        *self.min_level.write().unwrap_or_else(PoisonError::into_inner) = level;
    }

    pub fn format(level: log::Level, source: &str, message: &str) -> String {
        let color = match level {
            log::Level::Error => Color::Red,
            log::Level::Warn => Color::Yellow,
            log::Level::Info => Color::White,
            log::Level::Debug => Color::Blue,
            log::Level::Trace => Color::BrightBlack,
        };

        format!(
            "{} {} -> {}",
            format!("{:>5}", level.as_str()).color(color),
            source.dimmed(),
            message
        )
    }
}

impl Log for AppLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.min_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let line = Self::format(
                record.level(),
                record.module_path().unwrap_or("unknown"),
                &record.args().to_string(),
            );
            // nowhere to report a failed write to stderr
            let _ = writeln!(io::stderr().lock(), "{line}");
        }
    }

    fn flush(&self) {
        let _ = io::stderr().flush();
    }
}

#[cfg(test)]
mod tests {
    use log::{Level, Metadata};

    use super::*;

    #[test]
    fn filters_by_min_level() {
        let logger = AppLogger::new(LevelFilter::Info);
        let meta = |level| Metadata::builder().level(level).build();

        assert!(logger.enabled(&meta(Level::Error)));
        assert!(logger.enabled(&meta(Level::Info)));
        assert!(!logger.enabled(&meta(Level::Debug)));

        logger.set_min_level(LevelFilter::Off);
        assert!(!logger.enabled(&meta(Level::Error)));
    }

    #[test]
    fn line_format() {
        let line = AppLogger::format(Level::Warn, "gridmaze::app", "no path");
        assert!(line.contains(" WARN"));
        assert!(line.contains("gridmaze::app"));
        assert!(line.ends_with(" -> no path"));
    }
}
