/// Diagnostics: process-wide logger registry.
///
/// The only global state in the crate. The logger lives behind a
/// `OnceLock<RwLock<..>>` and is lazily initialized with [`DefaultLogger`];
/// the severity threshold is a plain atomic so the logging macros can test
/// it without taking the lock.

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{OnceLock, RwLock};
use std::time::SystemTime;
use crate::log::{DefaultLogger, LogEntry, LogSeverity, Logger};

// ===== INTERNAL STATE =====

static LOGGER: OnceLock<RwLock<Box<dyn Logger>>> = OnceLock::new();

/// Entries below this severity are dropped
static MAX_SEVERITY: AtomicU8 = AtomicU8::new(DEFAULT_SEVERITY as u8);

const DEFAULT_SEVERITY: LogSeverity = LogSeverity::Warn;

fn logger() -> &'static RwLock<Box<dyn Logger>> {
    LOGGER.get_or_init(|| RwLock::new(Box::new(DefaultLogger)))
}

// ===== PUBLIC API =====

/// Global logging entry points
///
/// # Example
///
/// ```no_run
/// use scene_geometry::geometry::Diagnostics;
/// use scene_geometry::geometry::log::LogSeverity;
///
/// Diagnostics::set_max_severity(LogSeverity::Debug);
/// Diagnostics::log(LogSeverity::Info, "app", "camera ready".to_string());
/// Diagnostics::reset_logger();
/// ```
pub struct Diagnostics;

impl Diagnostics {
    /// Replace the global logger
    pub fn set_logger<L: Logger + 'static>(logger: L) {
        if let Ok(mut lock) = self::logger().write() {
            *lock = Box::new(logger);
        }
    }

    /// Restore [`DefaultLogger`] and the default threshold (`Warn`)
    pub fn reset_logger() {
        if let Ok(mut lock) = logger().write() {
            *lock = Box::new(DefaultLogger);
        }
        Self::set_max_severity(DEFAULT_SEVERITY);
    }

    /// Least severe level that still reaches the logger
    pub fn set_max_severity(severity: LogSeverity) {
        MAX_SEVERITY.store(severity.to_u8(), Ordering::Relaxed);
    }

    pub fn max_severity() -> LogSeverity {
        LogSeverity::from_u8(MAX_SEVERITY.load(Ordering::Relaxed))
    }

    pub fn enabled(severity: LogSeverity) -> bool {
        severity >= Self::max_severity()
    }

    /// Log without location. Used by `geom_trace!` .. `geom_warn!`.
    pub fn log(severity: LogSeverity, source: &str, message: String) {
        Self::dispatch(severity, source, message, None, None);
    }

    /// Log with file:line. Used by `geom_error!`.
    pub fn log_detailed(
        severity: LogSeverity,
        source: &str,
        message: String,
        file: &'static str,
        line: u32,
    ) {
        Self::dispatch(severity, source, message, Some(file), Some(line));
    }

    fn dispatch(
        severity: LogSeverity,
        source: &str,
        message: String,
        file: Option<&'static str>,
        line: Option<u32>,
    ) {
        if !Self::enabled(severity) {
            return;
        }
        if let Ok(lock) = logger().read() {
            lock.log(&LogEntry {
                severity,
                timestamp: SystemTime::now(),
                source: source.to_string(),
                message,
                file,
                line,
            });
        }
    }
}

#[cfg(test)]
#[path = "diagnostics_tests.rs"]
mod tests;
