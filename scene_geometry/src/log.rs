//! Diagnostic logging for scene_geometry
//!
//! The geometry core itself is silent; logging happens at the few places
//! where a caller may want to know that something unusual went through:
//! frustum reconfiguration, transforms that produce non-finite planes,
//! rejected checked queries and culling passes.
//!
//! - Pluggable sink via the [`Logger`] trait
//! - Severity levels with a global threshold (see `Diagnostics`)
//! - Colored console output by default
//! - File and line information for ERROR entries

use colored::*;
use std::fmt;
use std::time::SystemTime;
use chrono::{DateTime, Local};

/// Sink for log entries
///
/// # Example
///
/// ```no_run
/// use scene_geometry::geometry::log::{Logger, LogEntry};
///
/// struct StderrLogger;
///
/// impl Logger for StderrLogger {
///     fn log(&self, entry: &LogEntry) {
///         eprintln!("{}: {}", entry.source, entry.message);
///     }
/// }
/// ```
pub trait Logger: Send + Sync {
    fn log(&self, entry: &LogEntry);
}

/// One log record
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub severity: LogSeverity,

    /// When the entry was created
    pub timestamp: SystemTime,

    /// Emitting component (e.g. "geometry::Frustum")
    pub source: String,

    pub message: String,

    /// Source file (ERROR entries only)
    pub file: Option<&'static str>,

    /// Source line (ERROR entries only)
    pub line: Option<u32>,
}

/// Log severity levels, ordered from most to least verbose
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LogSeverity {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogSeverity {
    pub const ALL: [LogSeverity; 5] = [
        LogSeverity::Trace,
        LogSeverity::Debug,
        LogSeverity::Info,
        LogSeverity::Warn,
        LogSeverity::Error,
    ];

    /// Five-character label used in console output
    pub fn label(&self) -> &'static str {
        match self {
            LogSeverity::Trace => "TRACE",
            LogSeverity::Debug => "DEBUG",
            LogSeverity::Info => "INFO ",
            LogSeverity::Warn => "WARN ",
            LogSeverity::Error => "ERROR",
        }
    }

    pub(crate) fn to_u8(self) -> u8 {
        self as u8
    }

    pub(crate) fn from_u8(value: u8) -> Self {
        match value {
            0 => LogSeverity::Trace,
            1 => LogSeverity::Debug,
            2 => LogSeverity::Info,
            3 => LogSeverity::Warn,
            _ => LogSeverity::Error,
        }
    }
}

impl fmt::Display for LogSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label().trim_end())
    }
}

/// Colored console logger
///
/// Format:
/// - `[timestamp] [SEVERITY] [source] message`
/// - `[timestamp] [ERROR] [source] message (file:line)` when a location is set
pub struct DefaultLogger;

impl DefaultLogger {
    /// Render an entry the way `log` prints it
    pub fn format_entry(entry: &LogEntry) -> String {
        let datetime: DateTime<Local> = entry.timestamp.into();
        let timestamp = datetime.format("%Y-%m-%d %H:%M:%S%.3f");

        let label = entry.severity.label();
        let severity = match entry.severity {
            LogSeverity::Trace => label.bright_black(),
            LogSeverity::Debug => label.cyan(),
            LogSeverity::Info => label.green(),
            LogSeverity::Warn => label.yellow(),
            LogSeverity::Error => label.red().bold(),
        };
        let source = entry.source.bright_blue();

        match (entry.file, entry.line) {
            (Some(file), Some(line)) => format!(
                "[{}] [{}] [{}] {} ({}:{})",
                timestamp, severity, source, entry.message, file, line
            ),
            _ => format!("[{}] [{}] [{}] {}", timestamp, severity, source, entry.message),
        }
    }
}

impl Logger for DefaultLogger {
    fn log(&self, entry: &LogEntry) {
        println!("{}", Self::format_entry(entry));
    }
}

// ===== LOGGING MACROS =====
//
// Each macro checks the global threshold before formatting, so disabled
// levels cost one atomic load.

/// Log a TRACE message
///
/// ```no_run
/// scene_geometry::geom_trace!("geometry::Culler", "{} spheres tested", 12);
/// ```
#[macro_export]
macro_rules! geom_trace {
    ($source:expr, $($arg:tt)*) => {
        if $crate::geometry::Diagnostics::enabled($crate::geometry::log::LogSeverity::Trace) {
            $crate::geometry::Diagnostics::log(
                $crate::geometry::log::LogSeverity::Trace,
                $source,
                format!($($arg)*),
            )
        }
    };
}

/// Log a DEBUG message
#[macro_export]
macro_rules! geom_debug {
    ($source:expr, $($arg:tt)*) => {
        if $crate::geometry::Diagnostics::enabled($crate::geometry::log::LogSeverity::Debug) {
            $crate::geometry::Diagnostics::log(
                $crate::geometry::log::LogSeverity::Debug,
                $source,
                format!($($arg)*),
            )
        }
    };
}

/// Log an INFO message
#[macro_export]
macro_rules! geom_info {
    ($source:expr, $($arg:tt)*) => {
        if $crate::geometry::Diagnostics::enabled($crate::geometry::log::LogSeverity::Info) {
            $crate::geometry::Diagnostics::log(
                $crate::geometry::log::LogSeverity::Info,
                $source,
                format!($($arg)*),
            )
        }
    };
}

/// Log a WARN message
#[macro_export]
macro_rules! geom_warn {
    ($source:expr, $($arg:tt)*) => {
        if $crate::geometry::Diagnostics::enabled($crate::geometry::log::LogSeverity::Warn) {
            $crate::geometry::Diagnostics::log(
                $crate::geometry::log::LogSeverity::Warn,
                $source,
                format!($($arg)*),
            )
        }
    };
}

/// Log an ERROR message with file:line information
///
/// ```no_run
/// scene_geometry::geom_error!("geometry::Frustum", "rejected: {}", "near == far");
/// ```
#[macro_export]
macro_rules! geom_error {
    ($source:expr, $($arg:tt)*) => {
        if $crate::geometry::Diagnostics::enabled($crate::geometry::log::LogSeverity::Error) {
            $crate::geometry::Diagnostics::log_detailed(
                $crate::geometry::log::LogSeverity::Error,
                $source,
                format!($($arg)*),
                file!(),
                line!(),
            )
        }
    };
}

#[cfg(test)]
#[path = "log_tests.rs"]
mod tests;
