//! Logging convenience helpers.

/// Log message prefix used across the crate's `log` calls.
pub const LOG_PREFIX: &str = "ORGANIZER LINK";

/// Verbosity levels for the engine's own diagnostics.
///
/// Distinct from [`log::LevelFilter`] so callers driving the decoder/sender
/// from a non-Rust host (or a simple CLI flag count) have a small closed set
/// to pick from.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    Off = 0,
    Error = 1,
    Warn = 2,
    Info = 3,
    Debug = 4,
    Trace = 5,
}

impl From<u8> for LogLevel {
    fn from(level: u8) -> Self {
        match level {
            0 => Self::Off,
            1 => Self::Error,
            2 => Self::Warn,
            3 => Self::Info,
            4 => Self::Debug,
            _ => Self::Trace,
        }
    }
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => log::LevelFilter::Off,
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}
