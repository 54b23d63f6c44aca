//! Minimal leveled logging, in the same spirit as the `log!`/`LogLevel`
//! facility threaded through the tracer: no external logging crate, just an
//! env-var-controlled level check plus `eprintln!`.

use std::env;

#[derive(Copy, Clone, Eq, PartialEq, PartialOrd, Ord, Debug)]
pub enum LogLevel {
    LogOff = 0,
    LogError = 1,
    LogWarn = 2,
    LogInfo = 3,
    LogDebug = 4,
}

impl LogLevel {
    fn name(self) -> &'static str {
        match self {
            LogLevel::LogOff => "off",
            LogLevel::LogError => "error",
            LogLevel::LogWarn => "warn",
            LogLevel::LogInfo => "info",
            LogLevel::LogDebug => "debug",
        }
    }

    fn parse(s: &str) -> Option<LogLevel> {
        match s.to_ascii_lowercase().as_str() {
            "off" => Some(LogLevel::LogOff),
            "error" => Some(LogLevel::LogError),
            "warn" | "warning" => Some(LogLevel::LogWarn),
            "info" => Some(LogLevel::LogInfo),
            "debug" => Some(LogLevel::LogDebug),
            _ => None,
        }
    }
}

lazy_static::lazy_static! {
    static ref CURRENT_LEVEL: LogLevel = init_level();
}

fn init_level() -> LogLevel {
    match env::var("SHADOW_TRACER_LOG") {
        Ok(val) => LogLevel::parse(&val).unwrap_or(LogLevel::LogWarn),
        Err(_) => LogLevel::LogWarn,
    }
}

/// Not part of the public logging surface; used by the `log!` macro.
pub fn enabled(level: LogLevel) -> bool {
    level <= *CURRENT_LEVEL
}

pub fn level_name(level: LogLevel) -> &'static str {
    level.name()
}

#[macro_export]
macro_rules! log {
    ($level:expr, $($arg:tt)*) => {
        if $crate::log::enabled($level) {
            eprintln!("[{}] {}", $crate::log::level_name($level), format!($($arg)*));
        }
    };
}
