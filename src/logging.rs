//! Logging bootstrap.
//!
//! Library code only emits `tracing` events. Applications that want to see
//! them call [`init_tracing`] once at startup.

use std::fmt;
use std::io;
use std::str::FromStr;

use jast_core::AstError;

/// Verbosity used when `RUST_LOG` is not set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    #[default]
    Warn,
    Error,
}

impl LogLevel {
    pub fn to_tracing_level(self) -> tracing::Level {
        match self {
            LogLevel::Trace => tracing::Level::TRACE,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = AstError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            other => Err(AstError::InvalidArgument {
                message: format!("unknown log level '{other}'"),
            }),
        }
    }
}

/// Install a formatting subscriber writing to stderr.
///
/// `RUST_LOG` takes precedence over `level`. Calling this a second time is
/// a no-op: the first subscriber stays installed.
pub fn init_tracing(level: LogLevel) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.to_tracing_level().to_string()));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_mapping() {
        assert_eq!(LogLevel::Trace.to_tracing_level(), tracing::Level::TRACE);
        assert_eq!(LogLevel::Debug.to_tracing_level(), tracing::Level::DEBUG);
        assert_eq!(LogLevel::Info.to_tracing_level(), tracing::Level::INFO);
        assert_eq!(LogLevel::Warn.to_tracing_level(), tracing::Level::WARN);
        assert_eq!(LogLevel::Error.to_tracing_level(), tracing::Level::ERROR);
    }

    #[test]
    fn test_parse_level() {
        assert_eq!("DEBUG".parse::<LogLevel>().unwrap(), LogLevel::Debug);
        assert_eq!("warning".parse::<LogLevel>().unwrap(), LogLevel::Warn);
        for level in [LogLevel::Trace, LogLevel::Info, LogLevel::Error] {
            assert_eq!(level.to_string().parse::<LogLevel>().unwrap(), level);
        }
        let err = "loud".parse::<LogLevel>().unwrap_err();
        assert_eq!(jast_core::ErrorKind::from(&err), jast_core::ErrorKind::InvalidArgument);
    }

    #[test]
    fn test_init_twice_is_harmless() {
        init_tracing(LogLevel::Error);
        init_tracing(LogLevel::Trace);
        tracing::debug!("after init");
    }
}
