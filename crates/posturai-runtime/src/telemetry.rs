//! Logging setup

use tracing_subscriber::EnvFilter;

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Install the global tracing subscriber.
///
/// Honours `RUST_LOG`, defaulting to `info`. Returns false if a
/// subscriber was already installed; the existing one is kept.
pub fn init_logging(format: LogFormat) -> bool {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let installed = match format {
        LogFormat::Pretty => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    installed.is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    // The only test in this binary that installs a global subscriber
    #[test]
    fn test_first_init_installs_second_is_noop() {
        assert!(init_logging(LogFormat::Json));
        assert!(!init_logging(LogFormat::Pretty));
        assert!(!init_logging(LogFormat::Json));
    }
}
