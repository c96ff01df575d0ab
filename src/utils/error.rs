//! Error types for binix-perf
//!
//! Timing operations themselves never fail; these errors only come from the
//! configuration surface.

use thiserror::Error;

/// Main error type for binix-perf operations
#[derive(Debug, Error)]
pub enum PerfError {
    /// Reading a config file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Config file contents could not be parsed
    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),
    /// An environment override held a value we do not understand
    #[error("Invalid value for {var}: {value:?}")]
    InvalidEnv { var: String, value: String },
}

/// Convenience Result type for binix-perf operations
pub type Result<T> = std::result::Result<T, PerfError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_env_display() {
        let err = PerfError::InvalidEnv {
            var: "BINIX_PERF_ENABLED".to_string(),
            value: "maybe".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid value for BINIX_PERF_ENABLED: \"maybe\""
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: PerfError = io.into();
        assert!(matches!(err, PerfError::Io(_)));
        assert!(err.to_string().starts_with("I/O error"));
    }
}
