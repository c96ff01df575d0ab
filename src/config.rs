//! Timing configuration
//!
//! Loaded from an optional JSON file and then overridden from the
//! environment:
//!
//! ```json
//! { "enabled": true, "log_tag": "PerformanceLogger", "max_buffered_lines": 1000 }
//! ```

use std::env;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::perf::BufferedSink;
use crate::utils::{PerfError, Result};

pub const ENV_ENABLED: &str = "BINIX_PERF_ENABLED";
pub const ENV_LOG_TAG: &str = "BINIX_PERF_LOG_TAG";

/// Settings for the performance logger
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PerfConfig {
    /// When false every timing call is a no-op
    pub enabled: bool,
    /// Sink tag every line is emitted under
    pub log_tag: String,
    /// Capacity of the in-memory line buffer
    pub max_buffered_lines: usize,
}

impl Default for PerfConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            log_tag: "PerformanceLogger".to_string(),
            max_buffered_lines: BufferedSink::DEFAULT_MAX_LINES,
        }
    }
}

impl PerfConfig {
    /// Parse a JSON config; missing fields take defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a JSON config file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Apply `BINIX_PERF_*` overrides from the process environment
    pub fn apply_env(self) -> Result<Self> {
        self.apply_overrides(|var| env::var(var).ok())
    }

    /// Apply overrides from an arbitrary variable lookup
    pub fn apply_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(ENV_ENABLED) {
            self.enabled = parse_bool(&value).ok_or_else(|| PerfError::InvalidEnv {
                var: ENV_ENABLED.to_string(),
                value: value.clone(),
            })?;
        }
        if let Some(tag) = lookup(ENV_LOG_TAG) {
            if !tag.trim().is_empty() {
                self.log_tag = tag;
            }
        }
        Ok(self)
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = PerfConfig::default();
        assert!(config.enabled);
        assert_eq!(config.log_tag, "PerformanceLogger");
        assert_eq!(config.max_buffered_lines, 1000);
    }

    #[test]
    fn test_partial_json_takes_defaults() {
        let config = PerfConfig::from_json_str(r#"{ "enabled": false }"#).unwrap();
        assert!(!config.enabled);
        assert_eq!(config.log_tag, "PerformanceLogger");
    }

    #[test]
    fn test_invalid_json() {
        let err = PerfConfig::from_json_str("{ enabled").unwrap_err();
        assert!(matches!(err, PerfError::Config(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = PerfConfig::from_file("/nonexistent/binix-perf.json").unwrap_err();
        assert!(matches!(err, PerfError::Io(_)));
    }

    #[test]
    fn test_env_overrides() {
        let config = PerfConfig::default()
            .apply_overrides(lookup(&[(ENV_ENABLED, "off"), (ENV_LOG_TAG, "Startup")]))
            .unwrap();
        assert!(!config.enabled);
        assert_eq!(config.log_tag, "Startup");
    }

    #[test]
    fn test_blank_log_tag_ignored() {
        let config = PerfConfig::default()
            .apply_overrides(lookup(&[(ENV_LOG_TAG, "  ")]))
            .unwrap();
        assert_eq!(config.log_tag, "PerformanceLogger");
    }

    #[test]
    fn test_invalid_enabled_override() {
        let err = PerfConfig::default()
            .apply_overrides(lookup(&[(ENV_ENABLED, "maybe")]))
            .unwrap_err();
        assert!(matches!(err, PerfError::InvalidEnv { .. }));
    }
}
