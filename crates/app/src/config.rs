//! Application configuration loaded from environment variables.

use std::path::PathBuf;
use std::str::FromStr;

use domain::StockPolicy;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("unknown log format: {other}")),
        }
    }
}

/// A variable was set to a value that cannot be parsed.
#[derive(Debug, Error)]
#[error("invalid value for {var}: {reason}")]
pub struct ConfigError {
    pub var: &'static str,
    pub reason: String,
}

/// Application configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `RUST_LOG` — tracing filter directive (default: `"info"`)
/// - `LOG_FORMAT` — `pretty` or `json` (default: `pretty`)
/// - `STOCK_POLICY` — `reject-overdraw` or `reject-empty` (default: `reject-overdraw`)
/// - `CATALOG_PATH` — JSON file with customers and products to preload (default: none)
/// - `METRICS_PATH` — file to write Prometheus metrics to on exit (default: none)
#[derive(Debug, Clone)]
pub struct Config {
    pub log_level: String,
    pub log_format: LogFormat,
    pub stock_policy: StockPolicy,
    pub catalog_path: Option<PathBuf>,
    pub metrics_path: Option<PathBuf>,
}

impl Config {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Loads configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let value = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

        let log_level = value("RUST_LOG").unwrap_or(defaults.log_level);
        EnvFilter::try_new(&log_level).map_err(|err| ConfigError {
            var: "RUST_LOG",
            reason: format!("{log_level:?}: {err}"),
        })?;

        Ok(Self {
            log_level,
            log_format: parse_or(value("LOG_FORMAT"), "LOG_FORMAT", defaults.log_format)?,
            stock_policy: parse_or(value("STOCK_POLICY"), "STOCK_POLICY", defaults.stock_policy)?,
            catalog_path: value("CATALOG_PATH").map(PathBuf::from),
            metrics_path: value("METRICS_PATH").map(PathBuf::from),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::default(),
            stock_policy: StockPolicy::default(),
            catalog_path: None,
            metrics_path: None,
        }
    }
}

fn parse_or<T>(raw: Option<String>, var: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr<Err = String>,
{
    match raw {
        Some(raw) => raw.parse().map_err(|reason| ConfigError { var, reason }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var| map.get(var).cloned()
    }

    #[test]
    fn test_default_values() {
        let config = Config::default();
        assert_eq!(config.log_level, "info");
        assert_eq!(config.log_format, LogFormat::Pretty);
        assert_eq!(config.stock_policy, StockPolicy::RejectOverdraw);
        assert!(config.catalog_path.is_none());
    }

    #[test]
    fn test_empty_environment_uses_defaults() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.log_level, "info");
        assert_eq!(config.stock_policy, StockPolicy::RejectOverdraw);
    }

    #[test]
    fn test_reads_all_variables() {
        let config = Config::from_lookup(lookup(&[
            ("RUST_LOG", "domain=debug"),
            ("LOG_FORMAT", "json"),
            ("STOCK_POLICY", "reject-empty"),
            ("CATALOG_PATH", "/tmp/catalog.json"),
            ("METRICS_PATH", "/tmp/metrics.prom"),
        ]))
        .unwrap();

        assert_eq!(config.log_level, "domain=debug");
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.stock_policy, StockPolicy::RejectEmpty);
        assert_eq!(config.catalog_path, Some(PathBuf::from("/tmp/catalog.json")));
        assert_eq!(config.metrics_path, Some(PathBuf::from("/tmp/metrics.prom")));
    }

    #[test]
    fn test_blank_values_count_as_unset() {
        let config = Config::from_lookup(lookup(&[("STOCK_POLICY", "  "), ("CATALOG_PATH", "")]))
            .unwrap();
        assert_eq!(config.stock_policy, StockPolicy::RejectOverdraw);
        assert!(config.catalog_path.is_none());
    }

    #[test]
    fn test_invalid_policy_is_an_error() {
        let err = Config::from_lookup(lookup(&[("STOCK_POLICY", "yolo")])).unwrap_err();
        assert_eq!(err.var, "STOCK_POLICY");
        assert!(err.to_string().contains("yolo"));
    }

    #[test]
    fn test_invalid_log_filter_is_an_error() {
        let err = Config::from_lookup(lookup(&[("RUST_LOG", "domain=loud")])).unwrap_err();
        assert_eq!(err.var, "RUST_LOG");
        assert!(err.to_string().contains("domain=loud"));
    }

    #[test]
    fn test_valid_log_filter_directives_are_accepted() {
        for directive in ["debug", "warn,domain=trace", "app=info,domain::order=debug"] {
            let config = Config::from_lookup(lookup(&[("RUST_LOG", directive)])).unwrap();
            assert_eq!(config.log_level, directive);
        }
    }
}
