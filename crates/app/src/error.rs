//! Application error types.

use std::path::PathBuf;

use domain::DomainError;
use metrics_exporter_prometheus::BuildError;
use thiserror::Error;

use crate::config::ConfigError;

/// Failures that stop the binary without producing an order outcome.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be parsed.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Input was not valid JSON for the expected shape.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A store failed while handling the request.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// The metrics recorder could not be installed.
    #[error("failed to install metrics recorder: {0}")]
    Metrics(#[from] BuildError),
}
