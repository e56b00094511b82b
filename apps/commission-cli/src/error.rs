//! # CLI Error Type
//!
//! Unified error type for the scenario runner.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  std::io::Error (reading scenario)  ──┐                                │
//! │  serde_json::Error (parsing)        ──┤                                │
//! │  ConfigError (environment)          ──┼──► CliError ──► main() ──► exit │
//! │  CommissionError (calculation)      ──┘                                │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use commission_core::CommissionError;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors surfaced by the `commission` binary.
#[derive(Debug, Error)]
pub enum CliError {
    /// Scenario file could not be read.
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Scenario JSON is malformed, or an amount is not numeric.
    #[error("Invalid scenario: {0}")]
    Json(#[from] serde_json::Error),

    /// Environment configuration is invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The calculation itself failed.
    #[error(transparent)]
    Commission(#[from] CommissionError),
}

pub type CliResult<T> = Result<T, CliError>;
