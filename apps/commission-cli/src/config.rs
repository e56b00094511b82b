//! CLI configuration module.
//!
//! Configuration is loaded from environment variables with fallback to defaults.
//! Command-line flags override whatever is loaded here.
//!
//! | Variable             | Default | Meaning                                  |
//! |----------------------|---------|------------------------------------------|
//! | `COMMISSION_LOG`     | `info`  | tracing filter (`RUST_LOG` wins if set)  |
//! | `COMMISSION_PRETTY`  | `true`  | pretty-print the JSON report             |
//! | `COMMISSION_MAX_FEE` | unset   | veto rules whose fee exceeds this amount |

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;

/// Scenario runner configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Tracing filter directive, e.g. `info` or `commission_core=debug`
    pub log_filter: String,

    /// Pretty-print the JSON report
    pub pretty: bool,

    /// Rules whose calculated fee exceeds this are vetoed
    pub max_fee: Option<Decimal>,
}

impl Default for CliConfig {
    fn default() -> Self {
        CliConfig {
            log_filter: "info".to_string(),
            pretty: true,
            max_fee: None,
        }
    }
}

impl CliConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = CliConfig::default();

        let config = CliConfig {
            log_filter: lookup("COMMISSION_LOG")
                .filter(|value| !value.trim().is_empty())
                .unwrap_or(defaults.log_filter),

            pretty: match lookup("COMMISSION_PRETTY") {
                Some(value) => parse_bool(&value)
                    .ok_or_else(|| ConfigError::InvalidValue("COMMISSION_PRETTY".to_string()))?,
                None => defaults.pretty,
            },

            max_fee: lookup("COMMISSION_MAX_FEE")
                .map(|value| {
                    parse_max_fee(&value)
                        .map_err(|_| ConfigError::InvalidValue("COMMISSION_MAX_FEE".to_string()))
                })
                .transpose()?,
        };

        Ok(config)
    }
}

/// Parses a max-fee amount. Shared by `COMMISSION_MAX_FEE` and `--max-fee`.
pub fn parse_max_fee(value: &str) -> Result<Decimal, String> {
    let fee = Decimal::from_str(value.trim()).map_err(|err| format!("not an amount: {err}"))?;
    if fee.is_sign_negative() {
        return Err(format!("must not be negative: {fee}"));
    }
    Ok(fee)
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}
