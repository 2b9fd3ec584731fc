//! Runtime settings resolved from the command line and the environment
//!
//! Command-line flags take precedence over environment variables.

use crate::error::{CliError, CliResult};

pub const PRECISION_VAR: &str = "METRICA_PRECISION";
pub const LOG_VAR: &str = "METRICA_LOG";
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Settings shared by every subcommand
#[derive(Debug, Clone, PartialEq)]
pub struct CliConfig {
    /// Decimal places for displayed results; `None` prints the shortest exact form
    pub precision: Option<usize>,
    /// Whether to emit ANSI colors
    pub color: bool,
    /// `tracing` filter directive
    pub log_filter: String,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            precision: None,
            color: true,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl CliConfig {
    /// Resolve settings from the process environment
    pub fn from_env(precision: Option<usize>, no_color: bool) -> CliResult<Self> {
        Self::resolve(precision, no_color, |key| std::env::var(key).ok())
    }

    /// Resolve settings, reading variables through `env`
    pub fn resolve<F>(precision: Option<usize>, no_color: bool, env: F) -> CliResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let precision = match precision {
            Some(p) => Some(p),
            None => match env(PRECISION_VAR) {
                Some(raw) if !raw.trim().is_empty() => {
                    Some(raw.trim().parse::<usize>().map_err(|_| CliError::Config {
                        what: format!("{} must be a non-negative integer, got '{}'", PRECISION_VAR, raw),
                    })?)
                }
                _ => None,
            },
        };

        // NO_COLOR disables color whatever its value, see no-color.org
        let color = !no_color && env("NO_COLOR").is_none();

        let log_filter = env(LOG_VAR)
            .or_else(|| env("RUST_LOG"))
            .filter(|f| !f.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        Ok(Self {
            precision,
            color,
            log_filter,
        })
    }
}
