//! CLI configuration via environment variables
//!
//! Harness settings (`ETEST_*`) are read by `etest::Settings::from_env`; this
//! covers what only the binary cares about.

use std::env;

/// CLI configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Disable colored output (ETEST_NO_COLOR=1 or NO_COLOR=1)
    pub no_color: bool,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            no_color: env::var_os("ETEST_NO_COLOR").is_some() || env::var_os("NO_COLOR").is_some(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
