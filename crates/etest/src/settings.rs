//! Session settings
//!
//! Settings are layered, later sources overriding earlier ones:
//! 1. Defaults (no directories, no log file, tracing on)
//! 2. Environment variables (`ETEST_*`)
//! 3. Command-line arguments
//!
//! Runtime setter calls on the [`Session`](crate::Session) come last. Paths are
//! taken as given; nothing checks that directories exist.

use crate::error::{SettingsError, SettingsResult};
use clap::Parser;
use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Directory for fixture files (ETEST_INPUT_DIR)
pub const ENV_INPUT_DIR: &str = "ETEST_INPUT_DIR";
/// Directory the log file is written to (ETEST_OUTPUT_DIR)
pub const ENV_OUTPUT_DIR: &str = "ETEST_OUTPUT_DIR";
/// Log file name (ETEST_LOG_FILE)
pub const ENV_LOG_FILE: &str = "ETEST_LOG_FILE";
/// Echo log lines to the console (ETEST_TRACE, defaults to true)
pub const ENV_TRACE: &str = "ETEST_TRACE";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Where fixture files are looked up
    pub input_dir: Option<PathBuf>,
    /// Where the log file lives
    pub output_dir: Option<PathBuf>,
    /// Log file name; `None` logs to the console only
    pub log_file: Option<PathBuf>,
    /// Echo log lines to the console and enable trace output
    pub trace_messages: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            input_dir: None,
            output_dir: None,
            log_file: None,
            trace_messages: true,
        }
    }
}

impl Settings {
    /// Defaults overridden by `ETEST_*` environment variables
    pub fn from_env() -> SettingsResult<Self> {
        Self::default().with_env()
    }

    /// Defaults overridden by command-line arguments
    ///
    /// `args` includes the program name, as `std::env::args_os()` does.
    pub fn from_args<I, T>(args: I) -> SettingsResult<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Self::default().with_args(args)
    }

    /// Apply `ETEST_*` environment overrides on top of these settings
    pub fn with_env(mut self) -> SettingsResult<Self> {
        if let Some(dir) = env::var_os(ENV_INPUT_DIR) {
            self.input_dir = Some(PathBuf::from(dir));
        }
        if let Some(dir) = env::var_os(ENV_OUTPUT_DIR) {
            self.output_dir = Some(PathBuf::from(dir));
        }
        if let Some(file) = env::var_os(ENV_LOG_FILE) {
            self.log_file = Some(PathBuf::from(file));
        }
        if let Some(trace) = env::var_os(ENV_TRACE) {
            let trace = trace.into_string().map_err(|_| SettingsError::InvalidEnv {
                var: ENV_TRACE,
                reason: "not valid unicode".to_string(),
            })?;
            self.trace_messages = parse_switch(ENV_TRACE, &trace)?;
        }
        Ok(self)
    }

    /// Apply command-line overrides on top of these settings
    pub fn with_args<I, T>(self, args: I) -> SettingsResult<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let args = SettingsArgs::try_parse_from(args)?;
        Ok(args.apply(self))
    }

    /// Full log file path: `output_dir/log_file`, or `log_file` alone
    pub fn log_path(&self) -> Option<PathBuf> {
        let log_file = self.log_file.as_ref()?;
        Some(match &self.output_dir {
            Some(dir) => dir.join(log_file),
            None => log_file.clone(),
        })
    }

    /// Resolve a fixture name against `input_dir`
    pub fn input_path(&self, name: impl AsRef<Path>) -> PathBuf {
        resolve(self.input_dir.as_deref(), name.as_ref())
    }

    /// Resolve a file name against `output_dir`
    pub fn output_path(&self, name: impl AsRef<Path>) -> PathBuf {
        resolve(self.output_dir.as_deref(), name.as_ref())
    }
}

fn resolve(dir: Option<&Path>, name: &Path) -> PathBuf {
    match dir {
        Some(dir) => dir.join(name),
        None => name.to_path_buf(),
    }
}

fn parse_switch(var: &'static str, value: &str) -> SettingsResult<bool> {
    match value.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(SettingsError::InvalidEnv {
            var,
            reason: format!("expected a boolean, got '{}'", other),
        }),
    }
}

/// Command-line settings
///
/// Accepts `--input_folder=<dir> --output_folder=<dir> --log_file=<file>` (or
/// the hyphenated spellings) and `--no-trace`. Flatten it into a larger
/// `clap` parser to expose the same flags from another binary.
#[derive(Parser, Debug, Clone, Default, PartialEq, Eq)]
#[command(name = "etest")]
pub struct SettingsArgs {
    /// Directory containing fixture files
    #[arg(long = "input_folder", visible_alias = "input-folder", value_name = "DIR")]
    pub input_folder: Option<PathBuf>,

    /// Directory the log file is written to
    #[arg(long = "output_folder", visible_alias = "output-folder", value_name = "DIR")]
    pub output_folder: Option<PathBuf>,

    /// Append log lines to this file
    #[arg(long = "log_file", visible_alias = "log-file", value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Only echo log lines to the console when the log file is unavailable
    #[arg(long = "no-trace")]
    pub no_trace: bool,
}

impl SettingsArgs {
    /// Override `settings` with every flag that was given
    pub fn apply(&self, mut settings: Settings) -> Settings {
        if let Some(dir) = &self.input_folder {
            settings.input_dir = Some(dir.clone());
        }
        if let Some(dir) = &self.output_folder {
            settings.output_dir = Some(dir.clone());
        }
        if let Some(file) = &self.log_file {
            settings.log_file = Some(file.clone());
        }
        if self.no_trace {
            settings.trace_messages = false;
        }
        settings
    }
}
