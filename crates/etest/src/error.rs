//! Error types
//!
//! Loader, settings and assertion failures. None of these abort a run: the
//! harness logs them and moves on to the next test.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Fixture loading errors
///
/// The display strings are the diagnostics logged by
/// [`Session::load_file`](crate::Session::load_file), which appends the call
/// site.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to load file, arguments are not valid")]
    InvalidArguments,

    #[error("failed to open file {}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read files size for {}", .path.display())]
    Size {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("file is empty {}", .path.display())]
    Empty { path: PathBuf },

    #[error("memory allocation failed")]
    Allocation { path: PathBuf, size: u64 },

    #[error("failed to read file {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Result type for fixture loading
pub type LoadResult<T> = Result<T, LoadError>;

/// Settings errors
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Invalid command-line settings: {0}")]
    Args(#[from] clap::Error),

    #[error("Invalid value for {var}: {reason}")]
    InvalidEnv { var: &'static str, reason: String },
}

/// Result type for settings operations
pub type SettingsResult<T> = Result<T, SettingsError>;

/// Why a test failed
///
/// Assertion macros build these with the stringified expressions and the
/// source location, so failures are reported without hand formatting.
#[derive(Error, Debug)]
pub enum Failure {
    #[error("\"{expr}\" assertion failed (in file {file} on line {line})")]
    Assert {
        expr: &'static str,
        file: &'static str,
        line: u32,
    },

    #[error("{left} is not equal to {right} (in file {file} on line {line})")]
    NotEqual {
        left: &'static str,
        right: &'static str,
        file: &'static str,
        line: u32,
    },

    #[error("{left} equals to {right} (in file {file} on line {line})")]
    Equal {
        left: &'static str,
        right: &'static str,
        file: &'static str,
        line: u32,
    },

    #[error("{0}")]
    Message(String),

    /// A fixture failed to load. The loader already logged it.
    #[error(transparent)]
    Fixture(#[from] LoadError),
}

impl Failure {
    /// Free-form failure message
    pub fn message(message: impl Into<String>) -> Self {
        Failure::Message(message.into())
    }

    /// Whether the failure was already written to the sink when it happened
    pub fn is_reported(&self) -> bool {
        matches!(self, Failure::Fixture(_))
    }
}
