//! etest: a small unit-testing harness
//!
//! Provides:
//! - Named test and suite runners with pass/fail counting
//! - Pluggable log sinks (log file plus console by default)
//! - Console tracing that bypasses the sink
//! - Assertion macros that report the failing expression and location
//! - Whole-file fixture loading
//! - A process exit status derived from the results
//!
//! # Example
//!
//! ```no_run
//! use etest::{etest_assert_eq, etest_run, etest_run_suite, Session, TestResult};
//!
//! fn addition(_: &mut Session) -> TestResult {
//!     etest_assert_eq!(2 + 2, 4);
//!     Ok(())
//! }
//!
//! fn arithmetic(session: &mut Session) {
//!     etest_run!(session, addition);
//! }
//!
//! fn main() -> std::process::ExitCode {
//!     let mut session = Session::new("demo");
//!     etest_run_suite!(session, arithmetic);
//!     session.done();
//!     session.exit_status().into()
//! }
//! ```

pub mod clock;
pub mod error;
pub mod loader;
pub mod message;
pub mod session;
pub mod settings;
pub mod sink;
pub mod stats;

pub use error::{Failure, LoadError, LoadResult, SettingsError, SettingsResult};
pub use loader::{load_file, LoadedFile};
pub use message::{TestOutcome, TestResult};
pub use session::{Session, SessionBuilder};
pub use settings::{Settings, SettingsArgs};
pub use sink::{FacadeSink, FileConsoleSink, LogSink, MemoryConsole, SinkContext};
pub use stats::{ExitStatus, Statistics};
