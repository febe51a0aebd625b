//! Test session: statistics, settings, active sink, and the test and suite
//! runners
//!
//! A [`Session`] is passed by `&mut` to every test and suite function, so the
//! functions can log, load fixtures, and run nested tests.

use crate::error::LoadResult;
use crate::etest_log;
use crate::loader::{self, LoadedFile};
use crate::message::TestOutcome;
use crate::settings::Settings;
use crate::sink::{FileConsoleSink, LogSink, SinkContext};
use crate::stats::{ExitStatus, Statistics};
use log::debug;
use std::any::Any;
use std::io::{self, Write};
use std::panic::{self, AssertUnwindSafe, Location};
use std::path::{Path, PathBuf};

/// Builder for a [`Session`]
///
/// Nothing is logged until [`start`](SessionBuilder::start), so the console
/// and sink chosen here receive the opening line.
pub struct SessionBuilder {
    name: String,
    settings: Settings,
    sink: Box<dyn LogSink>,
    console: Box<dyn Write>,
}

impl SessionBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            settings: Settings::default(),
            sink: Box::new(FileConsoleSink),
            console: Box::new(io::stdout()),
        }
    }

    /// Use these settings instead of the defaults
    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    /// Start with a custom sink instead of the file/console writer
    pub fn with_sink(mut self, sink: impl LogSink + 'static) -> Self {
        self.sink = Box::new(sink);
        self
    }

    /// Write console output here instead of stdout
    pub fn with_console(mut self, console: impl Write + 'static) -> Self {
        self.console = Box::new(console);
        self
    }

    /// Create the session and log `=== RUNNING <name> ===`
    pub fn start(self) -> Session {
        let mut session = Session {
            name: self.name,
            stats: Statistics::default(),
            settings: self.settings,
            sink: self.sink,
            console: self.console,
        };
        session.announce();
        session
    }
}

/// One harness run
pub struct Session {
    pub(crate) name: String,
    pub(crate) stats: Statistics,
    pub(crate) settings: Settings,
    pub(crate) sink: Box<dyn LogSink>,
    pub(crate) console: Box<dyn Write>,
}

impl Session {
    /// Start a session with default settings, logging to stdout
    pub fn new(name: impl Into<String>) -> Self {
        SessionBuilder::new(name).start()
    }

    pub fn builder(name: impl Into<String>) -> SessionBuilder {
        SessionBuilder::new(name)
    }

    /// Start over: zeroed statistics, default settings, default sink
    ///
    /// The console is kept.
    pub fn reset(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.stats = Statistics::default();
        self.settings = Settings::default();
        self.sink = Box::new(FileConsoleSink);
        self.announce();
    }

    fn announce(&mut self) {
        let message = format!("=== RUNNING {} ===", self.name);
        self.log(&message);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn stats(&self) -> Statistics {
        self.stats
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Hand an already formatted message to the active sink
    pub fn log(&mut self, message: &str) {
        let mut ctx = SinkContext {
            settings: &self.settings,
            console: &mut *self.console,
        };
        self.sink.write(&mut ctx, message);
    }

    /// Run one test and count its outcome
    ///
    /// Logs `-> <name>` before and `<- <name>: SUCCESS|FAILED` after. A failure
    /// message that has not been logged yet is logged in between. A panicking
    /// test counts as a failure and its panic message is logged.
    pub fn run_test<F, R>(&mut self, test_name: &str, test_fn: F)
    where
        F: FnOnce(&mut Session) -> R,
        R: TestOutcome,
    {
        etest_log!(self, "-> {}", test_name);

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| test_fn(&mut *self)))
            .map_err(|payload| Some(format!("test panicked: {}", panic_message(&*payload))))
            .and_then(TestOutcome::into_report);

        match outcome {
            Ok(()) => {
                self.stats.record(true);
                etest_log!(self, "<- {}: SUCCESS", test_name);
            }
            Err(message) => {
                if let Some(message) = message {
                    self.log(&message);
                }
                self.stats.record(false);
                etest_log!(self, "<- {}: FAILED", test_name);
            }
        }
    }

    /// Run a group of tests and report what the group contributed
    ///
    /// Logs `=> <name>` before and `<= <name> DONE, SUCCESS(n), FAILED(m)`
    /// after, where the counts are the change since the suite started, not the
    /// running totals. Suites nest. Returns the same change.
    pub fn run_suite<F>(&mut self, suite_name: &str, suite_fn: F) -> Statistics
    where
        F: FnOnce(&mut Session),
    {
        let snapshot = self.stats;
        etest_log!(self, "=> {}", suite_name);

        suite_fn(self);

        let delta = self.stats.since(&snapshot);
        etest_log!(
            self,
            "<= {} DONE, SUCCESS({}), FAILED({})",
            suite_name,
            delta.success_count,
            delta.failure_count
        );
        delta
    }

    /// Log the final summary for the session
    pub fn done(&mut self) {
        let stats = self.stats;
        let message = format!(
            "=== {} DONE, SUCCESS({}), FAILED({}) ===",
            self.name, stats.success_count, stats.failure_count
        );
        self.log(&message);
    }

    /// `Success` iff no test has failed since the session started
    pub fn exit_status(&self) -> ExitStatus {
        ExitStatus::from_stats(&self.stats)
    }

    /// Replace the sink; clears the log file
    pub fn set_log_sink(&mut self, sink: impl LogSink + 'static) {
        debug!("session '{}': custom log sink installed", self.name);
        self.sink = Box::new(sink);
        self.settings.log_file = None;
    }

    /// Log to this file (under the output directory, if set) through the
    /// default sink
    pub fn set_log_file(&mut self, log_file: impl Into<PathBuf>) {
        let log_file = log_file.into();
        debug!("session '{}': logging to {}", self.name, log_file.display());
        self.sink = Box::new(FileConsoleSink);
        self.settings.log_file = Some(log_file);
    }

    pub fn set_input_dir(&mut self, dir: impl Into<PathBuf>) {
        self.settings.input_dir = Some(dir.into());
    }

    pub fn set_output_dir(&mut self, dir: impl Into<PathBuf>) {
        self.settings.output_dir = Some(dir.into());
    }

    pub fn set_trace_messages(&mut self, trace: bool) {
        self.settings.trace_messages = trace;
    }

    /// Load a whole file, logging any failure with the caller's location
    #[track_caller]
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> LoadResult<LoadedFile> {
        let location = Location::caller();
        loader::load_file(path).map_err(|err| {
            etest_log!(
                self,
                "{} (in file {} on line {})",
                err,
                location.file(),
                location.line()
            );
            err
        })
    }

    /// Load a fixture relative to the input directory
    #[track_caller]
    pub fn load_input_file(&mut self, name: impl AsRef<Path>) -> LoadResult<LoadedFile> {
        let path = self.settings.input_path(name);
        self.load_file(path)
    }

    /// Path of `name` inside the output directory
    pub fn output_path(&self, name: impl AsRef<Path>) -> PathBuf {
        self.settings.output_path(name)
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message
    } else {
        "<non-string panic payload>"
    }
}
