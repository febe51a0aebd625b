//! Message formatting, tracing and assertion reporting

use crate::clock;
use crate::error::Failure;
use crate::session::Session;
use std::fmt;
use std::io::Write;

/// What a test function returns
pub type TestResult = Result<(), Failure>;

/// Anything a test function may return to signal pass or fail
pub trait TestOutcome {
    /// `Ok` on success; on failure, the message still to be logged, if any
    fn into_report(self) -> Result<(), Option<String>>;
}

impl TestOutcome for bool {
    fn into_report(self) -> Result<(), Option<String>> {
        if self {
            Ok(())
        } else {
            Err(None)
        }
    }
}

impl TestOutcome for TestResult {
    fn into_report(self) -> Result<(), Option<String>> {
        self.map_err(|failure| {
            if failure.is_reported() {
                None
            } else {
                Some(failure.to_string())
            }
        })
    }
}

impl Session {
    /// Format a message and hand it to the active sink
    pub fn log_message(&mut self, args: fmt::Arguments<'_>) {
        match args.as_str() {
            Some(message) => self.log(message),
            None => self.log(&args.to_string()),
        }
    }

    /// Format a message and write it straight to the console
    ///
    /// Bypasses the sink. Does nothing when tracing is disabled.
    pub fn trace_message(&mut self, args: fmt::Arguments<'_>) {
        if !self.settings.trace_messages {
            return;
        }
        let line = clock::format_line(&clock::timestamp(), &args.to_string());
        let _ = writeln!(self.console, "{}", line);
    }

    /// Log `"<expr>" assertion failed (in file <file> on line <line>)`
    pub fn log_assert_failed(&mut self, expr: &'static str, file: &'static str, line: u32) {
        self.log_failure(&Failure::Assert { expr, file, line });
    }

    /// Log `<left> is not equal to <right> (in file <file> on line <line>)`
    pub fn log_cmp_failed(
        &mut self,
        left: &'static str,
        right: &'static str,
        file: &'static str,
        line: u32,
    ) {
        self.log_failure(&Failure::NotEqual {
            left,
            right,
            file,
            line,
        });
    }

    /// Log `<left> equals to <right> (in file <file> on line <line>)`
    pub fn log_cmp_not_failed(
        &mut self,
        left: &'static str,
        right: &'static str,
        file: &'static str,
        line: u32,
    ) {
        self.log_failure(&Failure::Equal {
            left,
            right,
            file,
            line,
        });
    }

    fn log_failure(&mut self, failure: &Failure) {
        self.log(&failure.to_string());
    }
}

/// Log a formatted message through the session's sink
#[macro_export]
macro_rules! etest_log {
    ($session:expr, $($arg:tt)+) => {
        $session.log_message(::std::format_args!($($arg)+))
    };
}

/// Write a formatted message to the console if tracing is enabled
#[macro_export]
macro_rules! etest_trace {
    ($session:expr, $($arg:tt)+) => {
        $session.trace_message(::std::format_args!($($arg)+))
    };
}

/// Fail the current test unless `expr` holds
#[macro_export]
macro_rules! etest_assert {
    ($expr:expr) => {
        if !($expr) {
            return ::std::result::Result::Err($crate::Failure::Assert {
                expr: ::std::stringify!($expr),
                file: ::std::file!(),
                line: ::std::line!(),
            });
        }
    };
}

/// Fail the current test unless `left == right`
#[macro_export]
macro_rules! etest_assert_eq {
    ($left:expr, $right:expr) => {
        match (&$left, &$right) {
            (left, right) => {
                if !(*left == *right) {
                    return ::std::result::Result::Err($crate::Failure::NotEqual {
                        left: ::std::stringify!($left),
                        right: ::std::stringify!($right),
                        file: ::std::file!(),
                        line: ::std::line!(),
                    });
                }
            }
        }
    };
}

/// Fail the current test if `left == right`
#[macro_export]
macro_rules! etest_assert_ne {
    ($left:expr, $right:expr) => {
        match (&$left, &$right) {
            (left, right) => {
                if *left == *right {
                    return ::std::result::Result::Err($crate::Failure::Equal {
                        left: ::std::stringify!($left),
                        right: ::std::stringify!($right),
                        file: ::std::file!(),
                        line: ::std::line!(),
                    });
                }
            }
        }
    };
}

/// Fail the current test unless `cmp(&left, &right)` is `Ordering::Equal`
#[macro_export]
macro_rules! etest_assert_eq_by {
    ($left:expr, $right:expr, $cmp:expr) => {
        if ($cmp)(&$left, &$right) != ::std::cmp::Ordering::Equal {
            return ::std::result::Result::Err($crate::Failure::NotEqual {
                left: ::std::stringify!($left),
                right: ::std::stringify!($right),
                file: ::std::file!(),
                line: ::std::line!(),
            });
        }
    };
}

/// Fail the current test unless the first `len` bytes of both sides match
///
/// A side shorter than `len` counts as a mismatch.
#[macro_export]
macro_rules! etest_assert_eq_bytes {
    ($left:expr, $right:expr, $len:expr) => {{
        let len: usize = $len;
        let left: &[u8] = ::std::convert::AsRef::<[u8]>::as_ref(&$left);
        let right: &[u8] = ::std::convert::AsRef::<[u8]>::as_ref(&$right);
        match (left.get(..len), right.get(..len)) {
            (::std::option::Option::Some(l), ::std::option::Option::Some(r)) if l == r => {}
            _ => {
                return ::std::result::Result::Err($crate::Failure::NotEqual {
                    left: ::std::stringify!($left),
                    right: ::std::stringify!($right),
                    file: ::std::file!(),
                    line: ::std::line!(),
                });
            }
        }
    }};
}

/// Run a test function, named after its identifier
#[macro_export]
macro_rules! etest_run {
    ($session:expr, $test:ident) => {
        $session.run_test(::std::stringify!($test), $test)
    };
}

/// Run a suite function, named after its identifier
#[macro_export]
macro_rules! etest_run_suite {
    ($session:expr, $suite:ident) => {
        $session.run_suite(::std::stringify!($suite), $suite)
    };
}

/// Load a fixture, failing the current test if it cannot be loaded
#[macro_export]
macro_rules! etest_load_input {
    ($session:expr, $path:expr) => {
        $session.load_input_file($path)?
    };
}
