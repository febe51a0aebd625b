//! Final verdict line for a finished session

use colored::*;
use etest::{Session, Statistics};

/// Prints the verdict to stderr, keeping stdout for the log lines
pub struct Reporter {
    /// Disable colored output
    no_color: bool,
}

impl Default for Reporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Reporter {
    pub fn new() -> Self {
        Self { no_color: false }
    }

    /// Disable colored output
    pub fn with_no_color(mut self, no_color: bool) -> Self {
        self.no_color = no_color;
        self
    }

    pub fn report(&self, session: &Session) {
        if self.no_color {
            colored::control::set_override(false);
        }

        eprintln!("{}", "─".repeat(50));
        eprintln!("{}", self.summary(session.name(), session.stats()));

        if self.no_color {
            colored::control::unset_override();
        }
    }

    fn summary(&self, name: &str, stats: Statistics) -> String {
        let status = if stats.failure_count > 0 {
            "FAILED".red().bold()
        } else {
            "PASSED".green().bold()
        };

        format!(
            "{}: {} | {} total, {} passed, {} failed",
            name,
            status,
            stats.total().to_string().bold(),
            stats.success_count.to_string().green().bold(),
            if stats.failure_count > 0 {
                stats.failure_count.to_string().red().bold()
            } else {
                stats.failure_count.to_string().normal()
            }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Drop ANSI color sequences so assertions don't depend on the terminal
    fn strip_ansi(text: &str) -> String {
        let mut plain = String::new();
        let mut chars = text.chars();
        while let Some(c) = chars.next() {
            if c == '\u{1b}' {
                for c in chars.by_ref() {
                    if c == 'm' {
                        break;
                    }
                }
            } else {
                plain.push(c);
            }
        }
        plain
    }

    #[test]
    fn test_summary() {
        let reporter = Reporter::new();

        assert_eq!(
            strip_ansi(&reporter.summary("fixtures", Statistics::new(3, 0))),
            "fixtures: PASSED | 3 total, 3 passed, 0 failed"
        );
        assert_eq!(
            strip_ansi(&reporter.summary("fixtures", Statistics::new(1, 2))),
            "fixtures: FAILED | 3 total, 1 passed, 2 failed"
        );
    }

    #[test]
    fn test_report_does_not_panic() {
        let mut session = Session::builder("report")
            .with_console(etest::MemoryConsole::new())
            .start();
        session.run_test("t", |_| false);

        Reporter::new().with_no_color(true).report(&session);
    }
}
