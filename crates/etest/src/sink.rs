//! Log sinks
//!
//! Every harness message goes through exactly one [`LogSink`]. The default
//! [`FileConsoleSink`] appends to the configured log file and echoes to the
//! console; callers can install a closure or a [`FacadeSink`] to hand messages
//! to another logging system instead.

use crate::clock;
use crate::settings::Settings;
use log::{debug, Level};
use std::cell::RefCell;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;
use std::rc::Rc;

/// What a sink can see besides the message itself
pub struct SinkContext<'a> {
    pub settings: &'a Settings,
    pub console: &'a mut dyn Write,
}

/// Destination for formatted log messages
pub trait LogSink {
    fn write(&mut self, ctx: &mut SinkContext<'_>, message: &str);
}

/// Closures receive the bare message, without a timestamp
impl<F> LogSink for F
where
    F: FnMut(&str),
{
    fn write(&mut self, _ctx: &mut SinkContext<'_>, message: &str) {
        self(message)
    }
}

/// Default sink: log file plus optional console echo
///
/// With a log file configured each message is appended as
/// `[HH:MM:SS]: message` (the file is opened and closed per message). The
/// line is also written to the console when tracing is on, when no log file
/// is set, or when the file cannot be written, so no message is dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileConsoleSink;

impl LogSink for FileConsoleSink {
    fn write(&mut self, ctx: &mut SinkContext<'_>, message: &str) {
        let line = clock::format_line(&clock::timestamp(), message);
        let mut echo = ctx.settings.trace_messages;

        match ctx.settings.log_path() {
            Some(path) => {
                if let Err(err) = append_line(&path, &line) {
                    debug!("log file {} unavailable: {}", path.display(), err);
                    echo = true;
                }
            }
            None => echo = true,
        }

        if echo {
            let _ = writeln!(ctx.console, "{}", line);
        }
    }
}

fn append_line(path: &Path, line: &str) -> io::Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "{}", line)
}

/// Forwards messages to the `log` facade
#[derive(Debug, Clone, Copy)]
pub struct FacadeSink {
    level: Level,
}

impl FacadeSink {
    pub fn new(level: Level) -> Self {
        Self { level }
    }

    pub fn level(&self) -> Level {
        self.level
    }
}

impl Default for FacadeSink {
    fn default() -> Self {
        Self::new(Level::Info)
    }
}

impl LogSink for FacadeSink {
    fn write(&mut self, _ctx: &mut SinkContext<'_>, message: &str) {
        log::log!(target: "etest", self.level, "{}", message);
    }
}

/// In-memory console, for capturing what a session prints
///
/// Clones share the same buffer: hand one to the session and keep one to
/// read back.
#[derive(Debug, Clone, Default)]
pub struct MemoryConsole {
    buffer: Rc<RefCell<Vec<u8>>>,
}

impl MemoryConsole {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buffer.borrow()).into_owned()
    }

    /// Written lines, without their timestamps
    pub fn messages(&self) -> Vec<String> {
        self.contents()
            .lines()
            .map(|line| match line.split_once("]: ") {
                Some((_, message)) => message.to_string(),
                None => line.to_string(),
            })
            .collect()
    }

    pub fn clear(&self) {
        self.buffer.borrow_mut().clear();
    }
}

impl Write for MemoryConsole {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn write_message(sink: &mut dyn LogSink, settings: &Settings, message: &str) -> MemoryConsole {
        let console = MemoryConsole::new();
        let mut out = console.clone();
        let mut ctx = SinkContext {
            settings,
            console: &mut out,
        };
        sink.write(&mut ctx, message);
        console
    }

    #[test]
    fn test_console_only_without_log_file() {
        let settings = Settings {
            trace_messages: false,
            ..Default::default()
        };
        let console = write_message(&mut FileConsoleSink, &settings, "hello");
        assert_eq!(console.messages(), vec!["hello"]);
        assert!(console.contents().starts_with('['));
        assert!(console.contents().ends_with("]: hello\n"));
    }

    #[test]
    fn test_file_and_console_when_tracing() {
        let temp_dir = TempDir::new().unwrap();
        let settings = Settings {
            output_dir: Some(temp_dir.path().to_path_buf()),
            log_file: Some(PathBuf::from("run.log")),
            ..Default::default()
        };

        let console = write_message(&mut FileConsoleSink, &settings, "first");
        write_message(&mut FileConsoleSink, &settings, "second");

        let logged = fs::read_to_string(temp_dir.path().join("run.log")).unwrap();
        let lines: Vec<_> = logged.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("]: first"));
        assert!(lines[1].ends_with("]: second"));
        assert_eq!(console.messages(), vec!["first"]);
    }

    #[test]
    fn test_file_only_when_not_tracing() {
        let temp_dir = TempDir::new().unwrap();
        let settings = Settings {
            output_dir: Some(temp_dir.path().to_path_buf()),
            log_file: Some(PathBuf::from("quiet.log")),
            trace_messages: false,
            ..Default::default()
        };

        let console = write_message(&mut FileConsoleSink, &settings, "quiet");

        assert_eq!(console.contents(), "");
        let logged = fs::read_to_string(temp_dir.path().join("quiet.log")).unwrap();
        assert!(logged.ends_with("]: quiet\n"));
    }

    #[test]
    fn test_unwritable_log_file_falls_back_to_console_once() {
        let temp_dir = TempDir::new().unwrap();
        let settings = Settings {
            output_dir: Some(temp_dir.path().join("missing").join("dir")),
            log_file: Some(PathBuf::from("run.log")),
            trace_messages: false,
            ..Default::default()
        };

        let console = write_message(&mut FileConsoleSink, &settings, "kept");
        assert_eq!(console.messages(), vec!["kept"]);

        let settings = Settings {
            trace_messages: true,
            ..settings
        };
        let console = write_message(&mut FileConsoleSink, &settings, "kept");
        assert_eq!(console.messages(), vec!["kept"]);
    }

    #[test]
    fn test_closure_sink_gets_bare_message() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let captured = Rc::clone(&seen);
        let mut sink = move |message: &str| captured.borrow_mut().push(message.to_string());

        let console = write_message(&mut sink, &Settings::default(), "plain");

        assert_eq!(*seen.borrow(), vec!["plain".to_string()]);
        assert_eq!(console.contents(), "");
    }

    #[test]
    fn test_facade_sink_skips_console() {
        let mut sink = FacadeSink::new(Level::Debug);
        assert_eq!(sink.level(), Level::Debug);
        let console = write_message(&mut sink, &Settings::default(), "to the facade");
        assert_eq!(console.contents(), "");
    }

    #[test]
    fn test_memory_console_clear() {
        let mut console = MemoryConsole::new();
        writeln!(console, "line").unwrap();
        assert_eq!(console.contents(), "line\n");
        console.clear();
        assert_eq!(console.contents(), "");
    }
}
