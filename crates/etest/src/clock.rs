//! Wall-clock timestamps for log lines

use chrono::{Local, NaiveTime};

/// Current local time as `HH:MM:SS`
pub fn timestamp() -> String {
    format_time(Local::now().time())
}

/// Zero-padded 24-hour `HH:MM:SS`
pub fn format_time(time: NaiveTime) -> String {
    time.format("%H:%M:%S").to_string()
}

/// A log line without its trailing newline: `[HH:MM:SS]: message`
pub fn format_line(timestamp: &str, message: &str) -> String {
    format!("[{}]: {}", timestamp, message)
}
