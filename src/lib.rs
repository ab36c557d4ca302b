//! Gridiron Vision
//!
//! Turns object-detection output for a football broadcast frame into typed
//! facts: scoreboard readings (score, quarter, down, yard number, play clock)
//! and the offensive formation implied by the visible personnel.

pub mod config;
pub mod detector;
pub mod fields;
pub mod formation;
pub mod geometry;
pub mod ocr;
pub mod paths;
pub mod pipeline;
pub mod scoreboard;

use chrono::Local;
use std::fs::OpenOptions;
use std::io::Write;

/// Logs a message to stderr and the log file with timestamp.
///
/// stdout is left alone so reports can be piped.
pub fn log(msg: &str) {
    let timestamp = Local::now().format("%H:%M:%S%.3f");
    let line = format!("[{}] {}\n", timestamp, msg);
    eprint!("{}", line);
    let log_path = paths::get_logs_dir().join("gridiron_vision.log");
    if let Ok(mut file) = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
    {
        let _ = file.write_all(line.as_bytes());
    }
}
