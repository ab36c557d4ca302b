//! CSV writer for per-second video results.
//!
//! Writes in append-only mode for crash safety: every finished frame is on
//! disk even if a later frame brings the run down.

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use super::driver::FormationReport;
use super::queue::FrameWorkItem;
use crate::scoreboard::ScoreboardRecord;

const SCOREBOARD_HEADER: &str =
    "second,timestamp,frame,score_left,score_right,quarter,down,yard_number,play_time,clock";

const FORMATION_HEADER: &str =
    "second,timestamp,frame,qb,running_back,tight_end,wide_receiver,formation";

/// Separator for multi-valued fields inside one CSV cell.
const VALUE_SEPARATOR: &str = ";";

/// Result of processing one frame.
#[derive(Debug, Clone)]
pub enum FrameOutcome {
    Scoreboard(ScoreboardRecord),
    Formation(FormationReport),
}

/// Which kind of rows a CSV file holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CsvKind {
    Scoreboard,
    Formation,
}

impl CsvKind {
    fn header(self) -> &'static str {
        match self {
            CsvKind::Scoreboard => SCOREBOARD_HEADER,
            CsvKind::Formation => FORMATION_HEADER,
        }
    }
}

/// Initializes CSV file with header if it doesn't exist or is empty.
///
/// If the file exists and has content, this does nothing (preserves existing data).
pub fn init_csv(path: &Path, kind: CsvKind) -> Result<()> {
    if path.exists() {
        let file = File::open(path).context("Failed to open existing CSV")?;
        let reader = BufReader::new(file);
        if reader.lines().next().is_some() {
            return Ok(());
        }
    }

    let mut file = File::create(path).context("Failed to create CSV file")?;
    writeln!(file, "{}", kind.header()).context("Failed to write CSV header")?;
    Ok(())
}

/// Appends one result row to the CSV file.
///
/// `processed_at` fills the `timestamp` column.
pub fn append_to_csv(
    path: &Path,
    work_item: &FrameWorkItem,
    processed_at: DateTime<Local>,
    outcome: &FrameOutcome,
) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .context("Failed to open CSV for append")?;

    let prefix = format!(
        "{},{},{}",
        work_item.second,
        processed_at.format("%Y-%m-%dT%H:%M:%S"),
        escape(&work_item.frame_path.display().to_string()),
    );

    let line = match outcome {
        FrameOutcome::Scoreboard(record) => format!(
            "{},{},{},{},{},{},{},{}",
            prefix,
            escape(&record.score[0]),
            escape(&record.score[1]),
            join_cell(&record.quarter),
            join_cell(&record.down),
            join_cell(&record.yard_number),
            join_cell(&record.play_time),
            join_cell(&record.clock),
        ),
        FrameOutcome::Formation(report) => format!(
            "{},{},{},{},{},{}",
            prefix,
            report.tally.qb,
            report.tally.running_back,
            report.tally.tight_end,
            report.tally.wide_receiver,
            report.label,
        ),
    };

    writeln!(file, "{}", line).context("Failed to write CSV row")?;
    Ok(())
}

fn join_cell(values: &[String]) -> String {
    escape(&values.join(VALUE_SEPARATOR))
}

/// Quotes a cell if it contains a comma, quote or newline.
fn escape(cell: &str) -> String {
    if cell.contains([',', '"', '\n']) {
        format!("\"{}\"", cell.replace('"', "\"\""))
    } else {
        cell.to_string()
    }
}
