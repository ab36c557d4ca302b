//! Frame worker thread for processing sampled video frames.
//!
//! Runs in a separate thread, receiving frames from the work queue and
//! processing them one at a time. Results are appended to a CSV file.

use anyhow::Result;
use chrono::Local;
use std::path::PathBuf;
use std::sync::mpsc::Receiver;

use super::csv_writer::{append_to_csv, FrameOutcome};
use super::queue::FrameWorkItem;

/// Frames processed and skipped by one worker run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkerStats {
    pub processed: u32,
    pub skipped: u32,
}

/// Runs the frame worker loop.
///
/// Processes items from the queue until the channel is closed (sender dropped).
/// A frame that fails is logged and skipped; the loop moves on to the next.
///
/// This function blocks until the channel closes, so it should be run in a
/// dedicated thread.
pub fn run_frame_worker<F>(receiver: Receiver<FrameWorkItem>, csv_path: PathBuf, mut process: F) -> WorkerStats
where
    F: FnMut(&FrameWorkItem) -> Result<FrameOutcome>,
{
    crate::log("Frame worker started");
    let mut stats = WorkerStats::default();

    // Channel closed once the sender is dropped
    while let Ok(work_item) = receiver.recv() {
        crate::log(&format!(
            "Frame worker: processing second {} ({})",
            work_item.second,
            work_item.frame_path.display()
        ));

        let outcome = match process(&work_item) {
            Ok(outcome) => outcome,
            Err(e) => {
                crate::log(&format!(
                    "Frame worker: skipping second {}: {:#}",
                    work_item.second, e
                ));
                stats.skipped += 1;
                continue;
            }
        };

        if let Err(e) = append_to_csv(&csv_path, &work_item, Local::now(), &outcome) {
            crate::log(&format!(
                "Frame worker: failed to write CSV for second {}: {}",
                work_item.second, e
            ));
        }
        stats.processed += 1;
    }

    crate::log(&format!(
        "Frame worker finished: {} processed, {} skipped",
        stats.processed, stats.skipped
    ));
    stats
}
