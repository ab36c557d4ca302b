//! Frame queue feeding the worker thread, in playback order.

use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver, Sender};

/// One sampled frame and its offset into the video.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameWorkItem {
    pub frame_path: PathBuf,
    /// Seconds from the start of the video
    pub second: u32,
}

impl FrameWorkItem {
    pub fn new(frame_path: PathBuf, second: u32) -> Self {
        Self { frame_path, second }
    }

    /// Items for sampled frames, frame `i` at second `i * interval_secs`.
    pub fn sequence(frames: Vec<PathBuf>, interval_secs: u32) -> impl Iterator<Item = FrameWorkItem> {
        frames
            .into_iter()
            .enumerate()
            .map(move |(index, path)| FrameWorkItem::new(path, index as u32 * interval_secs))
    }
}

/// Unbounded; frames pile up here while the detector is slower than sampling.
pub fn create_work_queue() -> (Sender<FrameWorkItem>, Receiver<FrameWorkItem>) {
    channel()
}
