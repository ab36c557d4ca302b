//! Pipeline drivers.
//!
//! Single images go straight through [`driver`]. Videos are sampled into
//! frames and fed through a work queue to a worker thread that appends one
//! CSV row per sampled second, optionally drawing each frame's detections
//! into an annotated video.

pub mod annotate;
pub mod csv_writer;
pub mod driver;
pub mod frame_worker;
pub mod frames;
pub mod queue;
pub mod runner;

pub use annotate::Annotator;
pub use csv_writer::{append_to_csv, init_csv, CsvKind, FrameOutcome};
pub use driver::{
    classify_formation, formation_from_detections, read_scoreboard, scoreboard_from_detections,
    FormationReport,
};
pub use frame_worker::{run_frame_worker, WorkerStats};
pub use queue::{create_work_queue, FrameWorkItem};
pub use runner::{
    formation_processor, process_frames, run_video, scoreboard_processor, FrameAnnotation, FrameProcessor,
    VideoMode,
};
