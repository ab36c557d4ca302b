//! Video runner - samples a video and processes one frame per interval.
//!
//! Frame sampling happens on the calling thread; detection, recognition,
//! annotation and CSV output happen on the frame worker thread.

use anyhow::{anyhow, Context, Result};
use image::DynamicImage;
use std::fs;
use std::path::{Path, PathBuf};
use std::thread;

use super::annotate::{annotated_frame_path, list_annotated, Annotator};
use super::csv_writer::{init_csv, CsvKind, FrameOutcome};
use super::driver::{formation_from_detections, scoreboard_from_detections};
use super::frame_worker::{run_frame_worker, WorkerStats};
use super::frames::{encode_annotated, extract_frames};
use super::queue::{create_work_queue, FrameWorkItem};
use crate::config::PipelineConfig;
use crate::detector::{DetectionSet, Detector, Workflow, WorkflowDetector};
use crate::ocr::{Recognizer, TesseractRecognizer};

/// Which extraction a video run performs on each sampled frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum VideoMode {
    #[default]
    Scoreboard,
    Formation,
}

impl VideoMode {
    fn csv_kind(self) -> CsvKind {
        match self {
            VideoMode::Scoreboard => CsvKind::Scoreboard,
            VideoMode::Formation => CsvKind::Formation,
        }
    }
}

/// Boxed per-frame processor handed to the worker thread.
pub type FrameProcessor = Box<dyn FnMut(&FrameWorkItem) -> Result<FrameOutcome> + Send>;

/// Draws detections onto each processed frame and saves it under `dir`.
pub struct FrameAnnotation {
    annotator: Annotator,
    dir: PathBuf,
}

impl FrameAnnotation {
    pub fn new(annotator: Annotator, dir: PathBuf) -> Self {
        Self { annotator, dir }
    }

    /// A failed save is logged; the frame's CSV row is still written.
    fn write(&self, img: &DynamicImage, set: &DetectionSet, second: u32) {
        let out = annotated_frame_path(&self.dir, second);
        if let Err(e) = self.annotator.annotate_frame(img, set, &out) {
            crate::log(&format!("Annotation failed for second {}: {:#}", second, e));
        }
    }
}

/// Samples `video` and writes one CSV row per sampled second to `output_csv`.
///
/// With `annotated_video`, every processed frame is also drawn over with its
/// detections and the frames are encoded into that file, each one held on
/// screen until the next processed frame.
///
/// Collaborators are built up front so a missing credential or engine fails
/// before any frame is decoded.
pub fn run_video(
    video: &Path,
    output_csv: &Path,
    mode: VideoMode,
    annotated_video: Option<&Path>,
    config: &PipelineConfig,
) -> Result<WorkerStats> {
    if !video.exists() {
        return Err(anyhow!("Video not found: {}", video.display()));
    }

    let work_dir = tempfile::tempdir().context("Failed to create frame directory")?;
    let annotated_dir = work_dir.path().join("annotated");
    let annotation = match annotated_video {
        Some(_) => {
            fs::create_dir_all(&annotated_dir).context("Failed to create annotated frame directory")?;
            Some(FrameAnnotation::new(
                Annotator::from_config(&config.video),
                annotated_dir.clone(),
            ))
        }
        None => None,
    };

    let processor = match mode {
        VideoMode::Scoreboard => scoreboard_processor(
            WorkflowDetector::from_config(&config.detector, Workflow::Scoreboard)?,
            TesseractRecognizer::from_config(&config.ocr)?,
            annotation,
        ),
        VideoMode::Formation => formation_processor(
            WorkflowDetector::from_config(&config.detector, Workflow::Formation)?,
            annotation,
        ),
    };

    let interval = config.video.sample_interval_secs.max(1);
    let frames = extract_frames(&config.video.ffmpeg_path, video, work_dir.path(), interval)?;

    crate::log(&format!(
        "Extracted {} frames from {}",
        frames.len(),
        video.display()
    ));

    let stats = process_frames(frames, interval, output_csv, mode, processor)?;

    if let Some(output) = annotated_video {
        let entries = list_annotated(&annotated_dir)?;
        if entries.is_empty() {
            crate::log("No frame was annotated; skipping annotated video");
        } else {
            encode_annotated(
                &config.video.ffmpeg_path,
                &entries,
                interval,
                config.video.output_fps,
                work_dir.path(),
                output,
            )?;
            crate::log(&format!("Annotated video: {}", output.display()));
        }
    }

    Ok(stats)
}

/// Queues frames in playback order and waits for the worker to drain them.
///
/// Frame `i` is stamped with second `i * interval_secs`.
pub fn process_frames(
    frames: Vec<PathBuf>,
    interval_secs: u32,
    output_csv: &Path,
    mode: VideoMode,
    processor: FrameProcessor,
) -> Result<WorkerStats> {
    init_csv(output_csv, mode.csv_kind())?;
    crate::log(&format!("Results CSV: {}", output_csv.display()));

    let (sender, receiver) = create_work_queue();

    let csv_path = output_csv.to_path_buf();
    let worker = thread::spawn(move || run_frame_worker(receiver, csv_path, processor));

    for item in FrameWorkItem::sequence(frames, interval_secs) {
        if sender.send(item).is_err() {
            crate::log("Frame worker stopped early, no more frames queued");
            break;
        }
    }

    // Closing the channel lets the worker finish
    drop(sender);

    worker
        .join()
        .map_err(|_| anyhow!("Frame worker thread panicked"))
}

/// Reads the scoreboard on each frame, annotating it when asked.
pub fn scoreboard_processor<D, R>(detector: D, recognizer: R, annotation: Option<FrameAnnotation>) -> FrameProcessor
where
    D: Detector + Send + 'static,
    R: Recognizer + Send + 'static,
{
    Box::new(move |item: &FrameWorkItem| {
        let img = open_frame(&item.frame_path)?;
        let set = detector.detect(&item.frame_path)?;
        if let Some(annotation) = &annotation {
            annotation.write(&img, &set, item.second);
        }
        Ok(FrameOutcome::Scoreboard(scoreboard_from_detections(
            &img,
            &set,
            &recognizer,
        )))
    })
}

/// Classifies the formation on each frame, annotating it when asked.
pub fn formation_processor<D>(detector: D, annotation: Option<FrameAnnotation>) -> FrameProcessor
where
    D: Detector + Send + 'static,
{
    Box::new(move |item: &FrameWorkItem| {
        let set = detector.detect(&item.frame_path)?;
        if let Some(annotation) = &annotation {
            annotation.write(&open_frame(&item.frame_path)?, &set, item.second);
        }
        Ok(FrameOutcome::Formation(formation_from_detections(&set)))
    })
}

fn open_frame(path: &Path) -> Result<DynamicImage> {
    image::open(path).with_context(|| format!("Failed to load frame: {}", path.display()))
}
