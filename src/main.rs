//! Gridiron Vision command line
//!
//! Reads scoreboards and classifies offensive formations from broadcast
//! frames, one image at a time or sampled from a video.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use gridiron_vision::config::{get_config, init_config};
use gridiron_vision::detector::{Workflow, WorkflowDetector};
use gridiron_vision::ocr::TesseractRecognizer;
use gridiron_vision::pipeline::{classify_formation, read_scoreboard, run_video, VideoMode};
use gridiron_vision::scoreboard::render_report;
use gridiron_vision::{log, paths};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Config file (defaults to config.json next to the executable)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Read the scoreboard in one image
    Scoreboard {
        #[arg(value_name = "IMAGE")]
        image: PathBuf,

        /// Print the record as JSON instead of the text report
        #[arg(long)]
        json: bool,
    },
    /// Classify the offensive formation in one image
    Formation {
        #[arg(value_name = "IMAGE")]
        image: PathBuf,

        /// Print the full report as JSON
        #[arg(long)]
        json: bool,

        /// Also print per-position counts
        #[arg(long)]
        verbose: bool,
    },
    /// Sample a video and write one CSV row per sampled second
    Video {
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        #[arg(value_name = "OUTPUT_CSV")]
        output: PathBuf,

        #[arg(long, value_enum, default_value_t = VideoMode::Scoreboard)]
        mode: VideoMode,

        /// Also write a video with detection boxes drawn over each sampled frame
        #[arg(long, value_name = "FILE")]
        annotated: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    // Log panics before the process goes down
    std::panic::set_hook(Box::new(|panic_info| {
        let msg = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };
        let location = panic_info
            .location()
            .map(|loc| format!(" at {}:{}:{}", loc.file(), loc.line(), loc.column()))
            .unwrap_or_default();
        log(&format!("[PANIC]{} {}", location, msg));
    }));

    let cli = Cli::parse();

    paths::ensure_directories()?;
    init_config(cli.config.as_deref());
    let config = get_config();

    match cli.command {
        Command::Scoreboard { image, json } => {
            let detector = WorkflowDetector::from_config(&config.detector, Workflow::Scoreboard)?;
            let recognizer = TesseractRecognizer::from_config(&config.ocr)?;
            let record = read_scoreboard(&image, &detector, &recognizer)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&record)?);
            } else {
                print!("{}", render_report(&record));
            }
        }
        Command::Formation {
            image,
            json,
            verbose,
        } => {
            let detector = WorkflowDetector::from_config(&config.detector, Workflow::Formation)?;
            let report = classify_formation(&image, &detector)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{}", report.label);
                if verbose {
                    for (class, count) in &report.class_counts {
                        println!("{}: {}", class, count);
                    }
                }
            }
        }
        Command::Video {
            input,
            output,
            mode,
            annotated,
        } => {
            let stats = run_video(&input, &output, mode, annotated.as_deref(), config)?;
            log(&format!(
                "Video finished: {} frames written, {} skipped",
                stats.processed, stats.skipped
            ));
        }
    }

    Ok(())
}
