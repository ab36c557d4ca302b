//! Single-image drivers: detector, then recognizer, then aggregation.

use anyhow::{Context, Result};
use image::DynamicImage;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;

use crate::detector::{Detection, DetectionSet, Detector};
use crate::fields::FieldClass;
use crate::formation::{class_counts, FormationLabel, PositionTally};
use crate::geometry::to_box;
use crate::ocr::{recognize_field, Recognizer};
use crate::scoreboard::{aggregate, ScoreboardRecord};

/// Formation result for one image.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FormationReport {
    pub label: FormationLabel,
    pub tally: PositionTally,
    /// Counts for every detected label, tracked or not.
    pub class_counts: BTreeMap<String, u32>,
}

/// Detects and reads every scoreboard field in one image.
///
/// A detector failure aborts this image. A recognizer failure only blanks the
/// one detection it happened on.
pub fn read_scoreboard(
    image_path: &Path,
    detector: &dyn Detector,
    recognizer: &dyn Recognizer,
) -> Result<ScoreboardRecord> {
    let img = image::open(image_path)
        .with_context(|| format!("Failed to load image: {}", image_path.display()))?;
    let set = detector.detect(image_path)?;

    crate::log(&format!(
        "{}: {} detections ({}x{})",
        image_path.display(),
        set.detections.len(),
        set.image_width,
        set.image_height
    ));

    Ok(scoreboard_from_detections(&img, &set, recognizer))
}

/// Recognizes text for each detection and aggregates the results.
///
/// Crops are clamped to the decoded image; the score split uses the size the
/// detector reported.
pub fn scoreboard_from_detections(
    img: &DynamicImage,
    set: &DetectionSet,
    recognizer: &dyn Recognizer,
) -> ScoreboardRecord {
    let (img_w, img_h) = (img.width() as f32, img.height() as f32);

    let recognized: Vec<Detection> = set
        .detections
        .iter()
        .filter(|d| d.field_class != FieldClass::Scoreboard)
        .map(|d| {
            let bounds = to_box(d.center_x, d.center_y, d.width, d.height, img_w, img_h);
            let text = match recognize_field(recognizer, img, &bounds, &d.field_class) {
                Ok(text) => text,
                Err(e) => {
                    crate::log(&format!(
                        "Recognition failed for {} at ({:.0}, {:.0}): {}",
                        d.field_class, d.center_x, d.center_y, e
                    ));
                    String::new()
                }
            };
            d.clone().with_text(text)
        })
        .collect();

    aggregate(set.image_width, set.image_height, &recognized)
}

/// Detects offensive personnel in one image and classifies the formation.
pub fn classify_formation(image_path: &Path, detector: &dyn Detector) -> Result<FormationReport> {
    let set = detector.detect(image_path)?;
    let report = formation_from_detections(&set);

    crate::log(&format!(
        "{}: {:?} -> {}",
        image_path.display(),
        report.tally,
        report.label
    ));

    Ok(report)
}

pub fn formation_from_detections(set: &DetectionSet) -> FormationReport {
    let tally = PositionTally::from_detections(&set.detections);
    FormationReport {
        label: tally.classify(),
        tally,
        class_counts: class_counts(&set.detections),
    }
}
