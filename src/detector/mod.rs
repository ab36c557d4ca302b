//! Detector collaborator.
//!
//! This module provides:
//! - The `Detection` value produced once per detected region
//! - The `Detector` trait the pipeline drives
//! - A hosted inference-workflow client over HTTP

pub mod error;
pub mod workflow;

pub use error::DetectorError;
pub use workflow::{Workflow, WorkflowDetector};

use std::path::Path;

use crate::fields::FieldClass;

/// One labeled region reported by the detector, in source-image pixels.
#[derive(Clone, Debug, PartialEq)]
pub struct Detection {
    pub field_class: FieldClass,
    pub center_x: f32,
    pub center_y: f32,
    pub width: f32,
    pub height: f32,
    /// Raw recognizer output; empty for personnel detections.
    pub recognized_text: String,
}

impl Detection {
    pub fn new(field_class: FieldClass, center_x: f32, center_y: f32, width: f32, height: f32) -> Self {
        Self {
            field_class,
            center_x,
            center_y,
            width,
            height,
            recognized_text: String::new(),
        }
    }

    /// Returns the detection carrying recognized text.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.recognized_text = text.into();
        self
    }
}

/// All detections for one image, plus the image size the detector saw.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DetectionSet {
    pub image_width: f32,
    pub image_height: f32,
    pub detections: Vec<Detection>,
}

/// Anything that can turn an image file into detections.
pub trait Detector {
    fn detect(&self, image_path: &Path) -> Result<DetectionSet, DetectorError>;
}
