use anyhow::{anyhow, Result};
use image::GrayImage;
use std::path::PathBuf;
use std::process::Command;
use tempfile::NamedTempFile;

use super::setup::{find_tessdata_dir, find_tesseract_executable};
use crate::config::OcrConfig;

/// Restricts what the recognizer may emit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CharHint {
    Any,
    DigitsOnly,
}

/// Recognition collaborator: prepared crop in, raw text out.
pub trait Recognizer {
    fn recognize(&self, img: &GrayImage, hint: CharHint) -> Result<String>;
}

/// Runs the Tesseract executable on single-line crops.
pub struct TesseractRecognizer {
    executable: PathBuf,
    tessdata: Option<PathBuf>,
}

impl TesseractRecognizer {
    pub fn new(executable: PathBuf, tessdata: Option<PathBuf>) -> Self {
        Self { executable, tessdata }
    }

    /// Locates tesseract using the config override or the usual places.
    pub fn from_config(config: &OcrConfig) -> Result<Self> {
        let executable = find_tesseract_executable(config.tesseract_path.as_deref())?;
        let tessdata = find_tessdata_dir();
        crate::log(&format!("Using tesseract: {}", executable.display()));
        Ok(Self::new(executable, tessdata))
    }

    fn command_args(&self, hint: CharHint) -> Vec<String> {
        let mut args = Vec::new();
        if let Some(tessdata) = &self.tessdata {
            args.push("--tessdata-dir".to_string());
            args.push(tessdata.display().to_string());
        }
        args.extend(
            ["-l", "eng", "--psm", "7", "--oem", "3"]
                .iter()
                .map(|s| s.to_string()),
        );
        if hint == CharHint::DigitsOnly {
            args.push("-c".to_string());
            args.push("tessedit_char_whitelist=0123456789".to_string());
        }
        args
    }
}

impl Recognizer for TesseractRecognizer {
    fn recognize(&self, img: &GrayImage, hint: CharHint) -> Result<String> {
        // Save image to temporary file
        let temp_input = NamedTempFile::with_suffix(".png")?;
        img.save(temp_input.path())?;

        // Run Tesseract to stdout; psm 7 treats the crop as one text line
        let output = Command::new(&self.executable)
            .arg(temp_input.path())
            .arg("stdout")
            .args(self.command_args(hint))
            .output()?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(anyhow!("Tesseract failed: {}", stderr));
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}
