use anyhow::{anyhow, Result};
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::paths::get_tesseract_dir;

/// Install locations checked after the local directory and PATH.
const COMMON_PATHS: [&str; 5] = [
    "/usr/bin/tesseract",
    "/usr/local/bin/tesseract",
    "/opt/homebrew/bin/tesseract",
    r"C:\Program Files\Tesseract-OCR\tesseract.exe",
    r"C:\Program Files (x86)\Tesseract-OCR\tesseract.exe",
];

fn local_executable() -> PathBuf {
    let name = if cfg!(windows) { "tesseract.exe" } else { "tesseract" };
    get_tesseract_dir().join(name)
}

fn on_path() -> bool {
    Command::new("tesseract")
        .arg("--version")
        .output()
        .map(|output| output.status.success())
        .unwrap_or(false)
}

/// Finds the Tesseract executable.
///
/// Order: explicit override, our local dir, PATH, common install paths.
pub fn find_tesseract_executable(override_path: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = override_path {
        if path.exists() {
            return Ok(path.to_path_buf());
        }
        return Err(anyhow!(
            "Configured tesseract not found at {}",
            path.display()
        ));
    }

    let local_exe = local_executable();
    if local_exe.exists() {
        return Ok(local_exe);
    }

    if on_path() {
        return Ok(PathBuf::from("tesseract"));
    }

    for path in &COMMON_PATHS {
        let p = PathBuf::from(path);
        if p.exists() {
            return Ok(p);
        }
    }

    Err(anyhow!("Tesseract not found. Please install Tesseract-OCR."))
}

/// Finds a tessdata directory holding eng.traineddata, if one is not built in.
///
/// `None` lets tesseract use its compiled-in default.
pub fn find_tessdata_dir() -> Option<PathBuf> {
    let local_tessdata = get_tesseract_dir().join("tessdata");
    if local_tessdata.join("eng.traineddata").exists() {
        return Some(local_tessdata);
    }

    // Check TESSDATA_PREFIX environment variable
    if let Ok(prefix) = std::env::var("TESSDATA_PREFIX") {
        let p = PathBuf::from(&prefix);
        if p.join("eng.traineddata").exists() {
            return Some(p);
        }
        let p = p.join("tessdata");
        if p.join("eng.traineddata").exists() {
            return Some(p);
        }
    }

    None
}
