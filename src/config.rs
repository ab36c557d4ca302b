//! Configuration for the extraction pipeline.
//!
//! Loads settings from config.json at startup. Provides the detector service
//! endpoint and credentials, OCR engine location, and video sampling options.
//! No credential has a built-in default.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Global configuration instance, initialized once at startup.
static CONFIG: OnceLock<PipelineConfig> = OnceLock::new();

/// Environment variable that overrides `detector.api_key`.
pub const API_KEY_ENV: &str = "GRIDIRON_API_KEY";

/// Hosted detection service settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Base URL of the inference service
    pub api_url: String,
    /// Service credential. Prefer the environment variable.
    pub api_key: Option<String>,
    /// Workspace that owns the workflows
    pub workspace: Option<String>,
    /// Workflow that detects scoreboard fields
    pub scoreboard_workflow: Option<String>,
    /// Workflow that detects offensive personnel
    pub formation_workflow: Option<String>,
    /// Output name holding predictions in the scoreboard workflow response
    pub scoreboard_output: String,
    /// Output name holding predictions in the formation workflow response
    pub formation_output: String,
    /// Request timeout (seconds)
    pub timeout_secs: u64,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            api_url: "https://detect.roboflow.com".to_string(),
            api_key: None,
            workspace: None,
            scoreboard_workflow: None,
            formation_workflow: None,
            scoreboard_output: "model_predictions".to_string(),
            formation_output: "predictions".to_string(),
            timeout_secs: 60,
        }
    }
}

impl DetectorConfig {
    /// API key from the environment, falling back to the config file.
    pub fn resolved_api_key(&self) -> Option<String> {
        pick_api_key(std::env::var(API_KEY_ENV).ok(), self.api_key.clone())
    }
}

fn pick_api_key(from_env: Option<String>, from_file: Option<String>) -> Option<String> {
    from_env
        .filter(|k| !k.trim().is_empty())
        .or(from_file.filter(|k| !k.trim().is_empty()))
}

/// OCR engine settings.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    /// Explicit path to the tesseract executable
    pub tesseract_path: Option<PathBuf>,
}

/// Video sampling settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct VideoConfig {
    /// ffmpeg executable used to sample frames
    pub ffmpeg_path: String,
    /// Seconds of video between sampled frames
    pub sample_interval_secs: u32,
    /// TrueType font for box labels; common system fonts are tried otherwise
    pub font_path: Option<PathBuf>,
    /// Frame rate of the annotated video
    pub output_fps: u32,
}

impl Default for VideoConfig {
    fn default() -> Self {
        Self {
            ffmpeg_path: "ffmpeg".to_string(),
            sample_interval_secs: 1,
            font_path: None,
            output_fps: 30,
        }
    }
}

/// Complete pipeline configuration.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub detector: DetectorConfig,
    pub ocr: OcrConfig,
    pub video: VideoConfig,
}

/// Loads configuration from `path` or returns defaults.
pub fn load_config(path: &Path) -> PipelineConfig {
    crate::log(&format!("Looking for config at: {}", path.display()));

    if path.exists() {
        match fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(config) => {
                    crate::log("Config loaded");
                    return config;
                }
                Err(e) => {
                    crate::log(&format!(
                        "Failed to parse {}: {}. Using defaults.",
                        path.display(),
                        e
                    ));
                }
            },
            Err(e) => {
                crate::log(&format!(
                    "Failed to read {}: {}. Using defaults.",
                    path.display(),
                    e
                ));
            }
        }
    } else {
        crate::log("Config file not found. Using default config.");
    }

    PipelineConfig::default()
}

/// Initializes the global configuration. Call once at startup.
///
/// Uses `config.json` next to the executable when no path is given.
pub fn init_config(path: Option<&Path>) {
    let path = path
        .map(Path::to_path_buf)
        .unwrap_or_else(crate::paths::get_default_config_path);
    let _ = CONFIG.set(load_config(&path));
}

/// Returns a reference to the global configuration.
/// Panics if called before init_config().
pub fn get_config() -> &'static PipelineConfig {
    CONFIG
        .get()
        .expect("Config not initialized. Call init_config() first.")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_have_no_credentials() {
        let config = PipelineConfig::default();
        assert!(config.detector.api_key.is_none());
        assert!(config.detector.workspace.is_none());
        assert_eq!(config.detector.scoreboard_output, "model_predictions");
        assert_eq!(config.video.sample_interval_secs, 1);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(
            &path,
            r#"{"detector": {"workspace": "league", "scoreboard_workflow": "board-v2"}}"#,
        )
        .unwrap();

        let config = load_config(&path);
        assert_eq!(config.detector.workspace.as_deref(), Some("league"));
        assert_eq!(config.detector.scoreboard_workflow.as_deref(), Some("board-v2"));
        assert_eq!(config.detector.api_url, "https://detect.roboflow.com");
        assert_eq!(config.video.ffmpeg_path, "ffmpeg");
        assert_eq!(config.video.output_fps, 30);
        assert!(config.video.font_path.is_none());
    }

    #[test]
    fn test_unparsable_file_falls_back() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();

        let config = load_config(&path);
        assert_eq!(config.detector.timeout_secs, 60);
    }

    #[test]
    fn test_missing_file_falls_back() {
        let dir = tempdir().unwrap();
        let config = load_config(&dir.path().join("absent.json"));
        assert!(config.ocr.tesseract_path.is_none());
    }

    #[test]
    fn test_env_key_wins_over_file() {
        assert_eq!(
            pick_api_key(Some("env".into()), Some("file".into())).as_deref(),
            Some("env")
        );
        assert_eq!(pick_api_key(None, Some("file".into())).as_deref(), Some("file"));
        assert_eq!(pick_api_key(Some("  ".into()), None), None);
    }
}
