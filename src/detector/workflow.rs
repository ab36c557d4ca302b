//! Hosted inference-workflow detector.
//!
//! Posts the image as base64 JSON to `<api_url>/infer/workflows/<workspace>/<workflow>`
//! and reads predictions from one named output of each workflow result.

use anyhow::{anyhow, Result};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde_json::{json, Value};
use std::fs;
use std::path::Path;
use std::time::Duration;

use super::{Detection, DetectionSet, Detector, DetectorError};
use crate::config::DetectorConfig;
use crate::fields::FieldClass;

/// Which workflow a detector instance talks to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Workflow {
    Scoreboard,
    Formation,
}

pub struct WorkflowDetector {
    client: reqwest::blocking::Client,
    endpoint: String,
    api_key: String,
    output_key: String,
}

impl WorkflowDetector {
    /// Builds a detector from configuration.
    ///
    /// Fails when the credential, workspace or workflow id is not configured.
    pub fn from_config(config: &DetectorConfig, workflow: Workflow) -> Result<Self> {
        let api_key = config.resolved_api_key().ok_or_else(|| {
            anyhow!(
                "No detector API key configured. Set {} or detector.api_key",
                crate::config::API_KEY_ENV
            )
        })?;
        let workspace = config
            .workspace
            .as_deref()
            .ok_or_else(|| anyhow!("detector.workspace is not configured"))?;

        let (workflow_id, output_key) = match workflow {
            Workflow::Scoreboard => (
                config
                    .scoreboard_workflow
                    .as_deref()
                    .ok_or_else(|| anyhow!("detector.scoreboard_workflow is not configured"))?,
                &config.scoreboard_output,
            ),
            Workflow::Formation => (
                config
                    .formation_workflow
                    .as_deref()
                    .ok_or_else(|| anyhow!("detector.formation_workflow is not configured"))?,
                &config.formation_output,
            ),
        };

        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            endpoint: format!(
                "{}/infer/workflows/{}/{}",
                config.api_url.trim_end_matches('/'),
                workspace,
                workflow_id
            ),
            api_key,
            output_key: output_key.clone(),
        })
    }
}

impl Detector for WorkflowDetector {
    fn detect(&self, image_path: &Path) -> Result<DetectionSet, DetectorError> {
        let image = image_path.display().to_string();
        let bytes = fs::read(image_path).map_err(|source| DetectorError::Io {
            image: image.clone(),
            source,
        })?;

        let body = json!({
            "api_key": self.api_key,
            "inputs": {
                "image": { "type": "base64", "value": STANDARD.encode(&bytes) }
            }
        });

        crate::log(&format!(
            "Detector: POST {} ({} bytes)",
            self.endpoint,
            bytes.len()
        ));

        let response = self
            .client
            .post(&self.endpoint)
            .header("User-Agent", "gridiron-vision")
            .json(&body)
            .send()
            .map_err(|source| DetectorError::Request {
                image: image.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(DetectorError::Status {
                image,
                status: status.as_u16(),
                body: response.text().unwrap_or_default(),
            });
        }

        let text = response.text().map_err(|source| DetectorError::Request {
            image: image.clone(),
            source,
        })?;
        let payload: Value =
            serde_json::from_str(&text).map_err(|_| DetectorError::malformed(&image, "body"))?;

        parse_workflow_response(&payload, &self.output_key, &image)
    }
}

/// Parses a workflow response into detections.
///
/// Accepts either `{"outputs": [...]}` or the bare outputs array. Every output
/// must carry `<output_key>.image.{width,height}` and `<output_key>.predictions`;
/// anything missing is reported, never defaulted.
pub fn parse_workflow_response(
    payload: &Value,
    output_key: &str,
    image: &str,
) -> Result<DetectionSet, DetectorError> {
    let outputs = match payload {
        Value::Array(items) => items,
        other => other
            .get("outputs")
            .and_then(Value::as_array)
            .ok_or_else(|| DetectorError::malformed(image, "outputs"))?,
    };

    let mut set = DetectionSet::default();

    for (i, output) in outputs.iter().enumerate() {
        let path = format!("outputs[{}].{}", i, output_key);
        let result = output
            .get(output_key)
            .ok_or_else(|| DetectorError::malformed(image, path.clone()))?;

        let dims = result
            .get("image")
            .ok_or_else(|| DetectorError::malformed(image, format!("{}.image", path)))?;
        let width = number(dims, "width", &format!("{}.image", path), image)?;
        let height = number(dims, "height", &format!("{}.image", path), image)?;
        if i == 0 {
            set.image_width = width;
            set.image_height = height;
        }

        let predictions = result
            .get("predictions")
            .and_then(Value::as_array)
            .ok_or_else(|| DetectorError::malformed(image, format!("{}.predictions", path)))?;

        for (j, pred) in predictions.iter().enumerate() {
            let pred_path = format!("{}.predictions[{}]", path, j);
            let label = pred
                .get("class")
                .and_then(Value::as_str)
                .ok_or_else(|| DetectorError::malformed(image, format!("{}.class", pred_path)))?;

            set.detections.push(Detection::new(
                FieldClass::from_label(label),
                number(pred, "x", &pred_path, image)?,
                number(pred, "y", &pred_path, image)?,
                number(pred, "width", &pred_path, image)?,
                number(pred, "height", &pred_path, image)?,
            ));
        }
    }

    Ok(set)
}

fn number(obj: &Value, key: &str, path: &str, image: &str) -> Result<f32, DetectorError> {
    obj.get(key)
        .and_then(Value::as_f64)
        .map(|v| v as f32)
        .ok_or_else(|| DetectorError::malformed(image, format!("{}.{}", path, key)))
}
