use anyhow::{anyhow, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Extension used for sampled frames.
const FRAME_EXTENSION: &str = "jpg";

/// Samples one frame every `interval_secs` seconds of video into `out_dir`.
///
/// Decoding is left to the external ffmpeg executable. Returns frame paths in
/// playback order.
pub fn extract_frames(ffmpeg: &str, video: &Path, out_dir: &Path, interval_secs: u32) -> Result<Vec<PathBuf>> {
    let interval = interval_secs.max(1);
    let pattern = out_dir.join(format!("frame-%05d.{}", FRAME_EXTENSION));

    crate::log(&format!(
        "Sampling {} every {}s into {}",
        video.display(),
        interval,
        out_dir.display()
    ));

    let output = Command::new(ffmpeg)
        .arg("-hide_banner")
        .arg("-loglevel")
        .arg("error")
        .arg("-i")
        .arg(video)
        .arg("-vf")
        .arg(format!("fps=1/{}", interval))
        .arg(&pattern)
        .output()
        .with_context(|| format!("Failed to run {}", ffmpeg))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(anyhow!("ffmpeg failed: {}", stderr));
    }

    list_frames(out_dir)
}

/// Lists sampled frames in a directory, sorted by name.
pub fn list_frames(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut frames: Vec<PathBuf> = fs::read_dir(dir)
        .with_context(|| format!("Failed to read frame directory: {}", dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().is_some_and(|ext| ext == FRAME_EXTENSION))
        .collect();
    frames.sort();
    Ok(frames)
}

/// Builds an ffconcat list showing each annotated frame until the next one.
///
/// Seconds with no annotated frame keep showing the previous one. The last
/// frame is held for one interval and listed twice so its duration applies.
pub fn concat_list(entries: &[(u32, PathBuf)], interval_secs: u32) -> String {
    let mut list = String::from("ffconcat version 1.0\n");
    for (i, (second, path)) in entries.iter().enumerate() {
        let duration = match entries.get(i + 1) {
            Some((next, _)) => next.saturating_sub(*second).max(1),
            None => interval_secs.max(1),
        };
        list.push_str(&format!("file '{}'\nduration {}\n", quote(path), duration));
    }
    if let Some((_, last)) = entries.last() {
        list.push_str(&format!("file '{}'\n", quote(last)));
    }
    list
}

/// Encodes annotated frames into `output` at `fps` frames per second.
pub fn encode_annotated(
    ffmpeg: &str,
    entries: &[(u32, PathBuf)],
    interval_secs: u32,
    fps: u32,
    work_dir: &Path,
    output: &Path,
) -> Result<()> {
    if entries.is_empty() {
        return Err(anyhow!("No annotated frames to encode"));
    }

    let list_path = work_dir.join("annotated.ffconcat");
    fs::write(&list_path, concat_list(entries, interval_secs))
        .with_context(|| format!("Failed to write {}", list_path.display()))?;

    crate::log(&format!(
        "Encoding {} annotated frames into {}",
        entries.len(),
        output.display()
    ));

    let output_status = Command::new(ffmpeg)
        .arg("-y")
        .arg("-hide_banner")
        .arg("-loglevel")
        .arg("error")
        .arg("-f")
        .arg("concat")
        .arg("-safe")
        .arg("0")
        .arg("-i")
        .arg(&list_path)
        // yuv420p needs even dimensions
        .arg("-vf")
        .arg(format!(
            "fps={},scale=trunc(iw/2)*2:trunc(ih/2)*2,format=yuv420p",
            fps.max(1)
        ))
        .arg(output)
        .output()
        .with_context(|| format!("Failed to run {}", ffmpeg))?;

    if !output_status.status.success() {
        let stderr = String::from_utf8_lossy(&output_status.stderr);
        return Err(anyhow!("ffmpeg failed: {}", stderr));
    }
    Ok(())
}

fn quote(path: &Path) -> String {
    path.display().to_string().replace('\'', "'\\''")
}
