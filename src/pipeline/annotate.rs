//! Detection overlays for sampled video frames.
//!
//! Every detection gets a two-pixel box in a per-class color and, when a
//! font could be loaded, its class label above the box.

use ab_glyph::{FontArc, PxScale};
use anyhow::{Context, Result};
use image::{DynamicImage, Rgb, RgbImage};
use imageproc::drawing::{draw_hollow_rect_mut, draw_text_mut};
use imageproc::rect::Rect;
use std::fs;
use std::path::{Path, PathBuf};

use super::frames::list_frames;
use crate::config::VideoConfig;
use crate::detector::DetectionSet;
use crate::fields::{FieldClass, Position};
use crate::geometry::to_box;

/// Fonts tried when no font is configured.
const COMMON_FONT_PATHS: [&str; 6] = [
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    r"C:\Windows\Fonts\arial.ttf",
];

const LABEL_FONT_SIZE: f32 = 16.0;
const LABEL_OFFSET: i32 = 18;
const PALETTE_SIZE: usize = 12;

/// Prefix of annotated frame file names; the rest is the zero-padded second.
const ANNOTATED_PREFIX: &str = "second-";

pub struct Annotator {
    font: Option<FontArc>,
    scale: PxScale,
    colors: Vec<Rgb<u8>>,
}

impl Default for Annotator {
    fn default() -> Self {
        Self::new(None)
    }
}

impl Annotator {
    /// Without a font only boxes are drawn.
    pub fn new(font: Option<FontArc>) -> Self {
        let colors = (0..PALETTE_SIZE)
            .map(|i| hsv_to_rgb(i as f32 / PALETTE_SIZE as f32 * 360.0, 0.8, 0.9))
            .collect();
        Self {
            font,
            scale: PxScale::from(LABEL_FONT_SIZE),
            colors,
        }
    }

    pub fn from_config(config: &VideoConfig) -> Self {
        let font = load_font(config.font_path.as_deref());
        if font.is_none() {
            crate::log("No label font found; annotated frames will carry boxes only");
        }
        Self::new(font)
    }

    pub fn color_for(&self, class: &FieldClass) -> Rgb<u8> {
        self.colors[class_index(class) % self.colors.len()]
    }

    /// Draws every detection in `set` onto `image`.
    pub fn draw_detections(&self, image: &mut RgbImage, set: &DetectionSet) {
        let (w, h) = (image.width(), image.height());

        for detection in &set.detections {
            let bounds = to_box(
                detection.center_x,
                detection.center_y,
                detection.width,
                detection.height,
                w as f32,
                h as f32,
            );
            let Some((x, y, box_w, box_h)) = bounds.to_crop_rect(w, h) else {
                continue;
            };
            let color = self.color_for(&detection.field_class);

            draw_hollow_rect_mut(image, Rect::at(x as i32, y as i32).of_size(box_w, box_h), color);
            // Second, inner outline for visibility
            if box_w > 2 && box_h > 2 {
                let inner = Rect::at(x as i32 + 1, y as i32 + 1).of_size(box_w - 2, box_h - 2);
                draw_hollow_rect_mut(image, inner, color);
            }

            if let Some(font) = &self.font {
                let text_y = (y as i32 - LABEL_OFFSET).max(0);
                draw_text_mut(
                    image,
                    color,
                    x as i32,
                    text_y,
                    self.scale,
                    font,
                    detection.field_class.label(),
                );
            }
        }
    }

    /// Draws `set` over a copy of `img` and saves it to `out_path`.
    pub fn annotate_frame(&self, img: &DynamicImage, set: &DetectionSet, out_path: &Path) -> Result<()> {
        let mut canvas = img.to_rgb8();
        self.draw_detections(&mut canvas, set);
        canvas
            .save(out_path)
            .with_context(|| format!("Failed to save annotated frame: {}", out_path.display()))
    }
}

/// Loads the configured font, or the first common system font that parses.
pub fn load_font(override_path: Option<&Path>) -> Option<FontArc> {
    if let Some(path) = override_path {
        match read_font(path) {
            Some(font) => return Some(font),
            None => crate::log(&format!("Could not load font {}", path.display())),
        }
    }
    COMMON_FONT_PATHS
        .iter()
        .find_map(|path| read_font(Path::new(path)))
}

fn read_font(path: &Path) -> Option<FontArc> {
    let bytes = fs::read(path).ok()?;
    FontArc::try_from_vec(bytes).ok()
}

/// Where the annotated frame for `second` is written.
pub fn annotated_frame_path(dir: &Path, second: u32) -> PathBuf {
    dir.join(format!("{}{:06}.jpg", ANNOTATED_PREFIX, second))
}

/// Annotated frames in `dir` with their seconds, in playback order.
pub fn list_annotated(dir: &Path) -> Result<Vec<(u32, PathBuf)>> {
    let mut entries: Vec<(u32, PathBuf)> = list_frames(dir)?
        .into_iter()
        .filter_map(|path| {
            let second = path
                .file_stem()?
                .to_str()?
                .strip_prefix(ANNOTATED_PREFIX)?
                .parse()
                .ok()?;
            Some((second, path))
        })
        .collect();
    entries.sort();
    Ok(entries)
}

fn class_index(class: &FieldClass) -> usize {
    match class {
        FieldClass::Score => 0,
        FieldClass::Quarter => 1,
        FieldClass::Down => 2,
        FieldClass::YardNumber => 3,
        FieldClass::PlayTime => 4,
        FieldClass::Clock => 5,
        FieldClass::Scoreboard => 6,
        FieldClass::Personnel(Position::Quarterback) => 7,
        FieldClass::Personnel(Position::RunningBack) => 8,
        FieldClass::Personnel(Position::TightEnd) => 9,
        FieldClass::Personnel(Position::WideReceiver) => 10,
        FieldClass::Other(_) => 11,
    }
}

fn hsv_to_rgb(h: f32, s: f32, v: f32) -> Rgb<u8> {
    let c = v * s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = v - c;

    let (r, g, b) = match h {
        h if h < 60.0 => (c, x, 0.0),
        h if h < 120.0 => (x, c, 0.0),
        h if h < 180.0 => (0.0, c, x),
        h if h < 240.0 => (0.0, x, c),
        h if h < 300.0 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    Rgb([
        ((r + m) * 255.0) as u8,
        ((g + m) * 255.0) as u8,
        ((b + m) * 255.0) as u8,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detector::Detection;
    use image::ImageBuffer;
    use tempfile::tempdir;

    const BLACK: Rgb<u8> = Rgb([0, 0, 0]);

    fn one_detection(class: FieldClass) -> DetectionSet {
        DetectionSet {
            image_width: 100.0,
            image_height: 100.0,
            detections: vec![Detection::new(class, 50.0, 50.0, 40.0, 20.0)],
        }
    }

    #[test]
    fn test_box_outline_drawn_in_class_color() {
        let annotator = Annotator::default();
        let mut image: RgbImage = ImageBuffer::from_pixel(100, 100, BLACK);
        annotator.draw_detections(&mut image, &one_detection(FieldClass::Clock));

        let color = annotator.color_for(&FieldClass::Clock);
        // Box spans x 30..70, y 40..60
        assert_eq!(*image.get_pixel(30, 50), color);
        assert_eq!(*image.get_pixel(31, 50), color);
        assert_eq!(*image.get_pixel(69, 50), color);
        assert_eq!(*image.get_pixel(50, 40), color);
        assert_eq!(*image.get_pixel(50, 59), color);
        // Interior and outside stay untouched
        assert_eq!(*image.get_pixel(50, 50), BLACK);
        assert_eq!(*image.get_pixel(29, 50), BLACK);
        assert_eq!(*image.get_pixel(50, 61), BLACK);
    }

    #[test]
    fn test_classes_get_distinct_colors() {
        let annotator = Annotator::default();
        assert_ne!(
            annotator.color_for(&FieldClass::Score),
            annotator.color_for(&FieldClass::from_label("qb"))
        );
    }

    #[test]
    fn test_box_outside_frame_is_skipped() {
        let annotator = Annotator::default();
        let mut image: RgbImage = ImageBuffer::from_pixel(100, 100, BLACK);
        let set = DetectionSet {
            image_width: 100.0,
            image_height: 100.0,
            detections: vec![Detection::new(FieldClass::Score, 500.0, 500.0, 10.0, 10.0)],
        };
        annotator.draw_detections(&mut image, &set);
        assert!(image.pixels().all(|p| *p == BLACK));
    }

    #[test]
    fn test_annotate_frame_writes_file() {
        let dir = tempdir().unwrap();
        let out = annotated_frame_path(dir.path(), 7);
        let img = DynamicImage::ImageRgb8(ImageBuffer::from_pixel(100, 100, BLACK));

        Annotator::default()
            .annotate_frame(&img, &one_detection(FieldClass::Score), &out)
            .unwrap();

        assert!(out.ends_with("second-000007.jpg"));
        let saved = image::open(&out).unwrap();
        assert_eq!((saved.width(), saved.height()), (100, 100));
    }

    #[test]
    fn test_list_annotated_parses_seconds() {
        let dir = tempdir().unwrap();
        for second in [12, 3, 4] {
            fs::write(annotated_frame_path(dir.path(), second), b"").unwrap();
        }
        fs::write(dir.path().join("frame-00001.jpg"), b"").unwrap();

        let seconds: Vec<u32> = list_annotated(dir.path())
            .unwrap()
            .into_iter()
            .map(|(second, _)| second)
            .collect();
        assert_eq!(seconds, vec![3, 4, 12]);
    }

    #[test]
    fn test_unreadable_font_is_ignored() {
        let dir = tempdir().unwrap();
        let bogus = dir.path().join("font.ttf");
        fs::write(&bogus, b"not a font").unwrap();

        assert!(read_font(&bogus).is_none());
        assert!(read_font(&dir.path().join("absent.ttf")).is_none());
    }
}
