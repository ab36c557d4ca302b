use image::imageops::{self, FilterType};
use image::{DynamicImage, GrayImage, RgbaImage};

use crate::geometry::BoxBounds;

/// Crops a detection box out of a frame.
///
/// The box is clamped to the image. Returns `None` when nothing is left.
pub fn crop_region(img: &DynamicImage, bounds: &BoxBounds) -> Option<RgbaImage> {
    let rgba = img.to_rgba8();
    let (w, h) = rgba.dimensions();
    let (x0, y0, rw, rh) = bounds.to_crop_rect(w, h)?;
    Some(imageops::crop_imm(&rgba, x0, y0, rw, rh).to_image())
}

/// Grayscale, 2x linear upscale, then auto-contrast.
///
/// Small scoreboard glyphs recognize far better after this.
pub fn prepare_for_recognition(img: &RgbaImage) -> GrayImage {
    let gray = imageops::grayscale(img);
    let (w, h) = gray.dimensions();
    let upscaled = imageops::resize(&gray, w * 2, h * 2, FilterType::Triangle);
    autocontrast(&upscaled)
}

/// Stretches the darkest pixel to 0 and the brightest to 255.
/// Flat images are returned unchanged.
pub fn autocontrast(img: &GrayImage) -> GrayImage {
    let (lo, hi) = img
        .pixels()
        .fold((u8::MAX, u8::MIN), |(lo, hi), p| (lo.min(p[0]), hi.max(p[0])));

    if hi <= lo {
        return img.clone();
    }

    let scale = 255.0 / (hi - lo) as f32;
    let mut output = img.clone();
    for pixel in output.pixels_mut() {
        let v = (pixel[0] - lo) as f32 * scale;
        pixel[0] = v.round().clamp(0.0, 255.0) as u8;
    }
    output
}

/// Rotates a prepared crop by 180° for upside-down yard markers.
pub fn rotate_half_turn(img: &GrayImage) -> GrayImage {
    imageops::rotate180(img)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::to_box;
    use image::{ImageBuffer, Luma, Rgba};

    #[test]
    fn test_crop_region() {
        // 100x200 image
        let img: RgbaImage = ImageBuffer::from_fn(100, 200, |x, y| Rgba([x as u8, y as u8, 0, 255]));
        let img = DynamicImage::ImageRgba8(img);

        let bounds = to_box(35.0, 60.0, 50.0, 20.0, 100.0, 200.0);
        let cropped = crop_region(&img, &bounds).unwrap();

        assert_eq!(cropped.dimensions(), (50, 20));
        // Top-left pixel should be (10, 50) in the source image
        assert_eq!(cropped.get_pixel(0, 0)[0], 10);
        assert_eq!(cropped.get_pixel(0, 0)[1], 50);
    }

    #[test]
    fn test_crop_region_clamps() {
        let img = DynamicImage::ImageRgba8(ImageBuffer::new(100, 100));
        let bounds = to_box(95.0, 95.0, 50.0, 50.0, 100.0, 100.0);
        let cropped = crop_region(&img, &bounds).unwrap();

        // Should clamp to the remaining pixels
        assert_eq!(cropped.dimensions(), (30, 30));
    }

    #[test]
    fn test_prepare_doubles_size() {
        let img: RgbaImage = ImageBuffer::from_fn(8, 4, |x, _| {
            let v = if x < 4 { 40 } else { 200 };
            Rgba([v, v, v, 255])
        });
        let prepared = prepare_for_recognition(&img);
        assert_eq!(prepared.dimensions(), (16, 8));
        // Auto-contrast spreads to the full range
        assert_eq!(prepared.get_pixel(0, 0)[0], 0);
        assert_eq!(prepared.get_pixel(15, 7)[0], 255);
    }

    #[test]
    fn test_autocontrast_flat_image_unchanged() {
        let img: GrayImage = ImageBuffer::from_pixel(3, 3, Luma([77]));
        assert_eq!(autocontrast(&img), img);
    }

    #[test]
    fn test_autocontrast_stretches() {
        let mut img: GrayImage = ImageBuffer::new(3, 1);
        img.put_pixel(0, 0, Luma([5]));
        img.put_pixel(1, 0, Luma([15]));
        img.put_pixel(2, 0, Luma([90]));

        let result = autocontrast(&img);
        assert_eq!(result.get_pixel(0, 0)[0], 0);
        assert_eq!(result.get_pixel(1, 0)[0], 30);
        assert_eq!(result.get_pixel(2, 0)[0], 255);
    }

    #[test]
    fn test_rotate_half_turn() {
        let mut img: GrayImage = ImageBuffer::new(2, 1);
        img.put_pixel(0, 0, Luma([1]));
        img.put_pixel(1, 0, Luma([2]));
        let rotated = rotate_half_turn(&img);
        assert_eq!(rotated.get_pixel(0, 0)[0], 2);
        assert_eq!(rotated.get_pixel(1, 0)[0], 1);
    }
}
