pub mod engine;
pub mod preprocess;
pub mod setup;

pub use engine::{CharHint, Recognizer, TesseractRecognizer};
pub use preprocess::{crop_region, prepare_for_recognition, rotate_half_turn};

use anyhow::Result;
use image::DynamicImage;

use crate::fields::FieldClass;
use crate::geometry::BoxBounds;

/// Crops, prepares and recognizes one field region.
///
/// Returns an empty string for boxes with no pixels inside the image.
/// YardNumber crops with no digits are read again rotated 180° and the two
/// readings concatenated, so upside-down field markers still yield digits.
pub fn recognize_field(
    recognizer: &dyn Recognizer,
    img: &DynamicImage,
    bounds: &BoxBounds,
    class: &FieldClass,
) -> Result<String> {
    let Some(cropped) = crop_region(img, bounds) else {
        return Ok(String::new());
    };
    let prepared = prepare_for_recognition(&cropped);

    let hint = if class.digits_only() {
        CharHint::DigitsOnly
    } else {
        CharHint::Any
    };

    let mut text = recognizer.recognize(&prepared, hint)?;

    if *class == FieldClass::YardNumber && !text.chars().any(|c| c.is_ascii_digit()) {
        text.push_str(&recognizer.recognize(&rotate_half_turn(&prepared), hint)?);
    }

    Ok(text)
}
