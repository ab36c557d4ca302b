//! Box geometry for detections reported as center point plus size.

use serde::Serialize;

/// Axis-aligned box in source-image pixels, clamped to the image.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct BoxBounds {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

/// Which half of the image a point falls in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// Converts a center/size box to clamped edges.
pub fn to_box(
    center_x: f32,
    center_y: f32,
    width: f32,
    height: f32,
    image_width: f32,
    image_height: f32,
) -> BoxBounds {
    BoxBounds {
        left: (center_x - width / 2.0).max(0.0),
        top: (center_y - height / 2.0).max(0.0),
        right: (center_x + width / 2.0).min(image_width),
        bottom: (center_y + height / 2.0).min(image_height),
    }
}

/// Left iff the point is strictly left of the vertical midline.
pub fn side_of(center_x: f32, image_width: f32) -> Side {
    if center_x < image_width / 2.0 {
        Side::Left
    } else {
        Side::Right
    }
}

impl BoxBounds {
    pub fn width(&self) -> f32 {
        (self.right - self.left).max(0.0)
    }

    pub fn height(&self) -> f32 {
        (self.bottom - self.top).max(0.0)
    }

    /// Whole-pixel crop rectangle `(x, y, w, h)` inside a `image_w` x `image_h` image.
    ///
    /// Returns `None` when the box has no pixels left after rounding.
    pub fn to_crop_rect(&self, image_w: u32, image_h: u32) -> Option<(u32, u32, u32, u32)> {
        let x0 = (self.left.floor().max(0.0) as u32).min(image_w);
        let y0 = (self.top.floor().max(0.0) as u32).min(image_h);
        let x1 = (self.right.ceil().max(0.0) as u32).min(image_w);
        let y1 = (self.bottom.ceil().max(0.0) as u32).min(image_h);

        if x1 <= x0 || y1 <= y0 {
            return None;
        }
        Some((x0, y0, x1 - x0, y1 - y0))
    }
}
