//! Center-based bounding boxes.

use std::marker::PhantomData;

use super::{Normalized, Pixel};

/// An axis-aligned box stored as center point plus size.
///
/// The `TSpace` parameter is either [`Pixel`] or [`Normalized`], so a
/// pixel box can never be written where a normalized one is expected.
///
/// Note: no field is validated. Negative sizes and centers outside the
/// image are carried through unchanged so downstream tools can detect
/// them themselves.
#[derive(Clone, Copy, PartialEq)]
pub struct BBoxCxCyWh<TSpace> {
    pub cx: f64,
    pub cy: f64,
    pub w: f64,
    pub h: f64,
    _space: PhantomData<TSpace>,
}

impl<TSpace> BBoxCxCyWh<TSpace> {
    /// Creates a box from center and size.
    #[inline]
    pub fn new(cx: f64, cy: f64, w: f64, h: f64) -> Self {
        Self {
            cx,
            cy,
            w,
            h,
            _space: PhantomData,
        }
    }

    /// Converts from XYWH format (x, y, width, height) where (x, y) is the top-left corner.
    ///
    /// This is the format used by COCO annotations.
    #[inline]
    pub fn from_xywh(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(x + width / 2.0, y + height / 2.0, width, height)
    }

    /// Returns the top-left corner `(x, y)`.
    #[inline]
    pub fn top_left(&self) -> (f64, f64) {
        (self.cx - self.w / 2.0, self.cy - self.h / 2.0)
    }
}

impl<TSpace> std::fmt::Debug for BBoxCxCyWh<TSpace> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BBoxCxCyWh")
            .field("cx", &self.cx)
            .field("cy", &self.cy)
            .field("w", &self.w)
            .field("h", &self.h)
            .finish()
    }
}

impl BBoxCxCyWh<Pixel> {
    /// Divides x-axis values by `image_width` and y-axis values by `image_height`.
    pub fn to_normalized(&self, image_width: f64, image_height: f64) -> BBoxCxCyWh<Normalized> {
        BBoxCxCyWh::new(
            self.cx / image_width,
            self.cy / image_height,
            self.w / image_width,
            self.h / image_height,
        )
    }
}

impl BBoxCxCyWh<Normalized> {
    /// Scales back to pixel space.
    pub fn to_pixel(&self, image_width: f64, image_height: f64) -> BBoxCxCyWh<Pixel> {
        BBoxCxCyWh::new(
            self.cx * image_width,
            self.cy * image_height,
            self.w * image_width,
            self.h * image_height,
        )
    }
}
