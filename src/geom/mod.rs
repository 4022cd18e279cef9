//! Typed bounding-box geometry.
//!
//! COCO stores boxes as top-left corner plus size in pixels; label files
//! want the box center plus size, each divided by the matching image
//! dimension. [`BBoxCxCyWh`] carries the coordinate space as a type
//! parameter so the two cannot be mixed up.
//!
//! # Example
//!
//! ```
//! use coco2yolo::geom::{BBoxCxCyWh, Pixel};
//!
//! let bbox = BBoxCxCyWh::<Pixel>::from_xywh(10.0, 10.0, 20.0, 10.0);
//! let norm = bbox.to_normalized(100.0, 50.0);
//! assert_eq!((norm.cx, norm.cy, norm.w, norm.h), (0.2, 0.3, 0.2, 0.2));
//! ```

mod bbox;
mod space;

pub use bbox::BBoxCxCyWh;
pub use space::{Normalized, Pixel};
