//! The subset of the COCO detection schema that the converter consumes.
//!
//! Only fields that feed the label files are modelled. Everything else a
//! COCO document carries (`info`, `licenses`, `segmentation`, `area`,
//! `iscrowd`, `supercategory`, ...) is accepted and ignored by serde.

use serde::{Deserialize, Serialize};

use super::ids::{CategoryId, ImageId};

/// A parsed COCO annotation document.
///
/// Each top-level collection is optional in the source JSON and reads as
/// empty when absent.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct CocoDocument {
    #[serde(default)]
    pub categories: Vec<Category>,

    #[serde(default)]
    pub images: Vec<Image>,

    #[serde(default)]
    pub annotations: Vec<Annotation>,
}

/// A category (class label) as declared by the source document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

impl Category {
    /// Creates a new category.
    pub fn new(id: impl Into<CategoryId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// An image entry.
///
/// Width and height are kept optional: a document may omit them or set
/// them to `null`, and the emitter decides what to do with such images.
/// They are read as plain JSON numbers so that float-valued dimensions
/// written by some exporters still load.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Image {
    pub id: ImageId,

    pub file_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
}

impl Image {
    /// Creates a new image with known dimensions.
    pub fn new(
        id: impl Into<ImageId>,
        file_name: impl Into<String>,
        width: u32,
        height: u32,
    ) -> Self {
        Self {
            id: id.into(),
            file_name: file_name.into(),
            width: Some(f64::from(width)),
            height: Some(f64::from(height)),
        }
    }

    /// Returns `(width, height)` when both are present and non-zero.
    ///
    /// Negative values pass through; only missing or zero dimensions make
    /// an image unusable.
    pub fn dimensions(&self) -> Option<(f64, f64)> {
        match (self.width, self.height) {
            (Some(w), Some(h)) if w != 0.0 && h != 0.0 => Some((w, h)),
            _ => None,
        }
    }
}

/// An object annotation.
///
/// `bbox` is `[x_min, y_min, width, height]` in absolute pixels with a
/// top-left origin. It is kept as a plain list so that malformed boxes
/// survive loading and are dealt with per annotation at emission time.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub image_id: ImageId,

    pub category_id: CategoryId,

    #[serde(default)]
    pub bbox: Vec<f64>,
}

impl Annotation {
    /// Creates a new annotation from an `[x, y, width, height]` box.
    pub fn new(
        image_id: impl Into<ImageId>,
        category_id: impl Into<CategoryId>,
        bbox: [f64; 4],
    ) -> Self {
        Self {
            image_id: image_id.into(),
            category_id: category_id.into(),
            bbox: bbox.to_vec(),
        }
    }

    /// Returns the box as `[x, y, width, height]` if it has exactly four values.
    pub fn bbox_xywh(&self) -> Option<[f64; 4]> {
        self.bbox.as_slice().try_into().ok()
    }
}
