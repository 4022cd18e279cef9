//! COCO JSON document loader.
//!
//! # COCO Format Reference
//!
//! COCO bounding boxes use `[x, y, width, height]` format where:
//! - `(x, y)` is the top-left corner in absolute pixel coordinates
//! - `width` and `height` are the dimensions
//!
//! The loader performs no validation beyond what deserialization needs.
//! Missing `categories`, `images` or `annotations` keys read as empty
//! collections; everything else is checked by the stage that consumes it.

mod ids;
mod model;

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

pub use ids::{CategoryId, ImageId};
pub use model::{Annotation, Category, CocoDocument, Image};

use crate::error::ConvertError;

/// Reads a COCO document from a JSON file.
///
/// # Errors
/// Returns an error if the file cannot be read or is not a valid COCO
/// document. Both abort the whole run.
///
/// # Example
/// ```no_run
/// use std::path::Path;
/// use coco2yolo::coco::read_coco_json;
///
/// let document = read_coco_json(Path::new("instances_train2017.json"))?;
/// # Ok::<(), coco2yolo::ConvertError>(())
/// ```
pub fn read_coco_json(path: &Path) -> Result<CocoDocument, ConvertError> {
    let file = File::open(path).map_err(ConvertError::Io)?;
    let reader = BufReader::new(file);

    serde_json::from_reader(reader).map_err(|source| ConvertError::CocoJsonParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads a COCO document from a JSON string.
///
/// Useful for testing without file I/O.
pub fn from_coco_str(json: &str) -> Result<CocoDocument, serde_json::Error> {
    serde_json::from_str(json)
}

/// Reads a COCO document from a JSON byte slice.
///
/// Useful for fuzzing and processing raw bytes without UTF-8 validation overhead.
pub fn from_coco_slice(bytes: &[u8]) -> Result<CocoDocument, serde_json::Error> {
    serde_json::from_slice(bytes)
}
