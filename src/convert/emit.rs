//! Per-image label file emission.
//!
//! One label file per image, named after the image with its extension
//! replaced by `.txt`. A file is only created when at least one line goes
//! into it: a missing label file means "no objects", which downstream
//! trainers treat differently from an empty one.

use std::fs;
use std::path::{Component, Path, PathBuf};

use log::{error, warn};

use super::class_index::ClassIndexMap;
use super::grouping::AnnotationsByImage;
use super::report::{ConversionIssue, ConversionIssueCode, ConversionReport, ImageOutcome};
use crate::coco::{Annotation, Image};
use crate::geom::{BBoxCxCyWh, Normalized, Pixel};

const LABEL_EXTENSION: &str = "txt";

/// How normalized values are printed in label files.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LabelPrecision {
    /// Shortest text that parses back to the same `f64` (`0.2`, `1`, `0.123456789`).
    #[default]
    Shortest,
    /// Exactly this many digits after the decimal point.
    ///
    /// `u16` is the widest precision `std::fmt` accepts.
    Fixed(u16),
}

impl LabelPrecision {
    fn format_value(self, value: f64) -> String {
        match self {
            LabelPrecision::Shortest => value.to_string(),
            LabelPrecision::Fixed(digits) => format!("{:.*}", usize::from(digits), value),
        }
    }

    /// Human-readable description for report notes.
    pub fn describe(self) -> String {
        match self {
            LabelPrecision::Shortest => {
                "normalized values are printed in shortest round-trip form".to_string()
            }
            LabelPrecision::Fixed(digits) => {
                format!("normalized values are printed with {} decimal places", digits)
            }
        }
    }
}

/// One line of a label file.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct YoloRecord {
    pub class_index: usize,
    pub bbox: BBoxCxCyWh<Normalized>,
}

impl YoloRecord {
    /// Builds a record from a COCO `[x, y, width, height]` pixel box.
    ///
    /// Nothing is clamped: boxes reaching outside the image, or with
    /// negative size, produce values outside `[0, 1]`.
    pub fn from_coco_bbox(
        class_index: usize,
        xywh: [f64; 4],
        image_width: f64,
        image_height: f64,
    ) -> Self {
        let [x, y, w, h] = xywh;
        let bbox =
            BBoxCxCyWh::<Pixel>::from_xywh(x, y, w, h).to_normalized(image_width, image_height);
        Self { class_index, bbox }
    }

    /// Appends `<class> <cx> <cy> <w> <h>\n` to `out`.
    pub fn write_line(&self, out: &mut String, precision: LabelPrecision) {
        out.push_str(&self.class_index.to_string());
        for value in [self.bbox.cx, self.bbox.cy, self.bbox.w, self.bbox.h] {
            out.push(' ');
            out.push_str(&precision.format_value(value));
        }
        out.push('\n');
    }
}

/// Derives the label file path for an image file name.
///
/// Returns `None` when the name is empty, absolute, or climbs out of the
/// output directory with `..`.
pub fn label_path_for(output_dir: &Path, file_name: &str) -> Option<PathBuf> {
    let image_path = Path::new(file_name);
    image_path.file_name()?;

    let confined = image_path
        .components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
    if !confined {
        return None;
    }

    Some(output_dir.join(image_path.with_extension(LABEL_EXTENSION)))
}

/// Renders the label file contents for one image.
///
/// Annotations with an unmapped category are skipped silently; a bbox
/// without exactly four values is skipped with a warning. Returns the
/// text and the number of lines in it.
pub fn render_labels(
    image: &Image,
    annotations: &[&Annotation],
    class_map: &ClassIndexMap,
    image_width: f64,
    image_height: f64,
    precision: LabelPrecision,
    report: &mut ConversionReport,
) -> (String, usize) {
    let mut content = String::new();
    let mut lines = 0;

    for ann in annotations {
        let Some(class_index) = class_map.get(ann.category_id) else {
            continue;
        };

        let Some(xywh) = ann.bbox_xywh() else {
            let message = format!(
                "annotation on image {} (id {}) has a bbox with {} value(s), expected 4; skipped",
                image.file_name,
                image.id,
                ann.bbox.len()
            );
            warn!("{}", message);
            report.add(ConversionIssue::warning(
                ConversionIssueCode::MalformedBBox,
                message,
            ));
            continue;
        };

        YoloRecord::from_coco_bbox(class_index, xywh, image_width, image_height)
            .write_line(&mut content, precision);
        lines += 1;
    }

    (content, lines)
}

/// Runs one image through the emitter and returns its terminal state.
///
/// Never fails: every problem is logged, added to `report`, and reflected
/// in the returned outcome. Only an I/O error while writing ends in
/// [`ImageOutcome::Failed`]; a file name that would land outside
/// `output_dir` is a data anomaly and only skips the image.
pub fn emit_image(
    image: &Image,
    grouped: &AnnotationsByImage<'_>,
    class_map: &ClassIndexMap,
    output_dir: &Path,
    precision: LabelPrecision,
    report: &mut ConversionReport,
) -> ImageOutcome {
    let Some((image_width, image_height)) = image.dimensions() else {
        let message = format!(
            "image {} (id {}) is missing 'width' or 'height'; skipped",
            image.file_name, image.id
        );
        warn!("{}", message);
        report.add(ConversionIssue::warning(
            ConversionIssueCode::MissingImageDimensions,
            message,
        ));
        return ImageOutcome::SkippedInvalidDimensions;
    };

    let Some(annotations) = grouped.get(image.id) else {
        return ImageOutcome::SkippedNoAnnotations;
    };

    let (content, lines) = render_labels(
        image,
        annotations,
        class_map,
        image_width,
        image_height,
        precision,
        report,
    );
    if lines == 0 {
        return ImageOutcome::SkippedNoQualifyingAnnotations;
    }

    let Some(label_path) = label_path_for(output_dir, &image.file_name) else {
        let message = format!(
            "image {} (id {}) does not name a file inside the output directory; skipped",
            image.file_name, image.id
        );
        warn!("{}", message);
        report.add(ConversionIssue::warning(
            ConversionIssueCode::UnsafeLabelPath,
            message,
        ));
        return ImageOutcome::SkippedUnsafeFileName;
    };

    match fs::write(&label_path, content) {
        Ok(()) => ImageOutcome::Emitted {
            path: label_path,
            lines,
        },
        Err(source) => {
            let message = format!(
                "failed to write {} for image {} (id {}): {}",
                label_path.display(),
                image.file_name,
                image.id,
                source
            );
            error!("{}", message);
            report.add(ConversionIssue::error(
                ConversionIssueCode::LabelWriteFailed,
                message.clone(),
            ));
            ImageOutcome::Failed { message }
        }
    }
}
