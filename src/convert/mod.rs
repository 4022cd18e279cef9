//! COCO to YOLO label conversion pipeline.
//!
//! The pipeline runs four stages over one parsed document:
//!
//! 1. load the COCO JSON ([`crate::coco`]),
//! 2. map category ids to class indices ([`ClassIndexMap`]),
//! 3. group annotations by image ([`AnnotationsByImage`]),
//! 4. emit one label file per qualifying image ([`emit_image`]).
//!
//! Only a failure to load the document aborts a run. Everything else is
//! logged, recorded in the returned [`ConversionReport`], and skipped.

pub mod class_index;
pub mod emit;
pub mod grouping;
pub mod report;

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use log::{info, warn};

pub use class_index::ClassIndexMap;
pub use emit::{emit_image, label_path_for, LabelPrecision, YoloRecord};
pub use grouping::AnnotationsByImage;
pub use report::{
    ConversionIssue, ConversionIssueCode, ConversionReport, ConversionSeverity, ImageOutcome,
    ImageReport, InputCounts, OutputCounts,
};

use crate::coco::{read_coco_json, CocoDocument, ImageId};
use crate::error::ConvertError;

/// Settings for one conversion run.
#[derive(Clone, Debug)]
pub struct ConvertConfig {
    /// Path of the COCO JSON document.
    pub input: PathBuf,
    /// Existing directory that receives the label files.
    pub output_dir: PathBuf,
    /// Ordered class names; position defines the class index.
    pub class_names: Vec<String>,
    /// How normalized values are printed.
    pub precision: LabelPrecision,
}

impl ConvertConfig {
    /// Creates a config with the default (shortest round-trip) precision.
    pub fn new(
        input: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
        class_names: Vec<String>,
    ) -> Self {
        Self {
            input: input.into(),
            output_dir: output_dir.into(),
            class_names,
            precision: LabelPrecision::default(),
        }
    }

    fn options(&self) -> ConvertOptions<'_> {
        ConvertOptions {
            output_dir: &self.output_dir,
            class_names: &self.class_names,
            precision: self.precision,
        }
    }
}

/// Borrowed settings for converting an already loaded document.
#[derive(Clone, Copy, Debug)]
pub struct ConvertOptions<'a> {
    pub output_dir: &'a Path,
    pub class_names: &'a [String],
    pub precision: LabelPrecision,
}

/// Loads `config.input` and writes label files into `config.output_dir`.
///
/// # Errors
/// Fails if the document cannot be read or parsed, or if the output
/// directory does not exist. Per-image problems never make this fail.
///
/// # Example
/// ```no_run
/// use coco2yolo::convert::{convert, ConvertConfig};
///
/// let config = ConvertConfig::new(
///     "annotations/instances_train2017.json",
///     "labels/train2017",
///     vec!["raise head".to_string(), "lower head".to_string()],
/// );
/// let report = convert(&config)?;
/// println!("{}", report);
/// # Ok::<(), coco2yolo::ConvertError>(())
/// ```
pub fn convert(config: &ConvertConfig) -> Result<ConversionReport, ConvertError> {
    ensure_output_dir(&config.output_dir)?;

    info!("reading COCO annotations from {}", config.input.display());
    let document = read_coco_json(&config.input)?;

    convert_document(&document, &config.options())
}

/// Runs the mapping, grouping and emission stages over a loaded document.
///
/// Images are processed in document order. When two images derive the
/// same label path, the later one overwrites the earlier.
pub fn convert_document(
    document: &CocoDocument,
    options: &ConvertOptions<'_>,
) -> Result<ConversionReport, ConvertError> {
    ensure_output_dir(options.output_dir)?;

    let mut report = ConversionReport::new();
    report.input = InputCounts {
        images: document.images.len(),
        categories: document.categories.len(),
        annotations: document.annotations.len(),
    };

    let class_map = ClassIndexMap::build(&document.categories, options.class_names, &mut report);
    for (category_id, class_index) in class_map.entries() {
        info!("category {} -> class index {}", category_id, class_index);
    }

    let grouped = AnnotationsByImage::group(&document.annotations);
    let known_images: HashSet<ImageId> = document.images.iter().map(|img| img.id).collect();
    let orphans = grouped.count_orphans(|id| known_images.contains(&id));
    if orphans > 0 {
        report.add(ConversionIssue::info(
            ConversionIssueCode::AnnotationsForUnknownImages,
            format!(
                "{} annotation(s) reference image ids not in the document and are ignored",
                orphans
            ),
        ));
    }

    for image in &document.images {
        let outcome = emit_image(
            image,
            &grouped,
            &class_map,
            options.output_dir,
            options.precision,
            &mut report,
        );
        report.record_image(image.id, &image.file_name, outcome);
    }

    report.add(ConversionIssue::info(
        ConversionIssueCode::LabelFloatPrecision,
        options.precision.describe(),
    ));

    info!(
        "wrote {} label file(s) with {} label(s) for {} image(s)",
        report.output.label_files,
        report.output.labels,
        document.images.len()
    );
    if report.failed_images() > 0 {
        warn!("{} image(s) could not be written", report.failed_images());
    }

    Ok(report)
}

fn ensure_output_dir(path: &Path) -> Result<(), ConvertError> {
    if path.is_dir() {
        Ok(())
    } else {
        Err(ConvertError::OutputDirMissing {
            path: path.to_path_buf(),
        })
    }
}
