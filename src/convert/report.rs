//! Conversion report types.
//!
//! Every anomaly the pipeline steps over is recorded here as well as logged,
//! so callers can inspect what happened without scraping log output.

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

use crate::coco::ImageId;

/// A report generated by one conversion run.
#[derive(Clone, Debug, Default, Serialize)]
pub struct ConversionReport {
    /// Counts from the input document.
    pub input: InputCounts,
    /// Counts of what was written.
    pub output: OutputCounts,
    /// Terminal state of every image, in document order.
    pub images: Vec<ImageReport>,
    /// Issues discovered during conversion.
    pub issues: Vec<ConversionIssue>,
}

impl ConversionReport {
    /// Create a new empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an issue to the report.
    pub fn add(&mut self, issue: ConversionIssue) {
        self.issues.push(issue);
    }

    /// Record the outcome of one image and update the output counts.
    pub fn record_image(&mut self, image_id: ImageId, file_name: &str, outcome: ImageOutcome) {
        if let ImageOutcome::Emitted { lines, .. } = &outcome {
            self.output.label_files += 1;
            self.output.labels += lines;
        }
        self.images.push(ImageReport {
            image_id,
            file_name: file_name.to_string(),
            outcome,
        });
    }

    /// Count of error-level issues (label files that could not be written).
    pub fn error_count(&self) -> usize {
        self.count_severity(ConversionSeverity::Error)
    }

    /// Count of warning-level issues.
    pub fn warning_count(&self) -> usize {
        self.count_severity(ConversionSeverity::Warning)
    }

    /// Count of info-level issues.
    pub fn info_count(&self) -> usize {
        self.count_severity(ConversionSeverity::Info)
    }

    /// Number of images that ended in the [`ImageOutcome::Failed`] state.
    pub fn failed_images(&self) -> usize {
        self.images
            .iter()
            .filter(|img| matches!(img.outcome, ImageOutcome::Failed { .. }))
            .count()
    }

    /// Returns the outcome recorded for `image_id`, if any.
    ///
    /// When ids repeat, the last record wins, matching which label file
    /// survives on disk.
    pub fn outcome_of(&self, image_id: ImageId) -> Option<&ImageOutcome> {
        self.images
            .iter()
            .rev()
            .find(|img| img.image_id == image_id)
            .map(|img| &img.outcome)
    }

    /// Returns issues with the given code.
    pub fn issues_with(&self, code: ConversionIssueCode) -> impl Iterator<Item = &ConversionIssue> {
        self.issues.iter().filter(move |i| i.code == code)
    }

    fn count_severity(&self, severity: ConversionSeverity) -> usize {
        self.issues.iter().filter(|i| i.severity == severity).count()
    }

    fn count_outcomes(&self, pred: impl Fn(&ImageOutcome) -> bool) -> usize {
        self.images.iter().filter(|img| pred(&img.outcome)).count()
    }
}

impl fmt::Display for ConversionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "  input: {} images, {} categories, {} annotations",
            self.input.images, self.input.categories, self.input.annotations
        )?;
        writeln!(
            f,
            "  output: {} label file(s), {} label(s)",
            self.output.label_files, self.output.labels
        )?;

        let skipped_dims =
            self.count_outcomes(|o| matches!(o, ImageOutcome::SkippedInvalidDimensions));
        let skipped_empty = self.count_outcomes(|o| matches!(o, ImageOutcome::SkippedNoAnnotations));
        let skipped_filtered =
            self.count_outcomes(|o| matches!(o, ImageOutcome::SkippedNoQualifyingAnnotations));
        let skipped_unsafe =
            self.count_outcomes(|o| matches!(o, ImageOutcome::SkippedUnsafeFileName));
        let failed = self.failed_images();

        if skipped_dims + skipped_empty + skipped_filtered + skipped_unsafe + failed > 0 {
            writeln!(
                f,
                "  skipped: {} missing dimensions, {} without annotations, {} without mapped annotations, {} with unsafe file names",
                skipped_dims, skipped_empty, skipped_filtered, skipped_unsafe
            )?;
            if failed > 0 {
                writeln!(f, "  failed: {}", failed)?;
            }
        }

        for (title, severity) in [
            ("Errors", ConversionSeverity::Error),
            ("Warnings", ConversionSeverity::Warning),
            ("Notes", ConversionSeverity::Info),
        ] {
            let count = self.count_severity(severity);
            if count == 0 {
                continue;
            }
            writeln!(f)?;
            writeln!(f, "{} ({}):", title, count)?;
            for issue in self.issues.iter().filter(|i| i.severity == severity) {
                writeln!(f, "  - {}", issue.message)?;
            }
        }

        Ok(())
    }
}

/// Counts of input document elements.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct InputCounts {
    pub images: usize,
    pub categories: usize,
    pub annotations: usize,
}

/// Counts of written output.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct OutputCounts {
    /// Label files written.
    pub label_files: usize,
    /// Lines written across all label files.
    pub labels: usize,
}

/// The terminal state of one image.
#[derive(Clone, Debug, Serialize)]
pub struct ImageReport {
    pub image_id: ImageId,
    pub file_name: String,
    pub outcome: ImageOutcome,
}

/// Terminal states of the per-image emitter. Exactly one per image.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ImageOutcome {
    /// A label file was written with `lines` lines.
    Emitted { path: PathBuf, lines: usize },
    /// Width or height missing or zero.
    SkippedInvalidDimensions,
    /// The image owns no annotations at all.
    SkippedNoAnnotations,
    /// Every annotation of the image was filtered out.
    SkippedNoQualifyingAnnotations,
    /// The file name is empty, absolute, or climbs out of the output directory.
    SkippedUnsafeFileName,
    /// The label file could not be written.
    Failed { message: String },
}

/// A single issue discovered during conversion.
#[derive(Clone, Debug, Serialize)]
pub struct ConversionIssue {
    pub severity: ConversionSeverity,
    pub code: ConversionIssueCode,
    pub message: String,
}

impl ConversionIssue {
    /// Create an error-level issue.
    pub fn error(code: ConversionIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: ConversionSeverity::Error,
            code,
            message: message.into(),
        }
    }

    /// Create a warning-level issue.
    pub fn warning(code: ConversionIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: ConversionSeverity::Warning,
            code,
            message: message.into(),
        }
    }

    /// Create an info-level issue (policy note).
    pub fn info(code: ConversionIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: ConversionSeverity::Info,
            code,
            message: message.into(),
        }
    }
}

/// Severity level for conversion issues.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversionSeverity {
    /// A label file could not be produced because of the environment.
    Error,
    /// Input data was skipped.
    Warning,
    /// A policy note; nothing was lost.
    Info,
}

/// Stable issue codes for programmatic consumption.
///
/// These codes are part of the JSON report and should remain stable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversionIssueCode {
    /// A category name is not in the class list; its annotations are dropped.
    UnmappedCategory,
    /// An image has no usable width/height and was skipped.
    MissingImageDimensions,
    /// An annotation bbox does not have exactly four values.
    MalformedBBox,
    /// An image file name would place its label file outside the output directory.
    UnsafeLabelPath,
    /// Writing a label file failed.
    LabelWriteFailed,
    /// Annotations reference image ids that are not in the document.
    AnnotationsForUnknownImages,
    /// How normalized floats are printed.
    LabelFloatPrecision,
}
