//! Fuzz target for the emission pass.
//!
//! Parses arbitrary bytes as a COCO document and, when that succeeds, runs
//! the full conversion into a scratch directory. Any panic is a bug: bad
//! dimensions, boxes and file names must all be handled per image.
//!
//! Run with:
//!   cargo +nightly fuzz run label_emit

#![no_main]

use libfuzzer_sys::fuzz_target;
use coco2yolo::coco::from_coco_slice;
use coco2yolo::convert::{convert_document, ConvertOptions, LabelPrecision};

fuzz_target!(|data: &[u8]| {
    if data.len() > 1024 * 1024 {
        return;
    }

    let Ok(document) = from_coco_slice(data) else {
        return;
    };
    let Ok(scratch) = tempfile::tempdir() else {
        return;
    };

    let class_names = vec!["a".to_string(), "b".to_string()];
    let options = ConvertOptions {
        output_dir: scratch.path(),
        class_names: &class_names,
        precision: LabelPrecision::Shortest,
    };
    let _ = convert_document(&document, &options);
});
