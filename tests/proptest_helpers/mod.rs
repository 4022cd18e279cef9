#![allow(dead_code)]

use coco2yolo::coco::{Annotation, Category, CocoDocument, Image};
use proptest::prelude::*;
use proptest::test_runner::{Config as ProptestConfig, FileFailurePersistence};

pub fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(64);

    let mut config = ProptestConfig::with_failure_persistence(FileFailurePersistence::WithSource(
        "proptest-regressions",
    ));
    config.cases = cases;
    config.max_shrink_iters = 1024;
    config
}

/// Relative tolerance for reconstructing pixel values from printed floats.
pub fn eps_for(image_w: u32, image_h: u32) -> f64 {
    image_w.max(image_h) as f64 * 1e-9
}

pub fn arb_bbox(max_coord: f64) -> impl Strategy<Value = [f64; 4]> {
    (
        -max_coord..max_coord,
        -max_coord..max_coord,
        0.0..max_coord,
        0.0..max_coord,
    )
        .prop_map(|(x, y, w, h)| [x, y, w, h])
}

/// A single image with up to `max_anns` annotations over `num_categories`
/// categories with ids `100, 101, ...`.
pub fn arb_single_image_document(
    num_categories: i64,
    max_anns: usize,
) -> impl Strategy<Value = CocoDocument> {
    (1u32..4000, 1u32..4000).prop_flat_map(move |(width, height)| {
        let ann = (0..num_categories, arb_bbox(4000.0));
        prop::collection::vec(ann, 1..=max_anns).prop_map(move |anns| CocoDocument {
            categories: (0..num_categories)
                .map(|i| Category::new(100 + i, format!("class_{}", i)))
                .collect(),
            images: vec![Image::new(1i64, "img.jpg", width, height)],
            annotations: anns
                .into_iter()
                .map(|(cat, bbox)| Annotation::new(1i64, 100 + cat, bbox))
                .collect(),
        })
    })
}

/// Parses one label line into `(class, [cx, cy, w, h])`.
pub fn parse_label_line(line: &str) -> Result<(usize, [f64; 4]), String> {
    let tokens: Vec<&str> = line.split(' ').collect();
    if tokens.len() != 5 {
        return Err(format!("expected 5 tokens, got {}: {:?}", tokens.len(), line));
    }
    let class = tokens[0]
        .parse::<usize>()
        .map_err(|e| format!("bad class '{}': {}", tokens[0], e))?;
    let mut values = [0.0; 4];
    for (slot, raw) in values.iter_mut().zip(&tokens[1..]) {
        *slot = raw
            .parse::<f64>()
            .map_err(|e| format!("bad value '{}': {}", raw, e))?;
    }
    Ok((class, values))
}
