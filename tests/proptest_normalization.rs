use std::fs;

use coco2yolo::convert::{convert_document, ConvertOptions, LabelPrecision};
use coco2yolo::geom::{BBoxCxCyWh, Normalized};
use proptest::prelude::*;

mod proptest_helpers;

proptest! {
    #![proptest_config(proptest_helpers::proptest_config())]

    #[test]
    fn label_lines_reconstruct_the_pixel_boxes(
        document in proptest_helpers::arb_single_image_document(3, 8)
    ) {
        let temp = tempfile::tempdir().expect("create temp dir");
        // Only the first two categories are in the vocabulary.
        let class_names = vec!["class_0".to_string(), "class_1".to_string()];
        let options = ConvertOptions {
            output_dir: temp.path(),
            class_names: &class_names,
            precision: LabelPrecision::Shortest,
        };

        convert_document(&document, &options).expect("convert");

        let image = &document.images[0];
        let (img_w, img_h) = image.dimensions().expect("generated image has dimensions");
        let expected: Vec<_> = document
            .annotations
            .iter()
            .filter(|ann| ann.category_id.as_i64() < 102)
            .collect();

        let label_path = temp.path().join("img.txt");
        if expected.is_empty() {
            prop_assert!(!label_path.exists());
            return Ok(());
        }

        let content = fs::read_to_string(&label_path).expect("read label file");
        prop_assert!(content.ends_with('\n'));
        let lines: Vec<&str> = content.lines().collect();
        prop_assert_eq!(lines.len(), expected.len());

        let eps = proptest_helpers::eps_for(img_w as u32, img_h as u32);
        for (line, ann) in lines.iter().zip(expected) {
            let (class, [cx, cy, w, h]) =
                proptest_helpers::parse_label_line(line).map_err(TestCaseError::fail)?;
            prop_assert_eq!(class as i64, ann.category_id.as_i64() - 100);
            prop_assert!(class < class_names.len());

            let [x_min, y_min, box_w, box_h] = ann.bbox_xywh().expect("four values");
            let scale = 1.0 + x_min.abs().max(y_min.abs()).max(box_w).max(box_h);
            let pixel = BBoxCxCyWh::<Normalized>::new(cx, cy, w, h).to_pixel(img_w, img_h);
            let (left, top) = pixel.top_left();
            prop_assert!((left - x_min).abs() <= eps * scale);
            prop_assert!((top - y_min).abs() <= eps * scale);
            prop_assert!((pixel.w - box_w).abs() <= eps * scale);
            prop_assert!((pixel.h - box_h).abs() <= eps * scale);
        }
    }

    #[test]
    fn conversion_is_idempotent(
        document in proptest_helpers::arb_single_image_document(2, 5)
    ) {
        let temp = tempfile::tempdir().expect("create temp dir");
        let class_names = vec!["class_0".to_string(), "class_1".to_string()];
        let options = ConvertOptions {
            output_dir: temp.path(),
            class_names: &class_names,
            precision: LabelPrecision::Shortest,
        };

        convert_document(&document, &options).expect("first run");
        let first = fs::read(temp.path().join("img.txt")).expect("read first");
        convert_document(&document, &options).expect("second run");
        let second = fs::read(temp.path().join("img.txt")).expect("read second");

        prop_assert_eq!(first, second);
    }
}
