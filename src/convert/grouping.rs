//! Annotations partitioned by owning image.

use std::collections::HashMap;

use crate::coco::{Annotation, ImageId};

/// Annotations grouped by `image_id`, each group in document order.
///
/// Groups for image ids that no image declares are kept; nothing ever
/// looks them up, so their annotations never reach a label file.
#[derive(Debug, Default)]
pub struct AnnotationsByImage<'a> {
    groups: HashMap<ImageId, Vec<&'a Annotation>>,
}

impl<'a> AnnotationsByImage<'a> {
    /// Stable partition of `annotations` by image id.
    pub fn group(annotations: &'a [Annotation]) -> Self {
        let mut groups: HashMap<ImageId, Vec<&'a Annotation>> = HashMap::new();
        for ann in annotations {
            groups.entry(ann.image_id).or_default().push(ann);
        }
        Self { groups }
    }

    /// Returns the annotations of `image_id`, or `None` if it has none at all.
    pub fn get(&self, image_id: ImageId) -> Option<&[&'a Annotation]> {
        self.groups.get(&image_id).map(Vec::as_slice)
    }

    /// Number of distinct image ids referenced.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Counts annotations whose image id is not accepted by `is_known`.
    pub fn count_orphans(&self, is_known: impl Fn(ImageId) -> bool) -> usize {
        self.groups
            .iter()
            .filter(|(id, _)| !is_known(**id))
            .map(|(_, anns)| anns.len())
            .sum()
    }
}
