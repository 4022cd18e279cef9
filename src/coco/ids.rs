//! Newtype IDs for the identifiers COCO documents use to link entities.
//!
//! Using newtypes prevents accidentally passing an image ID where a
//! category ID is expected when building lookup tables.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of an image entry (`images[].id`, `annotations[].image_id`).
///
/// Any JSON integer is accepted, negative ones included.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageId(pub i64);

impl ImageId {
    /// Creates a new ImageId.
    #[inline]
    pub fn new(id: i64) -> Self {
        Self(id)
    }

}

impl fmt::Debug for ImageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ImageId({})", self.0)
    }
}

impl fmt::Display for ImageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for ImageId {
    fn from(id: i64) -> Self {
        ImageId::new(id)
    }
}

/// Identifier of a category entry (`categories[].id`, `annotations[].category_id`).
///
/// Source documents do not guarantee these are contiguous or zero-based;
/// they are never used as output class indices directly.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(pub i64);

impl CategoryId {
    /// Creates a new CategoryId.
    #[inline]
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the underlying integer value.
    #[inline]
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl fmt::Debug for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CategoryId({})", self.0)
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for CategoryId {
    fn from(id: i64) -> Self {
        CategoryId::new(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_display_is_bare_number() {
        assert_eq!(ImageId(42).to_string(), "42");
        assert_eq!(format!("{:?}", CategoryId(7)), "CategoryId(7)");
    }

    #[test]
    fn ids_deserialize_transparently() {
        let id: CategoryId = serde_json::from_str("7").unwrap();
        assert_eq!(id, CategoryId::new(7));
    }

    #[test]
    fn negative_ids_are_accepted() {
        let id: ImageId = serde_json::from_str("-1").unwrap();
        assert_eq!(id, ImageId::new(-1));
        assert_eq!(id.to_string(), "-1");
        let id: CategoryId = serde_json::from_str("-42").unwrap();
        assert_eq!(id.as_i64(), -42);
    }
}
