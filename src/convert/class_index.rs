//! Mapping from source category ids to output class indices.

use std::collections::HashMap;

use log::warn;

use super::report::{ConversionIssue, ConversionIssueCode, ConversionReport};
use crate::coco::{Category, CategoryId};

/// Category id to zero-based class index, built once per run.
///
/// The class index is the position of the category's name in the
/// caller's class list. Categories whose name is not in that list have
/// no entry.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClassIndexMap {
    indices: HashMap<CategoryId, usize>,
}

impl ClassIndexMap {
    /// Builds the map, warning once for every category left out.
    ///
    /// Two categories sharing a name both map to that name's index. An
    /// empty class list simply yields an empty map.
    pub fn build(
        categories: &[Category],
        class_names: &[String],
        report: &mut ConversionReport,
    ) -> Self {
        let mut indices = HashMap::with_capacity(categories.len());

        for category in categories {
            match class_names.iter().position(|name| *name == category.name) {
                Some(index) => {
                    indices.insert(category.id, index);
                }
                None => {
                    let message = format!(
                        "category {} ('{}') is not in the class list; its annotations are ignored",
                        category.id, category.name
                    );
                    warn!("{}", message);
                    report.add(ConversionIssue::warning(
                        ConversionIssueCode::UnmappedCategory,
                        message,
                    ));
                }
            }
        }

        Self { indices }
    }

    /// Returns the class index for `category_id`.
    #[inline]
    pub fn get(&self, category_id: CategoryId) -> Option<usize> {
        self.indices.get(&category_id).copied()
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Entries sorted by category id, for display.
    pub fn entries(&self) -> Vec<(CategoryId, usize)> {
        let mut entries: Vec<_> = self.indices.iter().map(|(id, idx)| (*id, *idx)).collect();
        entries.sort();
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn maps_by_position_in_class_list() {
        let mut report = ConversionReport::new();
        let categories = vec![
            Category::new(3i64, "raise head"),
            Category::new(7i64, "lower head"),
        ];

        let map = ClassIndexMap::build(
            &categories,
            &names(&["raise head", "lower head"]),
            &mut report,
        );

        assert_eq!(map.get(CategoryId::new(3)), Some(0));
        assert_eq!(map.get(CategoryId::new(7)), Some(1));
        assert_eq!(report.warning_count(), 0);
    }

    #[test]
    fn unknown_names_are_left_out_with_a_warning() {
        let mut report = ConversionReport::new();
        let categories = vec![Category::new(1i64, "person"), Category::new(2i64, "dog")];

        let map = ClassIndexMap::build(&categories, &names(&["dog"]), &mut report);

        assert_eq!(map.get(CategoryId::new(1)), None);
        assert_eq!(map.get(CategoryId::new(2)), Some(0));
        assert_eq!(map.len(), 1);

        let warnings: Vec<_> = report
            .issues_with(ConversionIssueCode::UnmappedCategory)
            .collect();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].message.contains("category 1 ('person')"));
    }

    #[test]
    fn duplicate_source_names_share_an_index() {
        let mut report = ConversionReport::new();
        let categories = vec![Category::new(10i64, "car"), Category::new(20i64, "car")];

        let map = ClassIndexMap::build(&categories, &names(&["bus", "car"]), &mut report);

        assert_eq!(map.get(CategoryId::new(10)), Some(1));
        assert_eq!(map.get(CategoryId::new(20)), Some(1));
    }

    #[test]
    fn duplicate_class_names_use_first_position() {
        let mut report = ConversionReport::new();
        let categories = vec![Category::new(1i64, "car")];

        let map = ClassIndexMap::build(&categories, &names(&["car", "car"]), &mut report);

        assert_eq!(map.get(CategoryId::new(1)), Some(0));
    }

    #[test]
    fn empty_class_list_yields_empty_map() {
        let mut report = ConversionReport::new();
        let categories = vec![Category::new(1i64, "car")];

        let map = ClassIndexMap::build(&categories, &[], &mut report);

        assert!(map.is_empty());
        assert_eq!(report.warning_count(), 1);
    }

    #[test]
    fn entries_are_sorted_by_category_id() {
        let mut report = ConversionReport::new();
        let categories = vec![Category::new(9i64, "b"), Category::new(2i64, "a")];

        let map = ClassIndexMap::build(&categories, &names(&["a", "b"]), &mut report);

        assert_eq!(
            map.entries(),
            vec![(CategoryId::new(2), 0), (CategoryId::new(9), 1)]
        );
    }
}
