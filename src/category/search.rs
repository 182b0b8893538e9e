//! Type-ahead search over category names.

use std::collections::HashSet;

use super::store::CategoryStore;
use super::types::Category;

/// Maximum accepted query length, in characters.
pub const MAX_QUERY_LENGTH: usize = 256;

/// Case-insensitive substring match on the category name.
pub fn name_matches(category: &Category, query_lower: &str) -> bool {
    category.name.to_lowercase().contains(query_lower)
}

/// Names matching `query`, in list order.
///
/// An empty query matches nothing. With `dedupe` set, repeated names are
/// dropped after their first occurrence.
pub fn filter_results<'a>(store: &'a CategoryStore, query: &str, dedupe: bool) -> Vec<&'a str> {
    if query.is_empty() {
        return Vec::new();
    }
    let query_lower = query.to_lowercase();
    let results = store.filtered_names(|c| name_matches(c, &query_lower));
    if !dedupe {
        return results;
    }

    let mut seen = HashSet::with_capacity(results.len());
    results.into_iter().filter(|name| seen.insert(*name)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> CategoryStore {
        CategoryStore::new(vec![
            Category::primary("Food", "c-1", false),
            Category::child("Fruit", "c-2", "Food", false),
            Category::child("Dried fruit", "c-3", "Food", false),
            Category::primary("Furniture", "c-4", false),
        ])
        .unwrap()
    }

    #[test]
    fn test_empty_query_returns_nothing() {
        assert!(filter_results(&store(), "", true).is_empty());
    }

    #[test]
    fn test_substring_match_is_case_insensitive() {
        let store = store();
        assert_eq!(
            filter_results(&store, "fr", false),
            vec!["Fruit", "Dried fruit"]
        );
        assert_eq!(
            filter_results(&store, "FRUIT", true),
            vec!["Fruit", "Dried fruit"]
        );
    }

    #[test]
    fn test_results_follow_list_order() {
        let store = store();
        assert_eq!(
            filter_results(&store, "f", true),
            vec!["Food", "Fruit", "Dried fruit", "Furniture"]
        );
    }

    #[test]
    fn test_no_match() {
        assert!(filter_results(&store(), "zzz", true).is_empty());
    }
}
