//! Plain-text and JSON renderings for non-interactive use.
//!
//! Everything here returns strings; the binary decides where they go.

use crate::category::summary::{change_marker, subcategory_sentence};
use crate::category::{Category, CategoryStore};

/// One line per category: glyph, name, and the group sentence on primaries.
///
/// ```text
/// [x] Food (2 subcategories, 1 selected)
///     [x] Fruit
///     [ ] Vegetables
/// ```
pub fn tree_lines(store: &CategoryStore) -> Vec<String> {
    let mut lines = Vec::with_capacity(store.len());
    for primary in store.primaries() {
        let children = store.children_of(&primary.name);
        let total = children.clone().count();

        let mut line = format!("{} {}", glyph(primary.checked), primary.name);
        if total > 0 {
            let selected = children.clone().filter(|c| c.checked).count();
            line.push_str(&format!(" ({})", subcategory_sentence(total, total, selected)));
        }
        lines.push(line);

        lines.extend(
            children.map(|child| format!("    {} {}", glyph(child.checked), child.name)),
        );
    }
    lines
}

fn glyph(checked: bool) -> &'static str {
    if checked {
        "[x]"
    } else {
        "[ ]"
    }
}

/// Change markers for the last mutation, space separated.
///
/// Empty when nothing changed.
pub fn change_line(changes: &[&Category]) -> String {
    changes
        .iter()
        .map(|c| change_marker(c))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Submitted names, one per line.
pub fn selection_text(selection: &[&Category]) -> String {
    selection
        .iter()
        .map(|c| c.name.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Submitted categories as a JSON array of `{name, id[, parent]}` objects.
pub fn selection_json(selection: &[&Category]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(selection)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn store() -> CategoryStore {
        CategoryStore::new(vec![
            Category::primary("Food", "category-food", true),
            Category::child("Fruit", "category-fruit", "Food", true),
            Category::child("Vegetables", "category-vegetables", "Food", false),
            Category::primary("Drink", "category-drink", false),
        ])
        .unwrap()
    }

    #[test]
    fn test_tree_lines() {
        assert_eq!(
            tree_lines(&store()),
            vec![
                "[x] Food (2 subcategories, 1 selected)",
                "    [x] Fruit",
                "    [ ] Vegetables",
                "[ ] Drink",
            ]
        );
    }

    #[test]
    fn test_change_line() {
        let mut store = store();
        store.toggle_by_names(["Food"]).unwrap();
        assert_eq!(change_line(&store.changes()), "-Food -Fruit");

        store.snapshot_state();
        assert_eq!(change_line(&store.changes()), "");
    }

    #[test]
    fn test_selection_text() {
        let store = store();
        assert_eq!(selection_text(&store.checked()), "Food\nFruit");
    }

    #[test]
    fn test_selection_json() {
        let store = store();
        let json = selection_json(&store.checked()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(
            value,
            serde_json::json!([
                { "name": "Food", "id": "category-food" },
                { "name": "Fruit", "id": "category-fruit", "parent": "Food" },
            ])
        );
    }
}
