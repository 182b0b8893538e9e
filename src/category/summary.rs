//! Human-readable sentences derived from the selection state.

use super::types::Category;

/// Footer counter, e.g. `"1 category selected."` or `"3 categories selected."`.
pub fn counter_text(count: usize) -> String {
    let noun = if count == 1 { "category" } else { "categories" };
    format!("{} {} selected.", count, noun)
}

/// Summary shown next to a primary that has subcategories.
///
/// `shown` is how many children are currently visible, `total` how many
/// exist. The `of <total>` clause only appears when a filter hides some
/// of them; the selected clause only when at least one child is checked.
pub fn subcategory_sentence(shown: usize, total: usize, selected: usize) -> String {
    let mut sentence = shown.to_string();
    if shown != total {
        sentence.push_str(&format!(" of {}", total));
    }
    let noun = if total > 1 { "subcategories" } else { "subcategory" };
    sentence.push(' ');
    sentence.push_str(noun);
    if selected > 0 {
        sentence.push_str(&format!(", {} selected", selected));
    }
    sentence
}

/// One-token description of a changed category: `+Name` when it is now
/// checked, `-Name` when it is now unchecked.
pub fn change_marker(category: &Category) -> String {
    let sign = if category.checked { '+' } else { '-' };
    format!("{}{}", sign, category.name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_change_marker() {
        let checked = Category::primary("Food", "c-1", true);
        let unchecked = Category::child("Fruit", "c-2", "Food", false);
        assert_eq!(change_marker(&checked), "+Food");
        assert_eq!(change_marker(&unchecked), "-Fruit");
    }

    #[test]
    fn test_counter_singular() {
        assert_eq!(counter_text(1), "1 category selected.");
    }

    #[test]
    fn test_counter_plural() {
        assert_eq!(counter_text(0), "0 categories selected.");
        assert_eq!(counter_text(12), "12 categories selected.");
    }

    #[test]
    fn test_sentence_all_shown() {
        assert_eq!(subcategory_sentence(3, 3, 0), "3 subcategories");
        assert_eq!(subcategory_sentence(1, 1, 0), "1 subcategory");
    }

    #[test]
    fn test_sentence_filtered() {
        assert_eq!(subcategory_sentence(2, 5, 0), "2 of 5 subcategories");
    }

    #[test]
    fn test_sentence_with_selection() {
        assert_eq!(subcategory_sentence(4, 4, 2), "4 subcategories, 2 selected");
        assert_eq!(subcategory_sentence(1, 3, 1), "1 of 3 subcategories, 1 selected");
    }
}
