//! Builds the initial category list from a TOML file.
//!
//! The file is a sequence of `[[category]]` tables:
//!
//! ```toml
//! [[category]]
//! name = "Food"
//! checked = true
//!
//! [[category]]
//! name = "Fruit"
//! parent = "Food"
//! id = "category-fruit"
//! ```
//!
//! `id` defaults to `category-<slug>` and `checked` to false. The hierarchy
//! comes only from `parent`; nothing is inferred from ordering.
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

use crate::category::{Category, CategoryError, CategoryStore};
use crate::util::{slugify, strip_control_chars};

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to read categories file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML in categories file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Categories file too large: {0}")]
    TooLarge(String),

    #[error("Invalid category data: {0}")]
    Invalid(#[from] CategoryError),
}

// ============================================================================
// File Format
// ============================================================================

#[derive(Debug, Deserialize)]
struct CategoryFile {
    #[serde(default, rename = "category")]
    categories: Vec<CategoryEntry>,
}

#[derive(Debug, Deserialize)]
struct CategoryEntry {
    name: String,
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    parent: Option<String>,
    #[serde(default)]
    checked: bool,
}

impl CategoryEntry {
    fn into_category(self) -> Category {
        let name = sanitize_name(&self.name);
        let element_id = match self.id {
            Some(id) if !id.trim().is_empty() => id.trim().to_owned(),
            _ => format!("category-{}", slugify(&name)),
        };
        Category {
            element_id,
            parent_name: self.parent.map(|p| sanitize_name(&p)),
            checked: self.checked,
            name,
        }
    }
}

/// Strip control characters and surrounding whitespace from a name.
fn sanitize_name(raw: &str) -> String {
    strip_control_chars(raw).trim().to_owned()
}

// ============================================================================
// Loading
// ============================================================================

/// Maximum categories file size (1 MB).
const MAX_FILE_SIZE: u64 = 1_048_576;

/// Parse category definitions from TOML text.
pub fn parse_categories(content: &str) -> Result<Vec<Category>, LoadError> {
    let file: CategoryFile = toml::from_str(content)?;
    Ok(file
        .categories
        .into_iter()
        .map(CategoryEntry::into_category)
        .collect())
}

/// Parse and validate TOML text into a ready-to-use store.
pub fn store_from_str(content: &str) -> Result<CategoryStore, LoadError> {
    let categories = parse_categories(content)?;
    Ok(CategoryStore::new(categories)?)
}

/// Read a categories file and build a store from it.
pub fn load_store(path: &Path) -> Result<CategoryStore, LoadError> {
    let meta = std::fs::metadata(path)?;
    if meta.len() > MAX_FILE_SIZE {
        return Err(LoadError::TooLarge(format!(
            "{} is {} bytes (max {} bytes)",
            path.display(),
            meta.len(),
            MAX_FILE_SIZE
        )));
    }

    let content = std::fs::read_to_string(path)?;
    let store = store_from_str(&content)?;
    tracing::info!(
        path = %path.display(),
        categories = store.len(),
        checked = store.checked_count(),
        "Loaded categories"
    );
    if store.is_empty() {
        tracing::warn!(path = %path.display(), "Categories file defines no categories");
    }
    Ok(store)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = r#"
[[category]]
name = "Food"
checked = true

[[category]]
name = "Fruit"
parent = "Food"
id = "fruit-box"

[[category]]
name = "Cloud hosting"
"#;

    #[test]
    fn test_parse_defaults() {
        let categories = parse_categories(SAMPLE).unwrap();
        assert_eq!(categories.len(), 3);

        assert_eq!(categories[0], Category::primary("Food", "category-food", true));
        assert_eq!(
            categories[1],
            Category::child("Fruit", "fruit-box", "Food", false)
        );
        assert_eq!(categories[2].element_id, "category-cloud-hosting");
    }

    #[test]
    fn test_empty_document_yields_empty_store() {
        let store = store_from_str("").unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_names_are_sanitized() {
        let content = "[[category]]\nname = \"  \\u001b[31mFood\\u001b[0m  \"\n";
        let categories = parse_categories(content).unwrap();
        assert_eq!(categories[0].name, "Food");
    }

    #[test]
    fn test_invalid_hierarchy_rejected() {
        let content = r#"
[[category]]
name = "Fruit"
parent = "Food"
"#;
        let err = store_from_str(content).unwrap_err();
        assert!(matches!(
            err,
            LoadError::Invalid(CategoryError::ParentNotFound { .. })
        ));
    }

    #[test]
    fn test_missing_name_is_parse_error() {
        let err = store_from_str("[[category]]\nchecked = true\n").unwrap_err();
        assert!(matches!(err, LoadError::Parse(_)));
    }

    #[test]
    fn test_load_store_from_file() {
        let dir = std::env::temp_dir().join("catpick_loader_test_file");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("categories.toml");
        std::fs::write(&path, SAMPLE).unwrap();

        let store = load_store(&path).unwrap();
        assert_eq!(store.len(), 3);
        assert_eq!(store.checked_count(), 1);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_load_store_missing_file() {
        let path = Path::new("/tmp/catpick_test_nonexistent_categories.toml");
        assert!(matches!(load_store(path), Err(LoadError::Io(_))));
    }
}
