use serde::Serialize;
use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

/// Errors raised when category data breaks the two-level tree invariants.
///
/// These describe malformed input rather than user mistakes. The loader
/// surfaces them at startup; during propagation they indicate a bug.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CategoryError {
    /// A category has an empty (or whitespace-only) name.
    #[error("Category name cannot be empty (entry {index})")]
    EmptyName { index: usize },

    /// Two categories share the same name.
    #[error("Duplicate category name '{0}'")]
    DuplicateName(String),

    /// A subcategory names a parent that is not a primary category.
    #[error("Category '{child}' references unknown primary '{parent}'")]
    ParentNotFound { child: String, parent: String },

    /// A subcategory names another subcategory as its parent.
    #[error("Category '{child}' is nested under subcategory '{parent}' (max depth is 2)")]
    TooDeep { child: String, parent: String },
}

// ============================================================================
// Category Record
// ============================================================================

/// A single selectable category.
///
/// The `name` doubles as the identifier: lookups, toggles and parent
/// references all go through it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Category {
    /// Display text, unique within a store.
    pub name: String,
    /// Identifier of the on-screen element bound to this category.
    #[serde(rename = "id")]
    pub element_id: String,
    /// `None` for a primary category, otherwise the primary's name.
    #[serde(rename = "parent", skip_serializing_if = "Option::is_none")]
    pub parent_name: Option<String>,
    /// Current selection state.
    #[serde(skip_serializing)]
    pub checked: bool,
}

impl Category {
    /// Create a primary (top-level) category.
    pub fn primary(name: impl Into<String>, element_id: impl Into<String>, checked: bool) -> Self {
        Self {
            name: name.into(),
            element_id: element_id.into(),
            parent_name: None,
            checked,
        }
    }

    /// Create a subcategory under the primary named `parent`.
    pub fn child(
        name: impl Into<String>,
        element_id: impl Into<String>,
        parent: impl Into<String>,
        checked: bool,
    ) -> Self {
        Self {
            name: name.into(),
            element_id: element_id.into(),
            parent_name: Some(parent.into()),
            checked,
        }
    }

    /// True for top-level categories.
    pub fn is_primary(&self) -> bool {
        self.parent_name.is_none()
    }
}
