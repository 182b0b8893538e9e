use std::collections::{HashMap, HashSet};

use super::types::{Category, CategoryError};

/// Owns the category list and tracks what changed since the last mutation.
///
/// The store is the only writer of category state. Callers mutate through
/// [`CategoryStore::toggle_by_names`] and then read [`CategoryStore::changes`]
/// to learn which records need re-rendering.
#[derive(Debug, Clone)]
pub struct CategoryStore {
    current: Vec<Category>,
    /// Checked state per name, taken before the most recent mutation.
    snapshot: HashMap<String, bool>,
}

impl CategoryStore {
    /// Build a store from an initial list, validating the tree invariants.
    ///
    /// Rejects empty names, duplicate names, subcategories whose parent is
    /// missing, and subcategories nested under other subcategories.
    pub fn new(categories: Vec<Category>) -> Result<Self, CategoryError> {
        validate(&categories)?;
        let mut store = Self {
            current: categories,
            snapshot: HashMap::new(),
        };
        store.snapshot_state();
        tracing::debug!(
            categories = store.current.len(),
            primaries = store.primaries().count(),
            "Category store initialized"
        );
        Ok(store)
    }

    /// Record the current checked state as the baseline for [`Self::changes`].
    pub fn snapshot_state(&mut self) {
        self.snapshot = self
            .current
            .iter()
            .map(|c| (c.name.clone(), c.checked))
            .collect();
    }

    /// Flip every category whose name is in `names`, then propagate.
    ///
    /// Categories are visited in list order. A subcategory that becomes
    /// checked also checks its primary. A primary that becomes unchecked
    /// unchecks each of its children that is still checked. The snapshot
    /// is taken once, before any flip, so `changes()` reports the net
    /// effect of the whole call.
    pub fn toggle_by_names<I, S>(&mut self, names: I) -> Result<(), CategoryError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let wanted: Vec<S> = names.into_iter().collect();
        let wanted: HashSet<&str> = wanted.iter().map(AsRef::as_ref).collect();

        self.snapshot_state();

        for idx in 0..self.current.len() {
            if wanted.contains(self.current[idx].name.as_str()) {
                self.toggle_at(idx)?;
            }
        }
        Ok(())
    }

    /// Flip one category and apply the propagation rules.
    fn toggle_at(&mut self, idx: usize) -> Result<(), CategoryError> {
        let category = &mut self.current[idx];
        category.checked = !category.checked;
        let checked = category.checked;

        match category.parent_name.clone() {
            Some(parent) if checked => {
                let Some(parent_idx) = self.primary_index(&parent) else {
                    let err = CategoryError::ParentNotFound {
                        child: self.current[idx].name.clone(),
                        parent,
                    };
                    tracing::error!(error = %err, "Parent lookup failed during propagation");
                    // Construction rejects unknown parents, so this is a bug.
                    if cfg!(debug_assertions) {
                        panic!("{err}");
                    }
                    return Err(err);
                };
                self.current[parent_idx].checked = true;
            }
            None if !checked => {
                let name = self.current[idx].name.clone();
                let children: Vec<usize> = self
                    .current
                    .iter()
                    .enumerate()
                    .filter(|(_, c)| c.parent_name.as_deref() == Some(name.as_str()))
                    .map(|(i, _)| i)
                    .collect();
                for child_idx in children {
                    // Re-check at visit time; earlier cascades may have changed it.
                    if self.current[child_idx].checked {
                        self.toggle_at(child_idx)?;
                    }
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn primary_index(&self, name: &str) -> Option<usize> {
        self.current
            .iter()
            .position(|c| c.is_primary() && c.name == name)
    }

    /// All categories, in list order.
    pub fn all(&self) -> &[Category] {
        &self.current
    }

    pub fn len(&self) -> usize {
        self.current.len()
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_empty()
    }

    /// Look up a category by name.
    pub fn get(&self, name: &str) -> Option<&Category> {
        self.current.iter().find(|c| c.name == name)
    }

    /// Top-level categories, lazily, in list order.
    pub fn primaries(&self) -> impl Iterator<Item = &Category> + Clone + '_ {
        self.current.iter().filter(|c| c.is_primary())
    }

    /// Direct children of the primary named `parent_name`, in list order.
    pub fn children_of<'a>(
        &'a self,
        parent_name: &'a str,
    ) -> impl Iterator<Item = &'a Category> + Clone + 'a {
        self.current
            .iter()
            .filter(move |c| c.parent_name.as_deref() == Some(parent_name))
    }

    /// The primary that `category` belongs to, if any.
    pub fn parent_of(&self, category: &Category) -> Option<&Category> {
        let parent = category.parent_name.as_deref()?;
        self.primaries().find(|c| c.name == parent)
    }

    /// Names of every category matching `predicate`, in list order.
    pub fn filtered_names<F>(&self, mut predicate: F) -> Vec<&str>
    where
        F: FnMut(&Category) -> bool,
    {
        self.current
            .iter()
            .filter(|c| predicate(c))
            .map(|c| c.name.as_str())
            .collect()
    }

    /// Every checked category, in list order.
    pub fn checked(&self) -> Vec<&Category> {
        self.current.iter().filter(|c| c.checked).collect()
    }

    pub fn checked_count(&self) -> usize {
        self.current.iter().filter(|c| c.checked).count()
    }

    /// Categories whose checked state differs from the last snapshot.
    ///
    /// Compared by name, so the result does not depend on list positions.
    /// A name missing from the snapshot is reported as changed.
    pub fn changes(&self) -> Vec<&Category> {
        self.current
            .iter()
            .filter(|c| self.snapshot.get(&c.name) != Some(&c.checked))
            .collect()
    }
}

/// Check the two-level tree invariants over a candidate list.
fn validate(categories: &[Category]) -> Result<(), CategoryError> {
    let mut seen: HashSet<&str> = HashSet::with_capacity(categories.len());
    for (index, category) in categories.iter().enumerate() {
        if category.name.trim().is_empty() {
            return Err(CategoryError::EmptyName { index });
        }
        if !seen.insert(category.name.as_str()) {
            return Err(CategoryError::DuplicateName(category.name.clone()));
        }
    }

    let by_name: HashMap<&str, &Category> =
        categories.iter().map(|c| (c.name.as_str(), c)).collect();
    for category in categories {
        let Some(parent) = category.parent_name.as_deref() else {
            continue;
        };
        match by_name.get(parent) {
            None => {
                return Err(CategoryError::ParentNotFound {
                    child: category.name.clone(),
                    parent: parent.to_owned(),
                })
            }
            Some(p) if !p.is_primary() => {
                return Err(CategoryError::TooDeep {
                    child: category.name.clone(),
                    parent: parent.to_owned(),
                })
            }
            Some(_) => {}
        }
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
