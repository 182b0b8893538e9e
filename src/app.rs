use crate::category::search::{self, MAX_QUERY_LENGTH};
use crate::category::summary::{change_marker, counter_text, subcategory_sentence};
use crate::category::{Category, CategoryError, CategoryStore};
use crate::config::Config;
use crate::keybindings::KeybindingRegistry;
use crate::theme::{StyleMap, ThemeVariant};
use ratatui::style::Style;
use std::borrow::Cow;
use std::collections::HashSet;
use tokio::time::Instant;

// ============================================================================
// Tree Rows
// ============================================================================

/// A single visible row in the flattened category tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeRow {
    pub name: String,
    /// 0 for primaries, 1 for subcategories.
    pub depth: usize,
    pub checked: bool,
    /// Present on primaries that have subcategories.
    pub group: Option<GroupInfo>,
}

/// Collapse state and summary of a primary with subcategories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupInfo {
    pub expanded: bool,
    /// e.g. "2 of 5 subcategories, 1 selected".
    pub summary: String,
}

// ============================================================================
// Search State
// ============================================================================

/// Type-ahead prompt state.
#[derive(Debug, Clone, Default)]
pub struct SearchState {
    pub query: String,
    /// Matching names for the current query, in list order.
    pub results: Vec<String>,
    /// Highlighted result index.
    pub selected: usize,
}

// ============================================================================
// Application State
// ============================================================================

/// Central application state.
///
/// Owns the category store; everything on screen is derived from it.
pub struct App {
    pub store: CategoryStore,

    // Theme
    pub theme_variant: ThemeVariant,
    pub theme: StyleMap,

    pub keybindings: KeybindingRegistry,

    /// Drop repeated names from type-ahead results.
    pub dedupe_search: bool,

    // Tree state
    /// Index into the visible rows from `tree_rows()`.
    pub cursor: usize,
    /// Names of primaries whose subcategories are hidden.
    pub collapsed: HashSet<String>,
    /// Committed search query narrowing the tree, if any.
    pub filter: Option<String>,
    /// Last known tree viewport height, for paging.
    pub tree_visible_lines: usize,

    // Search
    pub search_mode: bool,
    pub search: SearchState,

    /// Status message with expiry.
    pub status_message: Option<(Cow<'static, str>, Instant)>,

    /// Dirty flag to skip unnecessary frame renders.
    pub needs_redraw: bool,

    pub show_help: bool,
    pub help_scroll_offset: usize,
}

impl App {
    pub fn new(store: CategoryStore, config: &Config) -> Self {
        let theme_variant = ThemeVariant::from_str_name(&config.theme).unwrap_or_else(|| {
            tracing::warn!(theme = %config.theme, "Unknown theme, falling back to dark");
            ThemeVariant::Dark
        });

        let mut keybindings = KeybindingRegistry::new();
        for warning in keybindings.apply_overrides(&config.keybindings) {
            tracing::warn!("{}", warning);
        }

        let collapsed = if config.expand_groups {
            HashSet::new()
        } else {
            store
                .primaries()
                .filter(|p| store.children_of(&p.name).next().is_some())
                .map(|p| p.name.clone())
                .collect()
        };

        Self {
            store,
            theme_variant,
            theme: StyleMap::from_palette(&theme_variant.palette()),
            keybindings,
            dedupe_search: config.dedupe_search,
            cursor: 0,
            collapsed,
            filter: None,
            tree_visible_lines: 0,
            search_mode: false,
            search: SearchState::default(),
            status_message: None,
            needs_redraw: true,
            show_help: false,
            help_scroll_offset: 0,
        }
    }

    /// Resolve a semantic role name to its `Style`.
    pub fn style(&self, role: &str) -> Style {
        self.theme.resolve(role)
    }

    pub fn set_theme(&mut self, variant: ThemeVariant) {
        self.theme_variant = variant;
        self.theme = StyleMap::from_palette(&variant.palette());
        self.needs_redraw = true;
    }

    /// Cycle to the next theme variant, returning its name.
    pub fn cycle_theme(&mut self) -> &'static str {
        let next = self.theme_variant.next();
        self.set_theme(next);
        next.name()
    }

    // ========================================================================
    // Tree
    // ========================================================================

    /// Build the visible tree, honoring the filter and collapsed groups.
    ///
    /// A primary is shown when it matches the filter or any of its children
    /// do. A matching primary shows all its children; otherwise only the
    /// matching children are shown.
    pub fn tree_rows(&self) -> Vec<TreeRow> {
        let filter = self.filter.as_deref().map(str::to_lowercase);
        let matches = |c: &Category| {
            filter.as_deref().is_none_or(|q| search::name_matches(c, q))
        };

        let mut rows = Vec::with_capacity(self.store.len());
        for primary in self.store.primaries() {
            let children: Vec<&Category> = self.store.children_of(&primary.name).collect();
            let primary_matches = matches(primary);
            let shown: Vec<&Category> = if primary_matches {
                children.clone()
            } else {
                children.iter().copied().filter(|c| matches(*c)).collect()
            };
            if !primary_matches && shown.is_empty() {
                continue;
            }

            let expanded = !self.collapsed.contains(&primary.name);
            let group = (!children.is_empty()).then(|| GroupInfo {
                expanded,
                summary: subcategory_sentence(
                    shown.len(),
                    children.len(),
                    children.iter().filter(|c| c.checked).count(),
                ),
            });

            rows.push(TreeRow {
                name: primary.name.clone(),
                depth: 0,
                checked: primary.checked,
                group,
            });

            if expanded {
                rows.extend(shown.into_iter().map(|child| TreeRow {
                    name: child.name.clone(),
                    depth: 1,
                    checked: child.checked,
                    group: None,
                }));
            }
        }
        rows
    }

    /// Name of the category under the cursor.
    pub fn cursor_name(&self) -> Option<String> {
        self.tree_rows().into_iter().nth(self.cursor).map(|r| r.name)
    }

    /// Keep the cursor within the visible rows.
    pub fn clamp_cursor(&mut self) {
        let len = self.tree_rows().len();
        self.cursor = self.cursor.min(len.saturating_sub(1));
    }

    pub fn nav_up(&mut self) {
        if self.search_mode {
            self.search.selected = self.search.selected.saturating_sub(1);
        } else {
            self.cursor = self.cursor.saturating_sub(1);
        }
    }

    pub fn nav_down(&mut self) {
        if self.search_mode {
            let max = self.search.results.len().saturating_sub(1);
            self.search.selected = self.search.selected.saturating_add(1).min(max);
        } else {
            self.cursor = self.cursor.saturating_add(1);
            self.clamp_cursor();
        }
    }

    pub fn page_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(self.page_size());
    }

    pub fn page_down(&mut self) {
        self.cursor = self.cursor.saturating_add(self.page_size());
        self.clamp_cursor();
    }

    fn page_size(&self) -> usize {
        self.tree_visible_lines.max(1)
    }

    /// Collapse the group under the cursor. On a subcategory, collapses its
    /// primary and moves the cursor there.
    pub fn collapse_selected(&mut self) {
        let Some(name) = self.cursor_name() else {
            return;
        };
        let Some(category) = self.store.get(&name) else {
            return;
        };
        let group = match &category.parent_name {
            Some(parent) => parent.clone(),
            None if self.store.children_of(&name).next().is_some() => name,
            None => return,
        };
        self.collapsed.insert(group.clone());
        self.move_cursor_to(&group);
    }

    /// Expand the group under the cursor.
    pub fn expand_selected(&mut self) {
        if let Some(name) = self.cursor_name() {
            self.collapsed.remove(&name);
        }
    }

    /// Move the cursor to `name`, expanding its group if needed.
    pub fn move_cursor_to(&mut self, name: &str) {
        if let Some(parent) = self.store.get(name).and_then(|c| c.parent_name.clone()) {
            self.collapsed.remove(&parent);
        }
        if let Some(pos) = self.tree_rows().iter().position(|r| r.name == name) {
            self.cursor = pos;
        }
    }

    // ========================================================================
    // Selection
    // ========================================================================

    /// Toggle `name` and report what changed.
    ///
    /// Returns the changed categories as `(name, checked)` pairs in list
    /// order, and shows them in the status bar.
    pub fn toggle(&mut self, name: &str) -> Result<Vec<(String, bool)>, CategoryError> {
        self.store.toggle_by_names([name])?;

        let changes = self.store.changes();
        for category in &changes {
            tracing::debug!(
                name = %category.name,
                element_id = %category.element_id,
                checked = category.checked,
                "Category changed"
            );
        }
        let markers: Vec<String> = changes.iter().map(|c| change_marker(c)).collect();
        let changed: Vec<(String, bool)> = changes
            .iter()
            .map(|c| (c.name.clone(), c.checked))
            .collect();

        if !markers.is_empty() {
            self.set_status(markers.join(" "));
        }
        self.needs_redraw = true;
        Ok(changed)
    }

    /// Toggle the category under the cursor.
    pub fn toggle_selected(&mut self) -> Result<(), CategoryError> {
        if let Some(name) = self.cursor_name() {
            self.toggle(&name)?;
        }
        Ok(())
    }

    /// Footer text: "N categories selected."
    pub fn counter(&self) -> String {
        counter_text(self.store.checked_count())
    }

    /// Checked categories, for submission.
    pub fn selection(&self) -> Vec<&Category> {
        self.store.checked()
    }

    // ========================================================================
    // Search
    // ========================================================================

    pub fn enter_search(&mut self) {
        self.search_mode = true;
        self.search = SearchState::default();
    }

    /// Leave the prompt without applying it; also drops any committed filter.
    pub fn exit_search(&mut self) {
        self.search_mode = false;
        self.search = SearchState::default();
        self.clear_filter();
    }

    pub fn clear_filter(&mut self) {
        let current = self.cursor_name();
        self.filter = None;
        match current {
            Some(name) => self.move_cursor_to(&name),
            None => self.clamp_cursor(),
        }
    }

    pub fn search_push(&mut self, c: char) {
        if self.search.query.chars().count() >= MAX_QUERY_LENGTH {
            self.set_status(format!(
                "Search query too long (max {} chars)",
                MAX_QUERY_LENGTH
            ));
            return;
        }
        self.search.query.push(c);
        self.refresh_search_results();
    }

    pub fn search_pop(&mut self) {
        self.search.query.pop();
        self.refresh_search_results();
    }

    fn refresh_search_results(&mut self) {
        self.search.results =
            search::filter_results(&self.store, &self.search.query, self.dedupe_search)
                .into_iter()
                .map(str::to_owned)
                .collect();
        self.search.selected = 0;
        tracing::trace!(
            query = %self.search.query,
            results = self.search.results.len(),
            "Search results updated"
        );
    }

    /// Name of the highlighted search result.
    pub fn selected_result(&self) -> Option<&str> {
        self.search
            .results
            .get(self.search.selected)
            .map(String::as_str)
    }

    /// Toggle the highlighted search result without leaving the prompt.
    pub fn toggle_search_result(&mut self) -> Result<(), CategoryError> {
        if let Some(name) = self.selected_result().map(str::to_owned) {
            self.toggle(&name)?;
        }
        Ok(())
    }

    /// Apply the query as a tree filter and jump to the highlighted result.
    pub fn commit_search(&mut self) {
        self.search_mode = false;
        let search = std::mem::take(&mut self.search);
        if search.query.is_empty() {
            self.clear_filter();
            return;
        }

        let target = search.results.get(search.selected).cloned();
        self.filter = Some(search.query);
        self.cursor = 0;
        match target {
            Some(name) => self.move_cursor_to(&name),
            None => self.set_status("No matching categories"),
        }
        self.clamp_cursor();
    }

    // ========================================================================
    // Status
    // ========================================================================

    /// Set status message (will auto-expire after 3 seconds)
    pub fn set_status(&mut self, msg: impl Into<Cow<'static, str>>) {
        self.status_message = Some((msg.into(), Instant::now()));
    }

    /// Clear status message if expired. Returns true if one was cleared.
    pub fn clear_expired_status(&mut self) -> bool {
        if let Some((_, time)) = &self.status_message {
            if time.elapsed().as_secs() >= 3 {
                self.status_message = None;
                return true;
            }
        }
        false
    }
}
