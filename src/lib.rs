//! Checkbox-tree picker for two-level category selections.
//!
//! [`category::CategoryStore`] owns the selection state and its propagation
//! rules; the rest of the crate loads it from disk and presents it.

pub mod app;
pub mod category;
pub mod config;
pub mod keybindings;
pub mod loader;
pub mod output;
pub mod theme;
pub mod ui;
pub mod util;
