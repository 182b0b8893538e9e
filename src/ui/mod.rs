//! Terminal User Interface module.
//!
//! # Module Structure
//!
//! - `loop_runner` - Main event loop and terminal management
//! - `input` - Keyboard input dispatch
//! - `render` - Layout and size checks
//! - `tree` - Category tree widget
//! - `search` - Type-ahead panel
//! - `status` - Counter line and status bar
//! - `help` - Keybinding overlay

mod help;
mod input;
mod loop_runner;
mod render;
mod search;
mod status;
mod tree;

pub use loop_runner::{run, Action};
