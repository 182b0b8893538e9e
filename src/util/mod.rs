//! Text helpers shared by the loader and the renderers.
//!
//! - **Sanitizing**: names come from a user-edited file and are printed to
//!   a terminal, so control characters and ANSI escapes are stripped
//! - **Width**: unicode-aware truncation for fixed-width tree rows
//!
//! # Examples
//!
//! ```
//! use catpick::util::{slugify, strip_control_chars, truncate_to_width};
//!
//! assert_eq!(strip_control_chars("\x1b[1mFood\x1b[0m"), "Food");
//! assert_eq!(truncate_to_width("Cloud hosting", 8), "Cloud...");
//! assert_eq!(slugify("Cloud hosting"), "cloud-hosting");
//! ```

mod text;

pub use text::{display_width, slugify, strip_control_chars, truncate_to_width};
