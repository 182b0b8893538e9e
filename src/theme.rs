//! Theme system for the TUI.
//!
//! Provides semantic color roles that map to ratatui `Style` values.
//! The `ThemeVariant` enum selects between Dark and Light palettes,
//! and `StyleMap` resolves role names to concrete styles.

use ratatui::style::{Color, Modifier, Style};
use std::collections::HashMap;

// ============================================================================
// Theme Variant
// ============================================================================

/// Available theme variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeVariant {
    Dark,
    Light,
}

impl ThemeVariant {
    /// Parse a variant name from a string (case-insensitive).
    pub fn from_str_name(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "dark" => Some(Self::Dark),
            "light" => Some(Self::Light),
            _ => None,
        }
    }

    pub fn palette(self) -> ColorPalette {
        match self {
            Self::Dark => ColorPalette::dark(),
            Self::Light => ColorPalette::light(),
        }
    }

    /// Cycle to the next variant: Dark → Light → Dark.
    pub fn next(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    /// Human-readable name for status display.
    pub fn name(self) -> &'static str {
        match self {
            Self::Dark => "Dark",
            Self::Light => "Light",
        }
    }
}

// ============================================================================
// Color Palette: semantic roles to Style
// ============================================================================

/// A complete color palette mapping every semantic UI role to a `Style`.
#[derive(Debug, Clone)]
pub struct ColorPalette {
    // -- Category tree --
    pub tree_normal: Style,
    pub tree_cursor: Style,
    /// Checked rows ("selected" styling).
    pub tree_checked: Style,
    pub tree_group: Style,
    pub tree_summary: Style,

    // -- Search --
    pub search_prompt: Style,
    pub search_result: Style,
    pub search_selected: Style,

    // -- Chrome --
    pub counter: Style,
    pub status_bar: Style,
    pub panel_border: Style,
    pub panel_border_focused: Style,

    // -- Help overlay --
    pub help_heading: Style,
    pub help_body: Style,
    pub help_hint: Style,
}

impl ColorPalette {
    fn dark() -> Self {
        Self {
            tree_normal: Style::default(),
            tree_cursor: Style::default().bg(Color::DarkGray).fg(Color::White),
            tree_checked: Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
            tree_group: Style::default().add_modifier(Modifier::BOLD),
            tree_summary: Style::default().fg(Color::DarkGray),

            search_prompt: Style::default().fg(Color::Yellow),
            search_result: Style::default(),
            search_selected: Style::default().bg(Color::DarkGray).fg(Color::White),

            counter: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            status_bar: Style::default().bg(Color::DarkGray).fg(Color::White),
            panel_border: Style::default(),
            panel_border_focused: Style::default().fg(Color::Cyan),

            help_heading: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            help_body: Style::default(),
            help_hint: Style::default().fg(Color::DarkGray),
        }
    }

    /// Light palette, adapted for light terminal backgrounds.
    fn light() -> Self {
        Self {
            tree_normal: Style::default().fg(Color::Black),
            tree_cursor: Style::default().bg(Color::Blue).fg(Color::White),
            tree_checked: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            tree_group: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            tree_summary: Style::default().fg(Color::DarkGray),

            search_prompt: Style::default().fg(Color::Magenta),
            search_result: Style::default().fg(Color::Black),
            search_selected: Style::default().bg(Color::Blue).fg(Color::White),

            counter: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            status_bar: Style::default().bg(Color::White).fg(Color::Black),
            panel_border: Style::default().fg(Color::DarkGray),
            panel_border_focused: Style::default().fg(Color::Blue),

            help_heading: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            help_body: Style::default().fg(Color::Black),
            help_hint: Style::default().fg(Color::DarkGray),
        }
    }
}

// ============================================================================
// Style Map: string-keyed lookup
// ============================================================================

/// String-keyed style lookup, built from a `ColorPalette`.
#[derive(Debug, Clone)]
pub struct StyleMap {
    map: HashMap<&'static str, Style>,
}

/// All semantic role names, in declaration order.
const ROLE_NAMES: [&str; 15] = [
    "tree_normal",
    "tree_cursor",
    "tree_checked",
    "tree_group",
    "tree_summary",
    "search_prompt",
    "search_result",
    "search_selected",
    "counter",
    "status_bar",
    "panel_border",
    "panel_border_focused",
    "help_heading",
    "help_body",
    "help_hint",
];

impl StyleMap {
    pub fn from_palette(p: &ColorPalette) -> Self {
        let styles: [Style; 15] = [
            p.tree_normal,
            p.tree_cursor,
            p.tree_checked,
            p.tree_group,
            p.tree_summary,
            p.search_prompt,
            p.search_result,
            p.search_selected,
            p.counter,
            p.status_bar,
            p.panel_border,
            p.panel_border_focused,
            p.help_heading,
            p.help_body,
            p.help_hint,
        ];

        let map = ROLE_NAMES.iter().copied().zip(styles).collect();
        Self { map }
    }

    /// Resolve a role name to its `Style`. Returns `Style::default()` for unknown roles.
    pub fn resolve(&self, role: &str) -> Style {
        self.map.get(role).copied().unwrap_or_default()
    }
}

// ============================================================================
// Tests
// ============================================================================
