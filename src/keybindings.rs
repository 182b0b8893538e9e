//! Keybinding registry: maps actions to key events with config overrides.
//!
//! Bindings are data rather than match arms so the help overlay can list
//! them and `config.toml` can rebind them.
use crossterm::event::{KeyCode, KeyModifiers};
use std::collections::HashMap;

// ============================================================================
// Action Enum
// ============================================================================

/// All user-facing actions that can be triggered by keybindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Quit,
    Submit,
    NavDown,
    NavUp,
    PageDown,
    PageUp,
    Toggle,
    CollapseGroup,
    ExpandGroup,
    ClearFilter,
    EnterSearch,
    ExitSearch,
    CommitSearch,
    CycleTheme,
    ShowHelp,
}

impl Action {
    /// Human-readable description for the help screen.
    pub fn describe(self) -> &'static str {
        match self {
            Self::Quit => "Quit without submitting",
            Self::Submit => "Submit selection and exit",
            Self::NavDown => "Navigate down",
            Self::NavUp => "Navigate up",
            Self::PageDown => "Page down",
            Self::PageUp => "Page up",
            Self::Toggle => "Check / uncheck category",
            Self::CollapseGroup => "Collapse group",
            Self::ExpandGroup => "Expand group",
            Self::ClearFilter => "Clear search filter",
            Self::EnterSearch => "Search categories",
            Self::ExitSearch => "Cancel search",
            Self::CommitSearch => "Filter tree and jump to result",
            Self::CycleTheme => "Cycle theme",
            Self::ShowHelp => "Show help",
        }
    }
}

// ============================================================================
// Context Enum
// ============================================================================

/// Dispatch context: determines which bindings are active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Context {
    Global,
    Tree,
    Search,
}

// ============================================================================
// Key Specification
// ============================================================================

/// A key event: code + modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeySpec {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeySpec {
    pub const fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    pub const fn plain(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    pub const fn ctrl(c: char) -> Self {
        Self::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }
}

/// Parse a key string from config into a KeySpec.
///
/// Accepts single characters ("q", "/"), named keys ("Enter", "Esc",
/// "Tab", "Space", arrows, "Backspace", "PageUp", "PageDown"), "Ctrl+<c>"
/// and "F1" through "F12".
fn parse_key_string(s: &str) -> Option<KeySpec> {
    let s = s.trim();

    if let Some(rest) = s.strip_prefix("Ctrl+") {
        let mut chars = rest.trim().chars();
        let c = chars.next()?;
        return chars.next().is_none().then(|| KeySpec::ctrl(c));
    }

    let named = match s.to_lowercase().as_str() {
        "enter" | "return" => Some(KeyCode::Enter),
        "esc" | "escape" => Some(KeyCode::Esc),
        "tab" => Some(KeyCode::Tab),
        "up" => Some(KeyCode::Up),
        "down" => Some(KeyCode::Down),
        "left" => Some(KeyCode::Left),
        "right" => Some(KeyCode::Right),
        "backspace" => Some(KeyCode::Backspace),
        "pageup" => Some(KeyCode::PageUp),
        "pagedown" => Some(KeyCode::PageDown),
        "space" => Some(KeyCode::Char(' ')),
        _ => None,
    };
    if let Some(code) = named {
        return Some(KeySpec::plain(code));
    }

    if let Some(n) = s
        .strip_prefix(['F', 'f'])
        .and_then(|n| n.parse::<u8>().ok())
    {
        return (1..=12).contains(&n).then(|| KeySpec::plain(KeyCode::F(n)));
    }

    let mut chars = s.chars();
    let c = chars.next()?;
    chars
        .next()
        .is_none()
        .then(|| KeySpec::plain(KeyCode::Char(c)))
}

/// True for keys that type a character into the search prompt.
fn is_text_key(key: &KeySpec) -> bool {
    matches!(key.code, KeyCode::Char(_)) && !key.modifiers.contains(KeyModifiers::CONTROL)
}

/// Format a KeySpec as a human-readable string for the help screen.
fn format_key(key: &KeySpec) -> String {
    let modifier = if key.modifiers.contains(KeyModifiers::CONTROL) {
        "Ctrl+"
    } else {
        ""
    };

    let key_name = match key.code {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::Up => "Up".to_string(),
        KeyCode::Down => "Down".to_string(),
        KeyCode::Left => "Left".to_string(),
        KeyCode::Right => "Right".to_string(),
        KeyCode::Backspace => "Backspace".to_string(),
        KeyCode::PageUp => "PageUp".to_string(),
        KeyCode::PageDown => "PageDown".to_string(),
        KeyCode::F(n) => format!("F{}", n),
        _ => "?".to_string(),
    };

    format!("{}{}", modifier, key_name)
}

// ============================================================================
// Keybinding Registry
// ============================================================================

/// Registry of keybindings, supporting default bindings and config overrides.
///
/// The same key can map to different actions in different contexts.
pub struct KeybindingRegistry {
    lookup: HashMap<(Context, KeySpec), Action>,
    /// All bindings in registration order, for the help screen.
    bindings: Vec<(Context, KeySpec, Action)>,
}

impl KeybindingRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            lookup: HashMap::new(),
            bindings: Vec::new(),
        };
        registry.register_defaults();
        registry
    }

    fn bind(&mut self, context: Context, key: KeySpec, action: Action) {
        self.lookup.insert((context, key), action);
        self.bindings.push((context, key, action));
    }

    fn register_defaults(&mut self) {
        use KeyCode::*;

        // === Global ===
        self.bind(Context::Global, KeySpec::plain(Char('q')), Action::Quit);
        self.bind(Context::Global, KeySpec::plain(Enter), Action::Submit);
        self.bind(Context::Global, KeySpec::plain(Char('T')), Action::CycleTheme);
        self.bind(Context::Global, KeySpec::plain(Char('?')), Action::ShowHelp);

        // === Tree ===
        self.bind(Context::Tree, KeySpec::plain(Char('j')), Action::NavDown);
        self.bind(Context::Tree, KeySpec::plain(Down), Action::NavDown);
        self.bind(Context::Tree, KeySpec::plain(Char('k')), Action::NavUp);
        self.bind(Context::Tree, KeySpec::plain(Up), Action::NavUp);
        self.bind(Context::Tree, KeySpec::ctrl('d'), Action::PageDown);
        self.bind(Context::Tree, KeySpec::plain(PageDown), Action::PageDown);
        self.bind(Context::Tree, KeySpec::ctrl('u'), Action::PageUp);
        self.bind(Context::Tree, KeySpec::plain(PageUp), Action::PageUp);
        self.bind(Context::Tree, KeySpec::plain(Char(' ')), Action::Toggle);
        self.bind(Context::Tree, KeySpec::plain(Char('h')), Action::CollapseGroup);
        self.bind(Context::Tree, KeySpec::plain(Left), Action::CollapseGroup);
        self.bind(Context::Tree, KeySpec::plain(Char('l')), Action::ExpandGroup);
        self.bind(Context::Tree, KeySpec::plain(Right), Action::ExpandGroup);
        self.bind(Context::Tree, KeySpec::plain(Char('/')), Action::EnterSearch);
        self.bind(Context::Tree, KeySpec::plain(Esc), Action::ClearFilter);

        // === Search prompt ===
        // Printable characters go to the query, so only non-text keys bind here.
        self.bind(Context::Search, KeySpec::plain(Esc), Action::ExitSearch);
        self.bind(Context::Search, KeySpec::plain(Enter), Action::CommitSearch);
        self.bind(Context::Search, KeySpec::plain(Down), Action::NavDown);
        self.bind(Context::Search, KeySpec::plain(Up), Action::NavUp);
        self.bind(Context::Search, KeySpec::plain(Tab), Action::Toggle);
    }

    /// Apply user overrides from config keybindings map.
    ///
    /// Keys in the map are action names (e.g., "quit", "nav_down").
    /// Values are key strings (e.g., "q", "Ctrl+d", "F5").
    ///
    /// Returns a list of warnings for unrecognized action names or unparseable keys.
    pub fn apply_overrides(&mut self, overrides: &HashMap<String, String>) -> Vec<String> {
        let mut warnings = Vec::new();

        for (action_name, key_str) in overrides {
            let Some(action) = parse_action_name(action_name) else {
                warnings.push(format!("Unknown action '{}', ignoring", action_name));
                continue;
            };

            let Some(key) = parse_key_string(key_str) else {
                warnings.push(format!(
                    "Cannot parse key '{}' for action '{}', ignoring",
                    key_str, action_name
                ));
                continue;
            };

            // Rebind in every context the action was bound in. A text key
            // cannot bind in the search prompt, where it is query input;
            // there the default binding stays.
            let text_key = is_text_key(&key);
            let rebinds = |ctx: Context| !(text_key && ctx == Context::Search);

            let mut contexts: Vec<Context> = Vec::new();
            for (ctx, _, a) in &self.bindings {
                if *a == action && rebinds(*ctx) && !contexts.contains(ctx) {
                    contexts.push(*ctx);
                }
            }

            self.lookup.retain(|(ctx, _), a| *a != action || !rebinds(*ctx));
            self.bindings.retain(|(ctx, _, a)| *a != action || !rebinds(*ctx));

            for ctx in contexts {
                self.bind(ctx, key, action);
            }

            tracing::info!(
                action = %action_name,
                key = %key_str,
                "Applied keybinding override"
            );
        }

        warnings
    }

    /// Look up the action for a key in `context`, falling back to Global.
    pub fn action_for_key(
        &self,
        code: KeyCode,
        modifiers: KeyModifiers,
        context: Context,
    ) -> Option<Action> {
        self.action_in_context(code, modifiers, context)
            .or_else(|| self.action_in_context(code, modifiers, Context::Global))
    }

    /// Look up the action for a key in exactly `context`, without fallback.
    ///
    /// Used by the search prompt, where unbound keys are query text.
    pub fn action_in_context(
        &self,
        code: KeyCode,
        modifiers: KeyModifiers,
        context: Context,
    ) -> Option<Action> {
        self.lookup
            .get(&(context, KeySpec::new(code, modifiers)))
            .copied()
    }

    /// All bindings as (context, key display string, action, description).
    pub fn all_bindings(&self) -> Vec<(Context, String, Action, &'static str)> {
        self.bindings
            .iter()
            .map(|(ctx, key, action)| (*ctx, format_key(key), *action, action.describe()))
            .collect()
    }
}

impl Default for KeybindingRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse an action name string (from config) into an Action enum.
fn parse_action_name(name: &str) -> Option<Action> {
    match name.to_lowercase().as_str() {
        "quit" => Some(Action::Quit),
        "submit" => Some(Action::Submit),
        "nav_down" | "navdown" | "down" => Some(Action::NavDown),
        "nav_up" | "navup" | "up" => Some(Action::NavUp),
        "page_down" | "pagedown" => Some(Action::PageDown),
        "page_up" | "pageup" => Some(Action::PageUp),
        "toggle" | "check" => Some(Action::Toggle),
        "collapse_group" | "collapse" => Some(Action::CollapseGroup),
        "expand_group" | "expand" => Some(Action::ExpandGroup),
        "clear_filter" | "clearfilter" => Some(Action::ClearFilter),
        "enter_search" | "entersearch" | "search" => Some(Action::EnterSearch),
        "exit_search" | "exitsearch" => Some(Action::ExitSearch),
        "commit_search" | "commitsearch" => Some(Action::CommitSearch),
        "cycle_theme" | "cycletheme" | "theme" => Some(Action::CycleTheme),
        "show_help" | "showhelp" | "help" => Some(Action::ShowHelp),
        _ => None,
    }
}

// ============================================================================
// Tests
// ============================================================================
