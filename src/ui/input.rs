//! Input handling for the TUI.
//!
//! Routes key presses to the help overlay, the search prompt or the tree,
//! looking actions up in the keybinding registry.

use crate::app::App;
use crate::keybindings::{Action as KbAction, Context as KbContext};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyModifiers};

use super::Action;

/// Main input dispatch function.
pub(super) fn handle_input(
    app: &mut App,
    code: KeyCode,
    modifiers: KeyModifiers,
) -> Result<Action> {
    // Terminals report uppercase letters with SHIFT; bindings store the char alone.
    let modifiers = match code {
        KeyCode::Char(_) => modifiers.difference(KeyModifiers::SHIFT),
        _ => modifiers,
    };

    // Help overlay captures all keys when visible
    if app.show_help {
        return Ok(handle_help_input(app, code));
    }

    if app.search_mode {
        return handle_search_input(app, code, modifiers);
    }

    handle_tree_input(app, code, modifiers)
}

/// Handle input while the help overlay is visible.
///
/// Captures all keys: j/k/Up/Down scroll, Esc/q/? dismiss.
fn handle_help_input(app: &mut App, code: KeyCode) -> Action {
    match code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => {
            app.show_help = false;
            app.help_scroll_offset = 0;
        }
        KeyCode::Char('j') | KeyCode::Down => {
            app.help_scroll_offset = app.help_scroll_offset.saturating_add(1);
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.help_scroll_offset = app.help_scroll_offset.saturating_sub(1);
        }
        _ => {}
    }
    Action::Continue
}

fn handle_tree_input(app: &mut App, code: KeyCode, modifiers: KeyModifiers) -> Result<Action> {
    let Some(action) = app
        .keybindings
        .action_for_key(code, modifiers, KbContext::Tree)
    else {
        return Ok(Action::Continue);
    };

    match action {
        KbAction::Quit => return Ok(Action::Quit),
        KbAction::Submit => return Ok(Action::Submit),
        KbAction::NavDown => app.nav_down(),
        KbAction::NavUp => app.nav_up(),
        KbAction::PageDown => app.page_down(),
        KbAction::PageUp => app.page_up(),
        KbAction::Toggle => app.toggle_selected()?,
        KbAction::CollapseGroup => app.collapse_selected(),
        KbAction::ExpandGroup => app.expand_selected(),
        KbAction::ClearFilter => app.clear_filter(),
        KbAction::EnterSearch => app.enter_search(),
        KbAction::CycleTheme => {
            let name = app.cycle_theme();
            app.set_status(format!("Theme: {}", name));
        }
        KbAction::ShowHelp => {
            app.show_help = true;
            app.help_scroll_offset = 0;
        }
        // Search-only actions
        KbAction::ExitSearch | KbAction::CommitSearch => {}
    }
    Ok(Action::Continue)
}

/// Handle input in the search prompt.
///
/// Bound keys run their action; any other printable character extends the
/// query. Global bindings are not consulted, so `q` and `?` are query text.
fn handle_search_input(app: &mut App, code: KeyCode, modifiers: KeyModifiers) -> Result<Action> {
    if let Some(action) = app
        .keybindings
        .action_in_context(code, modifiers, KbContext::Search)
    {
        match action {
            KbAction::ExitSearch => app.exit_search(),
            KbAction::CommitSearch => app.commit_search(),
            KbAction::NavDown => app.nav_down(),
            KbAction::NavUp => app.nav_up(),
            KbAction::Toggle => app.toggle_search_result()?,
            _ => {}
        }
        return Ok(Action::Continue);
    }

    match code {
        KeyCode::Backspace => app.search_pop(),
        KeyCode::Char(c) if !modifiers.contains(KeyModifiers::CONTROL) => app.search_push(c),
        _ => {}
    }
    Ok(Action::Continue)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::{Category, CategoryStore};
    use crate::config::Config;
    use pretty_assertions::assert_eq;

    fn test_app() -> App {
        let store = CategoryStore::new(vec![
            Category::primary("Events", "c-1", false),
            Category::child("Quiz nights", "c-2", "Events", false),
            Category::primary("Queries", "c-3", false),
        ])
        .unwrap();
        App::new(store, &Config::default())
    }

    fn press(app: &mut App, code: KeyCode) -> Action {
        handle_input(app, code, KeyModifiers::NONE).unwrap()
    }

    fn type_str(app: &mut App, s: &str) {
        for c in s.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn test_quit_and_submit() {
        let mut app = test_app();
        assert_eq!(press(&mut app, KeyCode::Char('q')), Action::Quit);
        assert_eq!(press(&mut app, KeyCode::Enter), Action::Submit);
    }

    #[test]
    fn test_space_toggles_row_under_cursor() {
        let mut app = test_app();
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char(' '));
        assert_eq!(app.counter(), "2 categories selected.");
    }

    #[test]
    fn test_search_prompt_takes_global_keys_as_text() {
        let mut app = test_app();
        press(&mut app, KeyCode::Char('/'));
        assert!(app.search_mode);

        assert_eq!(press(&mut app, KeyCode::Char('q')), Action::Continue);
        type_str(&mut app, "ui");
        assert_eq!(app.search.query, "qui");
        assert_eq!(app.search.results, vec!["Quiz nights"]);

        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.search.query, "qu");
        assert_eq!(app.search.results, vec!["Quiz nights", "Queries"]);
    }

    #[test]
    fn test_search_tab_toggles_and_enter_commits() {
        let mut app = test_app();
        press(&mut app, KeyCode::Char('/'));
        type_str(&mut app, "quiz");
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.counter(), "2 categories selected.");

        assert_eq!(press(&mut app, KeyCode::Enter), Action::Continue);
        assert!(!app.search_mode);
        assert_eq!(app.filter.as_deref(), Some("quiz"));
        assert_eq!(app.cursor_name().as_deref(), Some("Quiz nights"));

        press(&mut app, KeyCode::Esc);
        assert!(app.filter.is_none());
    }

    #[test]
    fn test_shifted_char_matches_binding() {
        let mut app = test_app();
        handle_input(&mut app, KeyCode::Char('T'), KeyModifiers::SHIFT).unwrap();
        assert_eq!(app.theme_variant, crate::theme::ThemeVariant::Light);
    }

    #[test]
    fn test_overridden_text_key_stays_query_text() {
        let store = CategoryStore::new(vec![Category::primary("Boxes", "c-1", false)]).unwrap();
        let mut config = Config::default();
        config.keybindings.insert("toggle".to_string(), "x".to_string());
        let mut app = App::new(store, &config);

        press(&mut app, KeyCode::Char('/'));
        type_str(&mut app, "box");
        assert_eq!(app.search.query, "box");
        assert_eq!(app.counter(), "0 categories selected.");

        press(&mut app, KeyCode::Tab);
        assert_eq!(app.counter(), "1 category selected.");

        // Outside the prompt the override applies.
        press(&mut app, KeyCode::Esc);
        press(&mut app, KeyCode::Char('x'));
        assert_eq!(app.counter(), "0 categories selected.");
    }

    #[test]
    fn test_help_overlay_captures_keys() {
        let mut app = test_app();
        press(&mut app, KeyCode::Char('?'));
        assert!(app.show_help);

        assert_eq!(press(&mut app, KeyCode::Enter), Action::Continue);
        press(&mut app, KeyCode::Char('j'));
        assert_eq!(app.help_scroll_offset, 1);

        press(&mut app, KeyCode::Esc);
        assert!(!app.show_help);
        assert_eq!(app.help_scroll_offset, 0);
    }
}
