use crate::app::App;
use ratatui::{layout::Rect, text::Line, widgets::Paragraph, Frame};
use std::borrow::Cow;

/// Render the selection counter line.
pub fn render_counter(f: &mut Frame, app: &App, area: Rect) {
    if area.width < 1 || area.height < 1 {
        return;
    }
    let line = Line::styled(format!(" {}", app.counter()), app.style("counter"));
    f.render_widget(Paragraph::new(line), area);
}

/// Render the status bar: the latest status message, or key hints.
pub fn render(f: &mut Frame, app: &App, area: Rect) {
    if area.width < 1 || area.height < 1 {
        return;
    }
    let paragraph = Paragraph::new(status_text(app)).style(app.style("status_bar"));
    f.render_widget(paragraph, area);
}

fn status_text(app: &App) -> Cow<'_, str> {
    if let Some((msg, _)) = &app.status_message {
        return Cow::Borrowed(msg.as_ref());
    }
    if app.search_mode {
        Cow::Borrowed("Type to search | Tab toggle | Enter jump | Esc cancel")
    } else if app.filter.is_some() {
        Cow::Borrowed("[Space]toggle [/]search [Esc]clear filter [Enter]submit [q]uit [?]help")
    } else {
        Cow::Borrowed("[Space]toggle [h/l]collapse/expand [/]search [Enter]submit [q]uit [?]help")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::{Category, CategoryStore};
    use crate::config::Config;

    fn test_app() -> App {
        let store = CategoryStore::new(vec![Category::primary("Food", "c-1", false)]).unwrap();
        App::new(store, &Config::default())
    }

    #[test]
    fn test_hints_follow_mode() {
        let mut app = test_app();
        assert!(status_text(&app).contains("[h/l]"));
        app.filter = Some("fo".to_string());
        assert!(status_text(&app).contains("clear filter"));
        app.enter_search();
        assert!(status_text(&app).starts_with("Type to search"));
    }

    #[tokio::test]
    async fn test_status_message_wins() {
        let mut app = test_app();
        app.toggle("Food").unwrap();
        assert_eq!(status_text(&app), "+Food");
    }
}
