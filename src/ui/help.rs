//! Help overlay: scrollable table of the active keybindings.
//!
//! Lists bindings per context, including overrides from `config.toml`.

use crate::app::App;
use crate::keybindings::{Action, Context};
use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Row, Table},
    Frame,
};

/// Context display order and labels.
const CONTEXT_ORDER: [(Context, &str); 3] = [
    (Context::Global, "Anywhere"),
    (Context::Tree, "Category Tree"),
    (Context::Search, "Search Prompt"),
];

/// A line of the help table: either a section heading or a key/description pair.
#[derive(Debug, PartialEq, Eq)]
enum HelpLine {
    Heading(&'static str),
    Binding(String, &'static str),
    Blank,
}

/// Group bindings by context in display order, with blanks between groups.
fn help_lines(bindings: &[(Context, String, Action, &'static str)]) -> Vec<HelpLine> {
    let mut lines = Vec::new();
    for (ctx, label) in &CONTEXT_ORDER {
        let mut group = bindings.iter().filter(|(c, ..)| c == ctx).peekable();
        if group.peek().is_none() {
            continue;
        }
        if !lines.is_empty() {
            lines.push(HelpLine::Blank);
        }
        lines.push(HelpLine::Heading(*label));
        lines.extend(group.map(|(_, key, _, desc)| HelpLine::Binding(key.clone(), *desc)));
    }
    lines
}

/// Render the help overlay on top of the picker.
pub fn render(f: &mut Frame, app: &App) {
    let overlay = centered_rect(70, 80, f.area());
    if overlay.width < 20 || overlay.height < 6 {
        return;
    }
    f.render_widget(Clear, overlay);

    let heading = app.style("help_heading");
    let rows: Vec<Row> = help_lines(&app.keybindings.all_bindings())
        .into_iter()
        .map(|line| match line {
            HelpLine::Heading(label) => Row::new(vec![
                Line::from(Span::styled(label, heading)),
                Line::from(""),
            ]),
            HelpLine::Binding(key, desc) => Row::new(vec![format!("  {}", key), desc.to_string()]),
            HelpLine::Blank => Row::new(vec![String::new(), String::new()]),
        })
        .collect();

    // -2 border, -2 header with margin
    let visible_height = overlay.height.saturating_sub(4) as usize;
    let max_scroll = rows.len().saturating_sub(visible_height);
    let scroll = app.help_scroll_offset.min(max_scroll);
    let visible_rows: Vec<Row> = rows.into_iter().skip(scroll).take(visible_height).collect();

    let title = if max_scroll > 0 {
        format!(" Keys ({}/{}) ", scroll + 1, max_scroll + 1)
    } else {
        " Keys (? to close) ".to_string()
    };

    let table = Table::new(visible_rows, [Constraint::Length(14), Constraint::Min(20)])
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(app.style("panel_border_focused"))
                .title(title),
        )
        .header(
            Row::new(vec!["Key", "Action"])
                .style(Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED))
                .bottom_margin(1),
        )
        .style(app.style("help_body"));
    f.render_widget(table, overlay);

    if scroll < max_scroll {
        let hint_area = Rect {
            x: overlay.x + 1,
            y: overlay.y + overlay.height.saturating_sub(1),
            width: overlay.width.saturating_sub(2),
            height: 1,
        };
        let hint = Span::styled(" j/k scroll, Esc closes ", app.style("help_hint"));
        f.render_widget(Paragraph::new(Line::from(hint)), hint_area);
    }
}

/// Create a centered rectangle with the given percentage of the parent area.
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let width = area.width * percent_x / 100;
    let height = area.height * percent_y / 100;
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keybindings::KeybindingRegistry;

    #[test]
    fn test_groups_in_context_order() {
        let lines = help_lines(&KeybindingRegistry::new().all_bindings());
        let headings: Vec<&str> = lines
            .iter()
            .filter_map(|l| match l {
                HelpLine::Heading(h) => Some(*h),
                _ => None,
            })
            .collect();
        assert_eq!(headings, vec!["Anywhere", "Category Tree", "Search Prompt"]);
        assert_eq!(lines[0], HelpLine::Heading("Anywhere"));
        assert!(!matches!(lines.last(), Some(HelpLine::Blank)));
    }

    #[test]
    fn test_lists_toggle_binding() {
        let lines = help_lines(&KeybindingRegistry::new().all_bindings());
        assert!(lines.contains(&HelpLine::Binding(
            "Space".to_string(),
            Action::Toggle.describe()
        )));
    }

    #[test]
    fn test_centered_rect() {
        let r = centered_rect(50, 50, Rect::new(0, 0, 100, 40));
        assert_eq!(r, Rect::new(25, 10, 50, 20));
    }
}
