use crate::app::{App, TreeRow};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

/// Checkbox glyph for a row.
pub(super) fn checkbox(checked: bool) -> &'static str {
    if checked {
        "[x] "
    } else {
        "[ ] "
    }
}

/// Spans for one tree row: indent, collapse marker, checkbox, name, summary.
fn row_spans<'a>(row: &'a TreeRow, style: Style, summary_style: Style) -> Vec<Span<'a>> {
    let indent = "    ".repeat(row.depth);
    let marker = match &row.group {
        Some(g) if g.expanded => "v ",
        Some(_) => "> ",
        None => "  ",
    };

    let mut spans = Vec::with_capacity(4);
    spans.push(Span::styled(format!("{}{}{}", indent, marker, checkbox(row.checked)), style));
    spans.push(Span::styled(row.name.as_str(), style));
    if let Some(group) = &row.group {
        spans.push(Span::styled(format!("  ({})", group.summary), summary_style));
    }
    spans
}

/// Render the category tree panel.
pub fn render(f: &mut Frame, app: &App, area: Rect) {
    if area.width < 3 || area.height < 3 {
        return;
    }

    let rows = app.tree_rows();
    let cursor = app.cursor.min(rows.len().saturating_sub(1));

    let style_cursor = app.style("tree_cursor");
    let style_checked = app.style("tree_checked");
    let style_group = app.style("tree_group");
    let style_normal = app.style("tree_normal");
    let style_summary = app.style("tree_summary");

    let items: Vec<ListItem> = rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let style = if i == cursor && !app.search_mode {
                style_cursor
            } else if row.checked {
                style_checked
            } else if row.group.is_some() {
                style_group
            } else {
                style_normal
            };
            ListItem::new(Line::from(row_spans(row, style, style_summary)))
        })
        .collect();

    let title = match &app.filter {
        Some(query) => format!("Categories (filter: {})", query),
        None => "Categories".to_string(),
    };
    let border_style = if app.search_mode {
        app.style("panel_border")
    } else {
        app.style("panel_border_focused")
    };

    let empty = items.is_empty();
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(title),
        )
        .highlight_style(Style::default());

    let mut state = ListState::default().with_selected((!empty).then_some(cursor));
    f.render_stateful_widget(list, area, &mut state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::GroupInfo;

    fn text(spans: &[Span]) -> String {
        spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_primary_row_with_group() {
        let row = TreeRow {
            name: "Food".to_string(),
            depth: 0,
            checked: true,
            group: Some(GroupInfo {
                expanded: false,
                summary: "3 subcategories, 1 selected".to_string(),
            }),
        };
        let spans = row_spans(&row, Style::default(), Style::default());
        assert_eq!(text(&spans), "> [x] Food  (3 subcategories, 1 selected)");
    }

    #[test]
    fn test_child_row_is_indented() {
        let row = TreeRow {
            name: "Fruit".to_string(),
            depth: 1,
            checked: false,
            group: None,
        };
        let spans = row_spans(&row, Style::default(), Style::default());
        assert_eq!(text(&spans), "      [ ] Fruit");
    }
}
