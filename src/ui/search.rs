use crate::app::App;
use crate::util::{strip_control_chars, truncate_to_width};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use super::tree::checkbox;

/// Render the type-ahead panel: prompt on top, matches below.
pub fn render(f: &mut Frame, app: &App, area: Rect) {
    if area.width < 3 || area.height < 4 {
        return;
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(app.style("panel_border_focused"))
        .title("Search");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(inner);

    let query = strip_control_chars(&app.search.query);
    let max_query = (inner.width as usize).saturating_sub(3);
    let prompt = Line::from(vec![
        Span::styled("/ ", app.style("search_prompt")),
        Span::styled(truncate_to_width(&query, max_query), app.style("search_prompt")),
        Span::styled("_", app.style("search_prompt")),
    ]);
    f.render_widget(Paragraph::new(prompt), chunks[0]);

    let style_result = app.style("search_result");
    let style_selected = app.style("search_selected");
    let items: Vec<ListItem> = app
        .search
        .results
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let checked = app.store.get(name).is_some_and(|c| c.checked);
            let style = if i == app.search.selected {
                style_selected
            } else {
                style_result
            };
            ListItem::new(Line::styled(format!("{}{}", checkbox(checked), name), style))
        })
        .collect();

    let selected = (!items.is_empty()).then_some(app.search.selected);
    let mut state = ListState::default().with_selected(selected);
    f.render_stateful_widget(List::new(items), chunks[1], &mut state);
}
