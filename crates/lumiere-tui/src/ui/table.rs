//! Resource list table widget

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState};

use crate::app::App;
use crate::theme;

/// Render the current resource page
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let screen = app.current();
    let view = screen.table();

    let header = Row::new(view.headers.iter().map(|h| Cell::from(*h)))
        .style(theme::header_style())
        .height(1);

    let rows: Vec<Row> = view
        .rows
        .iter()
        .map(|cells| Row::new(cells.iter().map(|c| Cell::from(c.as_str()))))
        .collect();

    let widths: Vec<Constraint> = view
        .widths
        .iter()
        .map(|w| Constraint::Percentage(*w))
        .collect();

    let search = if app.search_active {
        format!(" /{}_", app.search_input)
    } else if view.search_term.is_empty() {
        String::new()
    } else {
        format!(" /{}", view.search_term)
    };
    let status = if view.loading { " loading…" } else { "" };
    let title = format!(
        " {} ({}) page {}/{}{search}{status} ",
        screen.kind().title(),
        view.total_items,
        view.page,
        view.total_pages,
    );

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(theme::focused_border_style());

    if let Some(error) = &view.error
        && view.rows.is_empty()
    {
        let paragraph = Paragraph::new(error.as_str())
            .style(theme::error_style())
            .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    if view.rows.is_empty() && !view.loading {
        let message = if view.search_term.is_empty() {
            "Nothing here yet. Press n to add one."
        } else {
            "No results match your search."
        };
        let paragraph = Paragraph::new(message)
            .style(theme::muted_style())
            .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .row_highlight_style(theme::selected_style())
        .highlight_symbol("▸ ");

    let mut state = TableState::default();
    state.select(Some(view.selected));

    frame.render_stateful_widget(table, area, &mut state);
}
