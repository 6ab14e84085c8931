//! Notification log panel widget

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem};

use crate::app::App;
use crate::theme;

/// Render the notification log
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = app
        .event_log
        .iter()
        .take(area.height.saturating_sub(2) as usize)
        .map(|entry| {
            let time = entry.at.with_timezone(&chrono::Local).format("%H:%M:%S");
            let symbol = theme::level_symbol(entry.level);
            let text = format!("{time} {symbol} {}", entry.message);
            ListItem::new(text).style(Style::default().fg(theme::level_color(entry.level)))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .title(" Activity ")
            .borders(Borders::ALL)
            .border_style(theme::unfocused_border_style()),
    );

    frame.render_widget(list, area);
}
