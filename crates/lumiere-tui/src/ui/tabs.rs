//! Resource tab bar

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Tabs};

use crate::app::App;
use crate::theme;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<&str> = app.tabs().map(|kind| kind.title()).collect();

    let tabs = Tabs::new(titles)
        .select(app.active)
        .block(
            Block::default()
                .title(" Lumiere Admin ")
                .borders(Borders::ALL)
                .border_style(theme::unfocused_border_style()),
        )
        .highlight_style(theme::header_style().add_modifier(Modifier::REVERSED))
        .divider("│");

    frame.render_widget(tabs, area);
}
