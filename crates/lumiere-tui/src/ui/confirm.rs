//! Yes/no prompt popup

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use super::layout::centered;

pub fn render(frame: &mut Frame, title: &str, prompt: &str) {
    let area = centered(frame.area(), 56, 6);
    frame.render_widget(Clear, area);

    let text = vec![
        Line::from(prompt),
        Line::raw(""),
        Line::from(Span::styled("[y] Yes   [n] No", Style::default().fg(Color::DarkGray))),
    ];

    let paragraph = Paragraph::new(text)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow)),
        )
        .wrap(Wrap { trim: true });

    frame.render_widget(paragraph, area);
}
