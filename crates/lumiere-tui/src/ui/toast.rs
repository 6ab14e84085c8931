//! Transient notification in the top-right corner

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use unicode_width::UnicodeWidthStr;

use lumiere_core::Notification;

use crate::theme;

pub fn render(frame: &mut Frame, toast: &Notification) {
    let screen = frame.area();
    let text = format!("{} {}", theme::level_symbol(toast.level), toast.message);
    let width = u16::try_from(text.width() + 4)
        .unwrap_or(u16::MAX)
        .min(screen.width / 2)
        .max(20)
        .min(screen.width);
    let inner_width = usize::from(width.saturating_sub(2)).max(1);
    let lines = u16::try_from(text.width().div_ceil(inner_width)).unwrap_or(1);
    let height = (lines + 2).min(screen.height);
    let area = Rect::new(screen.x + screen.width - width, screen.y, width, height);

    frame.render_widget(Clear, area);
    let color = theme::level_color(toast.level);
    let paragraph = Paragraph::new(text)
        .style(Style::default().fg(color))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color)),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}
