//! Layout calculations for the TUI

use ratatui::prelude::*;

/// Layout areas for the UI
pub struct LayoutAreas {
    pub tabs: Rect,
    pub table: Rect,
    pub events: Rect,
    pub statusbar: Rect,
}

/// Calculate layout areas based on terminal size
pub fn calculate_layout(area: Rect) -> LayoutAreas {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Tabs
            Constraint::Min(8),    // Table
            Constraint::Length(7), // Event log
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    LayoutAreas {
        tabs: vertical[0],
        table: vertical[1],
        events: vertical[2],
        statusbar: vertical[3],
    }
}

/// A `width` x `height` rectangle centred in `area`, shrunk to fit
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width.saturating_sub(4));
    let height = height.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}
