//! TUI colours and styles

use ratatui::style::{Color, Modifier, Style};

use lumiere_core::Level;

/// Colour of a notification level
pub fn level_color(level: Level) -> Color {
    match level {
        Level::Info => Color::White,
        Level::Success => Color::Green,
        Level::Error => Color::Red,
    }
}

/// Symbol shown before a notification
pub fn level_symbol(level: Level) -> &'static str {
    match level {
        Level::Info => "●",
        Level::Success => "✓",
        Level::Error => "✗",
    }
}

/// Header style
pub fn header_style() -> Style {
    Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

/// Selected row style
pub fn selected_style() -> Style {
    Style::default()
        .bg(Color::DarkGray)
        .add_modifier(Modifier::BOLD)
}

/// Border style for focused panel
pub fn focused_border_style() -> Style {
    Style::default().fg(Color::Cyan)
}

/// Border style for unfocused panel
pub fn unfocused_border_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

/// Style of the focused form field
pub fn active_field_style() -> Style {
    Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

pub fn error_style() -> Style {
    Style::default().fg(Color::Red)
}

pub fn muted_style() -> Style {
    Style::default().fg(Color::DarkGray)
}
