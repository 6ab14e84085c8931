//! Status bar widget

use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::App;
use crate::event::InputMode;

/// Render the status bar
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let session = if app.signed_in {
        ("● Signed in", Color::Green)
    } else {
        ("○ Not signed in", Color::Yellow)
    };

    let keybindings = match app.input_mode() {
        InputMode::Browse => {
            "[j/k] Move  [h/l] Page  [Tab] Resource  [n] New  [e] Edit  [d] Delete  [/] Search  [?] Help  [q] Quit"
        }
        InputMode::Search => "[Enter] Search  [Esc] Cancel",
        InputMode::Form => "[Tab/↑↓] Field  [Enter] Save  [Esc] Close",
        InputMode::Confirm => "[y] Yes  [n] No",
    };

    let status_line = Line::from(vec![
        Span::styled(session.0, Style::default().fg(session.1)),
        Span::raw("  "),
        Span::styled(app.server_url.as_str(), Style::default().fg(Color::DarkGray)),
        Span::raw("  │  "),
        Span::styled(keybindings, Style::default().fg(Color::DarkGray)),
    ]);

    let paragraph = Paragraph::new(status_line);
    frame.render_widget(paragraph, area);
}
