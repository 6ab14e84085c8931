//! Help popup widget

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use super::layout::centered;

/// Render the help popup
pub fn render(frame: &mut Frame) {
    let help_text = r"
  Navigation
  ──────────
  j/↓       Move down
  k/↑       Move up
  g / G     First / last row
  h/← l/→   Previous / next page
  Tab       Next resource
  S-Tab     Previous resource
  Esc       Close popup/cancel search

  Records
  ───────
  n         New record
  e/Enter   Edit selected
  d         Delete selected
  r         Reload list

  Forms
  ─────
  Tab/↓     Next field
  S-Tab/↑   Previous field
  Enter     Save
  Esc       Close (asks if edited)

  General
  ───────
  /         Search
  ?         Toggle help
  q         Quit
";

    let popup_area = centered(frame.area(), 50, 34);

    frame.render_widget(Clear, popup_area);

    let paragraph = Paragraph::new(help_text)
        .block(
            Block::default()
                .title(" Help ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, popup_area);
}
