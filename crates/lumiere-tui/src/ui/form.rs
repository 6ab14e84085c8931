//! Create/edit form popup

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use lumiere_core::{FieldKind, FieldSpec, MutationModal};

use super::layout::centered;
use crate::theme;

fn hint(spec: &FieldSpec) -> String {
    match spec.kind {
        FieldKind::Bool => "yes/no".to_string(),
        FieldKind::Date => "YYYY-MM-DD".to_string(),
        FieldKind::IdList => "ids, comma separated".to_string(),
        FieldKind::TextList => "comma separated".to_string(),
        FieldKind::Choice(options) => options.join(" / "),
        FieldKind::Answers => "answer|skinTypeId|score; …".to_string(),
        FieldKind::Text | FieldKind::Integer | FieldKind::Id => String::new(),
    }
}

pub fn render(frame: &mut Frame, modal: &MutationModal) {
    let specs = modal.specs();
    let height = u16::try_from(specs.len() * 2 + 5).unwrap_or(u16::MAX);
    let area = centered(frame.area(), 72, height);
    frame.render_widget(Clear, area);

    let mut lines = Vec::with_capacity(specs.len() * 2 + 2);
    for (i, spec) in specs.iter().enumerate() {
        let focused = i == modal.focus();
        let marker = if spec.is_required() { "*" } else { "" };
        let label_style = if focused {
            theme::active_field_style()
        } else {
            Style::default()
        };
        let mut label = vec![Span::styled(format!("{}{marker}", spec.label), label_style)];
        let hint = hint(spec);
        if !hint.is_empty() {
            label.push(Span::styled(format!("  ({hint})"), theme::muted_style()));
        }
        lines.push(Line::from(label));

        let cursor = if focused { "_" } else { "" };
        lines.push(Line::from(format!("  {}{cursor}", modal.fields().get(spec.name))));
    }

    lines.push(Line::raw(""));
    match modal.error() {
        Some(error) => lines.push(Line::styled(error.to_string(), theme::error_style())),
        None => lines.push(Line::styled("[Enter] Save  [Esc] Close", theme::muted_style())),
    }

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .title(format!(" {} ", modal.title()))
                .borders(Borders::ALL)
                .border_style(theme::focused_border_style()),
        )
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, area);
}
