//! UI rendering modules

mod confirm;
mod events;
mod form;
mod help;
mod layout;
mod statusbar;
mod table;
mod tabs;
mod toast;

use ratatui::prelude::*;

use crate::app::App;

/// Render the entire UI
pub fn render(frame: &mut Frame, app: &App) {
    let areas = layout::calculate_layout(frame.area());
    let screen = app.current();

    tabs::render(frame, app, areas.tabs);
    table::render(frame, app, areas.table);
    events::render(frame, app, areas.events);
    statusbar::render(frame, app, areas.statusbar);

    if let Some(modal) = screen.modal() {
        form::render(frame, modal);
        if modal.is_confirming_close() {
            confirm::render(frame, " Unsaved changes ", "Discard your changes?");
        }
    }
    if let Some(prompt) = screen.delete_prompt() {
        confirm::render(frame, " Delete ", &prompt);
    }

    if let Some(toast) = &app.toast {
        toast::render(frame, toast);
    }

    if app.show_help {
        help::render(frame);
    }
}
