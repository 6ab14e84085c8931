//! Event handling for terminal and application events

use std::time::Duration;

use crossterm::event::{self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tokio::sync::mpsc;

use crate::action::Action;

/// Terminal event types
#[derive(Debug, Clone)]
pub enum Event {
    /// Terminal key event
    Key(KeyEvent),
    /// Terminal resize
    Resize(u16, u16),
    /// Tick for toast expiry
    Tick,
}

/// What the keyboard is currently driving
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Browse,
    Search,
    /// A create/edit form has focus
    Form,
    /// A yes/no prompt is open
    Confirm,
}

/// Event handler that polls for terminal events
pub struct EventHandler {
    /// Event sender
    sender: mpsc::UnboundedSender<Event>,
    /// Event receiver
    receiver: mpsc::UnboundedReceiver<Event>,
    /// Tick rate
    tick_rate: Duration,
}

impl EventHandler {
    /// Create a new event handler
    pub fn new(tick_rate: Duration) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        Self {
            sender,
            receiver,
            tick_rate,
        }
    }

    /// Start polling the terminal on a blocking thread
    pub fn start(&self) {
        let sender = self.sender.clone();
        let tick_rate = self.tick_rate;

        tokio::task::spawn_blocking(move || {
            let mut last_tick = std::time::Instant::now();

            loop {
                let timeout = tick_rate
                    .checked_sub(last_tick.elapsed())
                    .unwrap_or(Duration::ZERO);

                if event::poll(timeout).unwrap_or(false) {
                    let sent = match event::read() {
                        Ok(CrosstermEvent::Key(key)) if key.kind == KeyEventKind::Press => {
                            sender.send(Event::Key(key))
                        }
                        Ok(CrosstermEvent::Resize(w, h)) => sender.send(Event::Resize(w, h)),
                        _ => Ok(()),
                    };
                    if sent.is_err() {
                        break;
                    }
                }

                if last_tick.elapsed() >= tick_rate {
                    if sender.send(Event::Tick).is_err() {
                        break;
                    }
                    last_tick = std::time::Instant::now();
                }
            }
        });
    }

    /// Receive the next event
    pub async fn next(&mut self) -> Option<Event> {
        self.receiver.recv().await
    }
}

/// Convert a key event to an action
pub fn key_to_action(key: KeyEvent, mode: InputMode) -> Action {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Action::Quit;
    }

    match mode {
        InputMode::Search => match key.code {
            KeyCode::Esc => Action::Back,
            KeyCode::Enter => Action::SubmitSearch,
            KeyCode::Backspace => Action::SearchBackspace,
            KeyCode::Char(c) => Action::SearchInput(c),
            _ => Action::None,
        },
        InputMode::Form => match key.code {
            KeyCode::Esc => Action::Back,
            KeyCode::Enter => Action::SubmitForm,
            KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Action::SubmitForm
            }
            KeyCode::Tab | KeyCode::Down => Action::FieldNext,
            KeyCode::BackTab | KeyCode::Up => Action::FieldPrevious,
            KeyCode::Backspace => Action::FieldBackspace,
            KeyCode::Char(c) => Action::FieldInput(c),
            _ => Action::None,
        },
        InputMode::Confirm => match key.code {
            KeyCode::Char('y' | 'Y') | KeyCode::Enter => Action::Confirm,
            KeyCode::Char('n' | 'N') | KeyCode::Esc => Action::Deny,
            _ => Action::None,
        },
        InputMode::Browse => match key.code {
            // Quit
            KeyCode::Char('q') => Action::Quit,

            // Navigation
            KeyCode::Up | KeyCode::Char('k') => Action::Up,
            KeyCode::Down | KeyCode::Char('j') => Action::Down,
            KeyCode::Char('g') => Action::First,
            KeyCode::Char('G') => Action::Last,
            KeyCode::Right | KeyCode::Char('l') | KeyCode::PageDown => Action::NextPage,
            KeyCode::Left | KeyCode::Char('h') | KeyCode::PageUp => Action::PreviousPage,
            KeyCode::Tab => Action::NextTab,
            KeyCode::BackTab => Action::PreviousTab,
            KeyCode::Esc => Action::Back,

            // Actions
            KeyCode::Char('n') => Action::Create,
            KeyCode::Enter | KeyCode::Char('e') => Action::Edit,
            KeyCode::Char('d') => Action::Delete,
            KeyCode::Char('r') => Action::Refresh,

            // Help and search
            KeyCode::Char('?') => Action::Help,
            KeyCode::Char('/') => Action::StartSearch,

            _ => Action::None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_browse_keys() {
        assert_eq!(key_to_action(key(KeyCode::Char('q')), InputMode::Browse), Action::Quit);
        assert_eq!(key_to_action(key(KeyCode::Char('n')), InputMode::Browse), Action::Create);
        assert_eq!(key_to_action(key(KeyCode::Right), InputMode::Browse), Action::NextPage);
        assert_eq!(key_to_action(key(KeyCode::Tab), InputMode::Browse), Action::NextTab);
    }

    #[test]
    fn test_letters_are_text_while_typing() {
        assert_eq!(
            key_to_action(key(KeyCode::Char('q')), InputMode::Search),
            Action::SearchInput('q')
        );
        assert_eq!(
            key_to_action(key(KeyCode::Char('n')), InputMode::Form),
            Action::FieldInput('n')
        );
        assert_eq!(key_to_action(key(KeyCode::Enter), InputMode::Search), Action::SubmitSearch);
        assert_eq!(key_to_action(key(KeyCode::Enter), InputMode::Form), Action::SubmitForm);
    }

    #[test]
    fn test_confirm_prompt() {
        assert_eq!(key_to_action(key(KeyCode::Char('y')), InputMode::Confirm), Action::Confirm);
        assert_eq!(key_to_action(key(KeyCode::Esc), InputMode::Confirm), Action::Deny);
        assert_eq!(key_to_action(key(KeyCode::Char('x')), InputMode::Confirm), Action::None);
    }

    #[test]
    fn test_ctrl_c_always_quits() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        for mode in [InputMode::Browse, InputMode::Search, InputMode::Form, InputMode::Confirm] {
            assert_eq!(key_to_action(ctrl_c, mode), Action::Quit);
        }
    }
}
