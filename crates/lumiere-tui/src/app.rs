//! Application state and logic

use std::collections::VecDeque;
use std::sync::Arc;

use chrono::Utc;
use color_eyre::Result;
use tokio::sync::mpsc;

use lumiere_api::ResourceKind;
use lumiere_api::catalog::{
    Batch, Brand, Category, Formulation, Ingredient, Packaging, Product, SkinType, Tag,
};
use lumiere_api::commerce::{Order, Voucher};
use lumiere_api::content::{BlogPost, Question};
use lumiere_core::{CollectionSource, Editable, Notification, Notifier, ResourceScreen};

use crate::action::Action;
use crate::columns::Columns;
use crate::event::InputMode;
use crate::view::ResourceView;

const EVENT_LOG_CAPACITY: usize = 100;
const TOAST_SECONDS: i64 = 4;

fn screen<R: Editable + Columns>(
    source: &Arc<dyn CollectionSource>,
    notifier: &Notifier,
) -> Box<dyn ResourceView> {
    Box::new(ResourceScreen::<R>::new(Arc::clone(source), notifier.clone()))
}

/// One tab per resource, in menu order
fn screens(source: &Arc<dyn CollectionSource>, notifier: &Notifier) -> Vec<Box<dyn ResourceView>> {
    ResourceKind::ALL
        .into_iter()
        .map(|kind| match kind {
            ResourceKind::Product => screen::<Product>(source, notifier),
            ResourceKind::Batch => screen::<Batch>(source, notifier),
            ResourceKind::Brand => screen::<Brand>(source, notifier),
            ResourceKind::Category => screen::<Category>(source, notifier),
            ResourceKind::Packaging => screen::<Packaging>(source, notifier),
            ResourceKind::Formulation => screen::<Formulation>(source, notifier),
            ResourceKind::Ingredient => screen::<Ingredient>(source, notifier),
            ResourceKind::SkinType => screen::<SkinType>(source, notifier),
            ResourceKind::Tag => screen::<Tag>(source, notifier),
            ResourceKind::Voucher => screen::<Voucher>(source, notifier),
            ResourceKind::BlogPost => screen::<BlogPost>(source, notifier),
            ResourceKind::Order => screen::<Order>(source, notifier),
            ResourceKind::Question => screen::<Question>(source, notifier),
        })
        .collect()
}

/// Application state
pub struct App {
    /// Resource tabs
    screens: Vec<Box<dyn ResourceView>>,
    /// Index of the visible tab
    pub active: usize,
    /// Outcome notifications from every screen
    notifications: mpsc::UnboundedReceiver<Notification>,
    /// Newest first
    pub event_log: VecDeque<Notification>,
    /// Notification currently shown as a toast
    pub toast: Option<Notification>,
    /// Whether a session token was found
    pub signed_in: bool,
    /// Backend base URL, for the status bar
    pub server_url: String,
    /// Should quit
    should_quit: bool,
    /// Show help popup
    pub show_help: bool,
    /// Search mode active
    pub search_active: bool,
    /// Search query being typed
    pub search_input: String,
}

impl App {
    /// Create a new application
    pub fn new(
        source: Arc<dyn CollectionSource>,
        notifier: &Notifier,
        notifications: mpsc::UnboundedReceiver<Notification>,
        server_url: &str,
        signed_in: bool,
    ) -> Self {
        Self {
            screens: screens(&source, notifier),
            active: 0,
            notifications,
            event_log: VecDeque::with_capacity(EVENT_LOG_CAPACITY),
            toast: None,
            signed_in,
            server_url: server_url.to_string(),
            should_quit: false,
            show_help: false,
            search_active: false,
            search_input: String::new(),
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn tabs(&self) -> impl Iterator<Item = ResourceKind> + '_ {
        self.screens.iter().map(|s| s.kind())
    }

    pub fn current(&self) -> &dyn ResourceView {
        self.screens[self.active].as_ref()
    }

    fn current_mut(&mut self) -> &mut dyn ResourceView {
        self.screens[self.active].as_mut()
    }

    /// Load the first tab
    pub async fn start(&mut self) {
        self.current_mut().mount().await;
    }

    /// What keystrokes should mean right now
    pub fn input_mode(&self) -> InputMode {
        let screen = self.current();
        if screen.delete_prompt().is_some() {
            InputMode::Confirm
        } else if let Some(modal) = screen.modal() {
            if modal.is_confirming_close() {
                InputMode::Confirm
            } else {
                InputMode::Form
            }
        } else if self.search_active {
            InputMode::Search
        } else {
            InputMode::Browse
        }
    }

    /// Move pending notifications into the log and the toast slot
    pub fn drain_notifications(&mut self) {
        while let Ok(notification) = self.notifications.try_recv() {
            self.record(notification);
        }
    }

    /// Show `notification` as the toast and log it, oldest entries dropping off
    fn record(&mut self, notification: Notification) {
        self.toast = Some(notification.clone());
        self.event_log.push_front(notification);
        self.event_log.truncate(EVENT_LOG_CAPACITY);
    }

    /// Handle an action
    pub async fn handle_action(&mut self, action: Action) -> Result<()> {
        match action {
            Action::Quit => {
                self.should_quit = true;
            }
            Action::Tick => {
                let expired = self
                    .toast
                    .as_ref()
                    .is_some_and(|t| (Utc::now() - t.at).num_seconds() >= TOAST_SECONDS);
                if expired {
                    self.toast = None;
                }
            }
            Action::Up => self.current_mut().select_previous(),
            Action::Down => self.current_mut().select_next(),
            Action::First => self.current_mut().select_first(),
            Action::Last => self.current_mut().select_last(),
            Action::NextPage => self.current_mut().next_page().await,
            Action::PreviousPage => self.current_mut().previous_page().await,
            Action::NextTab => {
                let next = (self.active + 1) % self.screens.len();
                self.switch_tab(next).await;
            }
            Action::PreviousTab => {
                let previous = (self.active + self.screens.len() - 1) % self.screens.len();
                self.switch_tab(previous).await;
            }
            Action::Refresh => self.current_mut().refetch().await,
            Action::Create => self.current_mut().open_create(),
            Action::Edit => self.current_mut().open_edit(),
            Action::Delete => {
                if !self.current_mut().open_delete() {
                    let kind = self.current().kind();
                    if kind.deletion().is_none() {
                        self.toast_info(format!("{} cannot be deleted", kind.title()));
                    }
                }
            }
            Action::Back => self.back(),
            Action::Help => {
                self.show_help = !self.show_help;
            }
            Action::StartSearch => {
                self.search_active = true;
                self.search_input = self.current().table().search_term;
            }
            Action::SearchInput(c) => {
                if self.search_active {
                    self.search_input.push(c);
                }
            }
            Action::SearchBackspace => {
                if self.search_active {
                    self.search_input.pop();
                }
            }
            Action::SubmitSearch => {
                self.search_active = false;
                let term = self.search_input.clone();
                self.current_mut().change_search(term).await;
            }
            Action::FieldNext => {
                if let Some(modal) = self.current_mut().modal_mut() {
                    modal.focus_next();
                }
            }
            Action::FieldPrevious => {
                if let Some(modal) = self.current_mut().modal_mut() {
                    modal.focus_prev();
                }
            }
            Action::FieldInput(c) => {
                if let Some(modal) = self.current_mut().modal_mut() {
                    modal.input_char(c);
                }
            }
            Action::FieldBackspace => {
                if let Some(modal) = self.current_mut().modal_mut() {
                    modal.backspace();
                }
            }
            Action::SubmitForm => {
                self.current_mut().submit_modal().await;
            }
            Action::Confirm => self.confirm().await,
            Action::Deny => self.deny(),
            Action::Render | Action::None => {}
        }
        Ok(())
    }

    async fn switch_tab(&mut self, index: usize) {
        self.active = index;
        self.search_active = false;
        self.search_input.clear();
        if !self.current().is_mounted() {
            self.current_mut().mount().await;
        }
    }

    fn back(&mut self) {
        if self.show_help {
            self.show_help = false;
        } else if self.current().modal().is_some() {
            self.current_mut().close_modal();
        } else if self.search_active {
            self.search_active = false;
            self.search_input.clear();
        }
    }

    async fn confirm(&mut self) {
        let screen = self.current_mut();
        if screen.delete_prompt().is_some() {
            screen.confirm_delete().await;
        } else if screen.modal().is_some_and(|m| m.is_confirming_close()) {
            screen.discard_modal();
        }
    }

    fn deny(&mut self) {
        let screen = self.current_mut();
        if screen.delete_prompt().is_some() {
            screen.cancel_delete();
        } else if let Some(modal) = screen.modal_mut() {
            modal.cancel_close();
        }
    }

    fn toast_info(&mut self, message: String) {
        let notification = Notification {
            level: lumiere_core::Level::Info,
            message,
            at: Utc::now(),
        };
        self.record(notification);
    }
}
