//! One resource screen: list, modal and delete dialog together

use std::sync::Arc;

use crate::delete::DeleteDialog;
use crate::forms::Editable;
use crate::list::ListController;
use crate::modal::{CloseRequest, MutationModal, SubmitOutcome};
use crate::notify::Notifier;
use crate::source::CollectionSource;

/// List controller plus the transient dialogs opened from it
pub struct ResourceScreen<R: Editable> {
    list: ListController<R>,
    modal: Option<MutationModal>,
    delete: Option<DeleteDialog>,
}

impl<R: Editable> ResourceScreen<R> {
    pub fn new(source: Arc<dyn CollectionSource>, notifier: Notifier) -> Self {
        Self {
            list: ListController::new(source, notifier),
            modal: None,
            delete: None,
        }
    }

    pub fn list(&self) -> &ListController<R> {
        &self.list
    }

    pub fn list_mut(&mut self) -> &mut ListController<R> {
        &mut self.list
    }

    pub fn modal(&self) -> Option<&MutationModal> {
        self.modal.as_ref()
    }

    pub fn modal_mut(&mut self) -> Option<&mut MutationModal> {
        self.modal.as_mut()
    }

    pub fn delete_dialog(&self) -> Option<&DeleteDialog> {
        self.delete.as_ref()
    }

    /// First load when the screen becomes visible
    pub async fn mount(&mut self) {
        self.list.fetch().await;
    }

    pub fn open_create(&mut self) {
        self.modal = Some(MutationModal::create::<R>());
    }

    /// Edit the highlighted row; does nothing on an empty page
    pub fn open_edit_selected(&mut self) {
        if let Some(entity) = self.list.selected() {
            self.modal = Some(MutationModal::edit(entity));
        }
    }

    /// Submit the open modal. On success it closes and the list refetches.
    pub async fn submit_modal(&mut self) -> Option<SubmitOutcome> {
        let modal = self.modal.as_mut()?;
        let source = Arc::clone(self.list.source());
        let outcome = modal.submit(source.as_ref(), self.list.notifier()).await;
        if matches!(outcome, SubmitOutcome::Saved(_)) {
            self.modal = None;
            self.list.refetch().await;
        }
        Some(outcome)
    }

    /// Escape from the modal; unsaved edits need [`discard_modal`](Self::discard_modal)
    pub fn close_modal(&mut self) -> CloseRequest {
        let request = self
            .modal
            .as_mut()
            .map_or(CloseRequest::Closed, MutationModal::request_close);
        if request == CloseRequest::Closed {
            self.modal = None;
        }
        request
    }

    pub fn discard_modal(&mut self) {
        if let Some(mut modal) = self.modal.take() {
            modal.confirm_discard();
        }
    }

    /// Open the delete prompt for the highlighted row
    ///
    /// Returns `false` when nothing is selected or the resource cannot be
    /// deleted.
    pub fn open_delete_selected(&mut self) -> bool {
        self.delete = self.list.selected().and_then(DeleteDialog::open);
        self.delete.is_some()
    }

    pub fn cancel_delete(&mut self) {
        self.delete = None;
    }

    /// Delete the target and refetch whatever the outcome
    pub async fn confirm_delete(&mut self) -> Option<bool> {
        let dialog = self.delete.take()?;
        let source = Arc::clone(self.list.source());
        let deleted = dialog.confirm(source.as_ref(), self.list.notifier()).await;
        self.list.refetch().await;
        Some(deleted)
    }
}
