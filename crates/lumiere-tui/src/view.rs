//! Type-erased access to resource screens
//!
//! Each tab owns a `ResourceScreen<R>` for a different `R`; the app drives
//! them through [`ResourceView`] so it can keep them in one list.

use async_trait::async_trait;

use lumiere_api::ResourceKind;
use lumiere_core::{CloseRequest, Editable, LoadPhase, MutationModal, ResourceScreen, SubmitOutcome};

use crate::columns::Columns;

/// Snapshot of a list for rendering
#[derive(Debug, Clone, Default)]
pub struct TableView {
    pub headers: &'static [&'static str],
    pub widths: &'static [u16],
    pub rows: Vec<Vec<String>>,
    pub selected: usize,
    pub page: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub search_term: String,
    pub loading: bool,
    pub error: Option<String>,
}

#[async_trait]
pub trait ResourceView: Send {
    fn kind(&self) -> ResourceKind;

    /// Whether the list has been fetched at least once
    fn is_mounted(&self) -> bool;

    fn table(&self) -> TableView;

    async fn mount(&mut self);

    async fn refetch(&mut self);

    async fn next_page(&mut self);

    async fn previous_page(&mut self);

    async fn change_search(&mut self, term: String);

    fn select_next(&mut self);

    fn select_previous(&mut self);

    fn select_first(&mut self);

    fn select_last(&mut self);

    fn open_create(&mut self);

    fn open_edit(&mut self);

    fn modal(&self) -> Option<&MutationModal>;

    fn modal_mut(&mut self) -> Option<&mut MutationModal>;

    async fn submit_modal(&mut self) -> Option<SubmitOutcome>;

    fn close_modal(&mut self) -> CloseRequest;

    fn discard_modal(&mut self);

    fn open_delete(&mut self) -> bool;

    fn delete_prompt(&self) -> Option<String>;

    async fn confirm_delete(&mut self);

    fn cancel_delete(&mut self);
}

#[async_trait]
impl<R: Editable + Columns> ResourceView for ResourceScreen<R> {
    fn kind(&self) -> ResourceKind {
        R::KIND
    }

    fn is_mounted(&self) -> bool {
        self.list().state().phase != LoadPhase::Idle
    }

    fn table(&self) -> TableView {
        let state = self.list().state();
        TableView {
            headers: R::HEADERS,
            widths: R::WIDTHS,
            rows: state.items.iter().map(Columns::cells).collect(),
            selected: state.selected,
            page: state.page,
            total_pages: state.total_pages,
            total_items: state.total_items,
            search_term: state.search_term.clone(),
            loading: state.is_loading(),
            error: state.error().map(ToString::to_string),
        }
    }

    async fn mount(&mut self) {
        ResourceScreen::mount(self).await;
    }

    async fn refetch(&mut self) {
        self.list_mut().refetch().await;
    }

    async fn next_page(&mut self) {
        self.list_mut().next_page().await;
    }

    async fn previous_page(&mut self) {
        self.list_mut().previous_page().await;
    }

    async fn change_search(&mut self, term: String) {
        self.list_mut().change_search(term).await;
    }

    fn select_next(&mut self) {
        self.list_mut().select_next();
    }

    fn select_previous(&mut self) {
        self.list_mut().select_previous();
    }

    fn select_first(&mut self) {
        self.list_mut().select_first();
    }

    fn select_last(&mut self) {
        self.list_mut().select_last();
    }

    fn open_create(&mut self) {
        ResourceScreen::open_create(self);
    }

    fn open_edit(&mut self) {
        self.open_edit_selected();
    }

    fn modal(&self) -> Option<&MutationModal> {
        ResourceScreen::modal(self)
    }

    fn modal_mut(&mut self) -> Option<&mut MutationModal> {
        ResourceScreen::modal_mut(self)
    }

    async fn submit_modal(&mut self) -> Option<SubmitOutcome> {
        ResourceScreen::submit_modal(self).await
    }

    fn close_modal(&mut self) -> CloseRequest {
        ResourceScreen::close_modal(self)
    }

    fn discard_modal(&mut self) {
        ResourceScreen::discard_modal(self);
    }

    fn open_delete(&mut self) -> bool {
        self.open_delete_selected()
    }

    fn delete_prompt(&self) -> Option<String> {
        self.delete_dialog().map(|dialog| dialog.prompt())
    }

    async fn confirm_delete(&mut self) {
        ResourceScreen::confirm_delete(self).await;
    }

    fn cancel_delete(&mut self) {
        ResourceScreen::cancel_delete(self);
    }
}
