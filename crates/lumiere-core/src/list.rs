//! Resource list controller: fetch, filter, paginate
//!
//! Every screen runs the same cycle. A [`ListController`] is `Idle` until
//! mounted, enters `Loading` on mount, page change, search change or an
//! explicit refetch, and settles in `Loaded` or `Errored`. Failures are
//! reported once through the [`Notifier`] and never retried; the previous
//! items stay visible until the next successful fetch.

use std::sync::Arc;

use serde_json::Value;

use lumiere_api::{EntityId, ListResponse, PaginationMode, Resource, ResourcePage};
use lumiere_client::ListQuery;

use crate::notify::Notifier;
use crate::source::CollectionSource;

const DECODE_FAILED: &str = "The server sent an unexpected response.";

/// Filter `items` by `term` and cut out page `page` (1-indexed).
///
/// Matching is a case-insensitive substring test against each item's
/// [`Resource::search_text`] fields; an empty term matches everything. The
/// result always reports at least one page. A page past the end yields no
/// items but keeps the real totals.
pub fn filter_and_paginate<R: Resource>(
    items: &[R],
    term: &str,
    page: usize,
    page_size: usize,
) -> ResourcePage<R> {
    let needle = term.to_lowercase();
    let page = page.max(1);
    let page_size = page_size.max(1);

    let filtered: Vec<&R> = items
        .iter()
        .filter(|item| {
            needle.is_empty()
                || item
                    .search_text()
                    .iter()
                    .any(|field| field.to_lowercase().contains(&needle))
        })
        .collect();

    let total_items = filtered.len();
    let start = (page - 1).saturating_mul(page_size).min(total_items);
    let end = start.saturating_add(page_size).min(total_items);

    ResourcePage {
        items: filtered[start..end].iter().map(|item| (*item).clone()).collect(),
        total_pages: total_items.div_ceil(page_size).max(1),
        total_items,
    }
}

/// Name of the entity with `id`, or an empty string when it is not in `items`
pub fn lookup_name<'a, R: Resource>(items: &'a [R], id: &EntityId) -> &'a str {
    items
        .iter()
        .find(|item| item.id() == id)
        .map_or("", |item| item.display_name())
}

/// Where a list is in its fetch cycle
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadPhase {
    #[default]
    Idle,
    Loading,
    Loaded,
    Errored(String),
}

/// State owned by one list screen
#[derive(Debug, Clone)]
pub struct ListViewState<R> {
    /// Current page, 1-indexed
    pub page: usize,
    pub search_term: String,
    /// Items of the current page
    pub items: Vec<R>,
    pub total_pages: usize,
    pub total_items: usize,
    pub phase: LoadPhase,
    /// Highlighted row within `items`; 0 is the top of the viewport
    pub selected: usize,
}

impl<R> Default for ListViewState<R> {
    fn default() -> Self {
        Self {
            page: 1,
            search_term: String::new(),
            items: Vec::new(),
            total_pages: 1,
            total_items: 0,
            phase: LoadPhase::Idle,
            selected: 0,
        }
    }
}

impl<R> ListViewState<R> {
    pub fn is_loading(&self) -> bool {
        self.phase == LoadPhase::Loading
    }

    /// Message of the last failed fetch
    pub fn error(&self) -> Option<&str> {
        match &self.phase {
            LoadPhase::Errored(message) => Some(message),
            _ => None,
        }
    }
}

/// Fetches and pages one resource collection
pub struct ListController<R: Resource> {
    source: Arc<dyn CollectionSource>,
    notifier: Notifier,
    page_size: usize,
    state: ListViewState<R>,
}

impl<R: Resource> ListController<R> {
    pub fn new(source: Arc<dyn CollectionSource>, notifier: Notifier) -> Self {
        Self {
            source,
            notifier,
            page_size: R::KIND.page_size(),
            state: ListViewState::default(),
        }
    }

    /// Start from `term` instead of an empty search; takes effect on the next fetch
    #[must_use]
    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.state.search_term = term.into();
        self
    }

    pub fn state(&self) -> &ListViewState<R> {
        &self.state
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn source(&self) -> &Arc<dyn CollectionSource> {
        &self.source
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    /// Load the current page for the current search term
    pub async fn fetch(&mut self) {
        self.state.phase = LoadPhase::Loading;
        let kind = R::KIND;
        let query = self.query();

        let result = match self.source.list(kind, &query).await {
            Ok(response) => self.decode(response),
            Err(e) => Err(e.user_message()),
        };

        match result {
            Ok(page) => {
                tracing::debug!(
                    "loaded {} page {} ({} of {})",
                    kind.label(),
                    self.state.page,
                    page.items.len(),
                    page.total_items
                );
                self.state.items = page.items;
                self.state.total_pages = page.total_pages.max(1);
                self.state.total_items = page.total_items;
                self.state.selected = self
                    .state
                    .selected
                    .min(self.state.items.len().saturating_sub(1));
                self.state.phase = LoadPhase::Loaded;
            }
            Err(message) => {
                tracing::warn!("failed to load {}: {message}", kind.title());
                self.notifier.error(message.clone());
                self.state.phase = LoadPhase::Errored(message);
            }
        }
    }

    /// Alias for [`fetch`](Self::fetch) used after a mutation
    pub async fn refetch(&mut self) {
        self.fetch().await;
    }

    /// Jump to `page` (values below 1 become 1), back to the top row
    pub async fn change_page(&mut self, page: usize) {
        self.state.page = page.max(1);
        self.state.selected = 0;
        self.fetch().await;
    }

    pub async fn next_page(&mut self) {
        if self.state.page < self.state.total_pages {
            self.change_page(self.state.page + 1).await;
        }
    }

    pub async fn previous_page(&mut self) {
        if self.state.page > 1 {
            self.change_page(self.state.page - 1).await;
        }
    }

    /// Replace the search term and restart from page 1
    pub async fn change_search(&mut self, term: impl Into<String>) {
        self.state.search_term = term.into();
        self.state.page = 1;
        self.state.selected = 0;
        self.fetch().await;
    }

    pub fn select_next(&mut self) {
        if self.state.selected + 1 < self.state.items.len() {
            self.state.selected += 1;
        }
    }

    pub fn select_previous(&mut self) {
        self.state.selected = self.state.selected.saturating_sub(1);
    }

    pub fn select_first(&mut self) {
        self.state.selected = 0;
    }

    pub fn select_last(&mut self) {
        self.state.selected = self.state.items.len().saturating_sub(1);
    }

    pub fn selected(&self) -> Option<&R> {
        self.state.items.get(self.state.selected)
    }

    fn query(&self) -> ListQuery {
        match R::KIND.pagination() {
            PaginationMode::Server => ListQuery {
                page: Some(self.state.page),
                page_size: Some(self.page_size),
                name: Some(self.state.search_term.trim().to_string()).filter(|n| !n.is_empty()),
                ..ListQuery::default()
            },
            PaginationMode::Client => ListQuery::default(),
        }
    }

    fn decode(&self, response: ListResponse<Value>) -> Result<ResourcePage<R>, String> {
        let decode = |value: Value| {
            serde_json::from_value::<R>(value).map_err(|e| {
                tracing::warn!("undecodable {}: {e}", R::KIND.label());
                DECODE_FAILED.to_string()
            })
        };

        match response {
            ListResponse::Paged(page) => page.try_map(decode),
            ListResponse::Plain(values) => {
                let items = values.into_iter().map(decode).collect::<Result<Vec<R>, _>>()?;
                Ok(filter_and_paginate(
                    &items,
                    &self.state.search_term,
                    self.state.page,
                    self.page_size,
                ))
            }
        }
    }
}
