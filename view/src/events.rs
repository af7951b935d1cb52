//! Page events and their dispatch onto view operations.

use crate::api::BookApi;
use crate::page::Page;
use crate::view::BookListView;

/// Everything the page can report to the view. Submissions are consumed by
/// the view; no default form submission follows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageEvent {
    Loaded,
    AddSubmitted,
    SearchInput(String),
    EditClicked(i64),
    DeleteClicked(i64),
    EditSubmitted,
    EditCancelled,
}

impl<A: BookApi, P: Page> BookListView<A, P> {
    pub async fn handle(&self, event: PageEvent) {
        log::debug!("event {event:?}");
        match event {
            PageEvent::Loaded => self.load_books().await,
            PageEvent::AddSubmitted => self.submit_add_form().await,
            PageEvent::SearchInput(query) => self.search_books(&query).await,
            PageEvent::EditClicked(id) => self.open_edit_modal(id).await,
            PageEvent::DeleteClicked(id) => self.delete_book(id).await,
            PageEvent::EditSubmitted => self.submit_edit_form().await,
            PageEvent::EditCancelled => self.close_edit_modal(),
        }
    }
}
