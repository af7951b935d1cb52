//! The book list page controller.
//!
//! # Design
//! `BookListView` owns an API handle and a page. Operations take `&self` so
//! that several of them can be in flight on one thread, as UI event handlers
//! are. The page sits in a `RefCell` that is only borrowed for synchronous
//! updates between awaits, never across one.
//!
//! Every mutation ends with a full reload of the list; nothing is patched
//! locally. API failures never escape an operation: each ends up as a list
//! panel, a message, an alert or (for stats) a log line.

use std::cell::{Ref, RefCell, RefMut};
use std::time::Duration;

use book_core::ApiError;

use crate::api::BookApi;
use crate::config::DEFAULT_MESSAGE_MS;
use crate::form::{BookForm, EditForm};
use crate::page::{ListContent, MessageSlot, Overlay, Page, StatsDisplay};
use crate::sequence::ListSequencer;

pub const LOAD_FAILED: &str =
    "Could not reach the book API. Make sure the server is running.";
pub const SEARCH_FAILED: &str = "Search failed. Could not reach the book API.";
pub const ADD_SUCCEEDED: &str = "✅ Book added successfully!";
pub const CONNECTION_FAILED: &str = "❌ Connection error";
pub const DELETE_PROMPT: &str = "Are you sure you want to delete this book?";
pub const DELETE_FAILED: &str = "Failed to delete the book";
pub const DELETE_CONNECTION_FAILED: &str = "Connection error";
pub const OPEN_FAILED: &str = "Could not load the book for editing";
pub const NO_BOOK_SELECTED: &str = "❌ No book selected";

pub struct BookListView<A, P> {
    api: A,
    page: RefCell<P>,
    sequencer: ListSequencer,
    message_duration: Duration,
}

impl<A: BookApi, P: Page> BookListView<A, P> {
    pub fn new(api: A, page: P) -> Self {
        Self {
            api,
            page: RefCell::new(page),
            sequencer: ListSequencer::default(),
            message_duration: Duration::from_millis(DEFAULT_MESSAGE_MS),
        }
    }

    pub fn with_message_duration(mut self, duration: Duration) -> Self {
        self.message_duration = duration;
        self
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Do not hold the returned guard across an await.
    pub fn page(&self) -> Ref<'_, P> {
        self.page.borrow()
    }

    /// Do not hold the returned guard across an await.
    pub fn page_mut(&self) -> RefMut<'_, P> {
        self.page.borrow_mut()
    }

    /// Fetch the whole collection, render it, then refresh the stats.
    pub async fn load_books(&self) {
        let ticket = self.sequencer.issue();
        match self.api.list_books().await {
            Ok(books) => {
                log::debug!("loaded {} books", books.len());
                self.render_list(ticket, ListContent::from_books(&books));
                self.load_stats().await;
            }
            Err(err) => {
                log::error!("failed to load books: {err}");
                self.render_list(ticket, ListContent::Error(LOAD_FAILED.to_string()));
            }
        }
    }

    /// Refresh the stats fields. Failures only reach the log.
    pub async fn load_stats(&self) {
        match self.api.stats().await {
            Ok(stats) => self.page.borrow_mut().render_stats(StatsDisplay::from(&stats)),
            Err(err) => log::warn!("failed to load stats: {err}"),
        }
    }

    /// Run on every change of the search box. A blank query reloads the full
    /// list; otherwise the filtered list is rendered and stats are left alone.
    pub async fn search_books(&self, query: &str) {
        let query = query.trim();
        if query.is_empty() {
            self.load_books().await;
            return;
        }

        let ticket = self.sequencer.issue();
        match self.api.search_books(query).await {
            Ok(books) => {
                log::debug!("search {query:?} matched {} books", books.len());
                self.render_list(ticket, ListContent::from_books(&books));
            }
            Err(err) => {
                log::error!("search {query:?} failed: {err}");
                self.render_list(ticket, ListContent::Error(SEARCH_FAILED.to_string()));
            }
        }
    }

    /// Handle submission of the add form.
    pub async fn submit_add_form(&self) {
        let form = self.page.borrow().add_form();
        self.create_book(form).await;
    }

    pub async fn create_book(&self, form: BookForm) {
        let input = form.to_input();
        match self.api.create_book(&input).await {
            Ok(book) => {
                log::info!("created book {} ({:?})", book.id, book.title);
                {
                    let mut page = self.page.borrow_mut();
                    page.show_message(
                        MessageSlot::AddSuccess,
                        ADD_SUCCEEDED.to_string(),
                        Some(self.message_duration),
                    );
                    page.reset_add_form();
                }
                self.load_books().await;
            }
            Err(err) => {
                log::warn!("create rejected: {err}");
                self.page.borrow_mut().show_message(
                    MessageSlot::AddError,
                    failure_text(&err),
                    Some(self.message_duration),
                );
            }
        }
    }

    /// Fetch one book into the edit form and show the overlay. A previous
    /// edit error is cleared.
    pub async fn open_edit_modal(&self, id: i64) {
        match self.api.get_book(id).await {
            Ok(book) => {
                let mut page = self.page.borrow_mut();
                page.fill_edit_form(EditForm {
                    id: Some(book.id),
                    fields: BookForm::from_book(&book),
                });
                page.clear_message(MessageSlot::EditError);
                page.set_overlay(Overlay::Visible);
            }
            Err(err) => {
                log::error!("failed to open book {id} for editing: {err}");
                self.page.borrow_mut().alert(OPEN_FAILED);
            }
        }
    }

    pub fn close_edit_modal(&self) {
        self.page.borrow_mut().set_overlay(Overlay::Hidden);
    }

    /// Handle submission of the edit form.
    pub async fn submit_edit_form(&self) {
        let EditForm { id, fields } = self.page.borrow().edit_form();
        match id {
            Some(id) => self.update_book(id, fields).await,
            None => self.page.borrow_mut().show_message(
                MessageSlot::EditError,
                NO_BOOK_SELECTED.to_string(),
                None,
            ),
        }
    }

    pub async fn update_book(&self, id: i64, form: BookForm) {
        let input = form.to_input();
        match self.api.update_book(id, &input).await {
            Ok(book) => {
                log::info!("updated book {}", book.id);
                self.page.borrow_mut().clear_message(MessageSlot::EditError);
                self.close_edit_modal();
                self.load_books().await;
            }
            Err(err) => {
                log::warn!("update of book {id} rejected: {err}");
                self.page
                    .borrow_mut()
                    .show_message(MessageSlot::EditError, failure_text(&err), None);
            }
        }
    }

    /// Delete after a blocking confirmation. Declining issues no request.
    pub async fn delete_book(&self, id: i64) {
        if !self.page.borrow_mut().confirm(DELETE_PROMPT) {
            log::debug!("delete of book {id} cancelled");
            return;
        }

        match self.api.delete_book(id).await {
            Ok(()) => {
                log::info!("deleted book {id}");
                self.load_books().await;
            }
            Err(err) => {
                log::warn!("delete of book {id} failed: {err}");
                let text = if err.is_network() {
                    DELETE_CONNECTION_FAILED
                } else {
                    DELETE_FAILED
                };
                self.page.borrow_mut().alert(text);
            }
        }
    }

    fn render_list(&self, ticket: u64, content: ListContent) {
        if self.sequencer.accept(ticket) {
            self.page.borrow_mut().render_list(content);
        } else {
            log::debug!("dropping stale list response #{ticket}");
        }
    }
}

/// Message text for a failed create or update.
fn failure_text(err: &ApiError) -> String {
    match err.detail() {
        Some(detail) => format!("❌ {detail}"),
        None if err.is_network() => CONNECTION_FAILED.to_string(),
        None => format!("❌ {err}"),
    }
}
