//! Book list page controller.
//!
//! # Overview
//! `BookListView` reacts to page events (load, search input, form
//! submissions, card buttons) by calling the book API and re-rendering the
//! page from the responses.
//!
//! # Design
//! - The view depends on two seams: `BookApi` for the network and `Page` for
//!   the document. Tests substitute both.
//! - `RestBookApi` pairs the I/O-free `book_core::BookClient` with a
//!   `Transport`; `ReqwestTransport` performs real HTTP.
//! - Every mutation is followed by a full list reload.
//! - List responses carry sequence tickets so a stale search result never
//!   overwrites a newer one.
//! - `Document` is an in-memory page; the `book-view` binary drives it from
//!   a terminal.

pub mod api;
pub mod config;
pub mod document;
pub mod error;
pub mod events;
pub mod form;
pub mod html;
pub mod page;
pub mod sequence;
pub mod terminal;
pub mod view;

pub use api::{BookApi, ReqwestTransport, RestBookApi, Transport};
pub use config::ViewConfig;
pub use document::Document;
pub use error::{Result, ViewError};
pub use events::PageEvent;
pub use form::{BookForm, EditForm};
pub use page::{BookCard, ListContent, MessageSlot, Overlay, Page, StatsDisplay};
pub use view::BookListView;
