//! Request building and response decoding for the book REST API.
//!
//! # Overview
//! Nothing in this crate performs I/O. `BookClient` turns each of the seven
//! API operations into an `HttpRequest` and turns the matching
//! `HttpResponse` back into `Book`, `Stats` or an `ApiError`. Whoever owns
//! the connection (the view's reqwest transport, a test's ureq agent, a
//! scripted fake) runs the exchange in between.
//!
//! # Design
//! - `BookClient` keeps only the base URL; queries are percent-encoded when
//!   the request is built.
//! - 404 becomes `ApiError::NotFound`, any other non-2xx status
//!   `ApiError::Rejected`, both carrying the server's `detail` text.
//! - Payload types are declared here rather than shared with the mock
//!   server, so the integration tests notice when the two disagree.

pub mod client;
pub mod error;
pub mod http;
pub mod types;

pub use client::BookClient;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use types::{Book, BookInput, ErrorDetail, Stats};
