//! Stateless HTTP request builder and response parser for the book API.
//!
//! # Design
//! `BookClient` holds only a `base_url` and carries no mutable state between
//! calls. Each operation is split into a `build_*` method that produces an
//! `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`.
//! The caller executes the actual HTTP round-trip.

use serde::de::DeserializeOwned;
use url::form_urlencoded;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{Book, BookInput, ErrorDetail, Stats};

/// Synchronous, stateless client for the book API.
#[derive(Debug, Clone)]
pub struct BookClient {
    base_url: String,
}

impl BookClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_list_books(&self) -> HttpRequest {
        self.request(HttpMethod::Get, "/books/".to_string())
    }

    pub fn build_stats(&self) -> HttpRequest {
        self.request(HttpMethod::Get, "/books/stats".to_string())
    }

    /// The query is sent as given; callers trim it. Reserved characters are
    /// percent-encoded and a space becomes `%20`.
    pub fn build_search_books(&self, query: &str) -> HttpRequest {
        let encoded = encode_component(query);
        self.request(HttpMethod::Get, format!("/books/search?q={encoded}"))
    }

    pub fn build_get_book(&self, id: i64) -> HttpRequest {
        self.request(HttpMethod::Get, format!("/books/{id}"))
    }

    pub fn build_create_book(&self, input: &BookInput) -> Result<HttpRequest, ApiError> {
        self.json_request(HttpMethod::Post, "/books/".to_string(), input)
    }

    pub fn build_update_book(&self, id: i64, input: &BookInput) -> Result<HttpRequest, ApiError> {
        self.json_request(HttpMethod::Put, format!("/books/{id}"), input)
    }

    pub fn build_delete_book(&self, id: i64) -> HttpRequest {
        self.request(HttpMethod::Delete, format!("/books/{id}"))
    }

    pub fn parse_list_books(&self, response: HttpResponse) -> Result<Vec<Book>, ApiError> {
        parse_json(response)
    }

    pub fn parse_stats(&self, response: HttpResponse) -> Result<Stats, ApiError> {
        parse_json(response)
    }

    pub fn parse_search_books(&self, response: HttpResponse) -> Result<Vec<Book>, ApiError> {
        parse_json(response)
    }

    pub fn parse_get_book(&self, response: HttpResponse) -> Result<Book, ApiError> {
        parse_json(response)
    }

    pub fn parse_create_book(&self, response: HttpResponse) -> Result<Book, ApiError> {
        parse_json(response)
    }

    pub fn parse_update_book(&self, response: HttpResponse) -> Result<Book, ApiError> {
        parse_json(response)
    }

    pub fn parse_delete_book(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }

    fn request(&self, method: HttpMethod, path: String) -> HttpRequest {
        HttpRequest {
            method,
            url: format!("{}{path}", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    fn json_request(
        &self,
        method: HttpMethod,
        path: String,
        input: &BookInput,
    ) -> Result<HttpRequest, ApiError> {
        let body =
            serde_json::to_string(input).map_err(|e| ApiError::Serialization(e.to_string()))?;
        let mut req = self.request(method, path);
        req.headers
            .push(("content-type".to_string(), "application/json".to_string()));
        req.body = Some(body);
        Ok(req)
    }
}

fn parse_json<T: DeserializeOwned>(response: HttpResponse) -> Result<T, ApiError> {
    check_status(&response)?;
    serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    let detail = rejection_detail(response);
    if response.status == 404 {
        return Err(ApiError::NotFound { detail });
    }
    Err(ApiError::Rejected {
        status: response.status,
        detail,
    })
}

/// Pull `detail` out of a rejection body, falling back to the raw body and
/// then to the bare status.
fn rejection_detail(response: &HttpResponse) -> String {
    if let Ok(parsed) = serde_json::from_str::<ErrorDetail>(&response.body) {
        return parsed.message();
    }
    let raw = response.body.trim();
    if raw.is_empty() {
        format!("HTTP {}", response.status)
    } else {
        raw.to_string()
    }
}

/// Percent-encode one query value. A literal `+` is already `%2B` after
/// form encoding, so every remaining `+` stands for a space.
fn encode_component(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}
