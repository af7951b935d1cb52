//! Domain DTOs for the book API.
//!
//! # Design
//! These types mirror the API's JSON schema but are defined independently of
//! the mock-server crate. Integration tests catch any schema drift between
//! the two.

use serde::{Deserialize, Serialize};

/// A single book record returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub year: i32,
    #[serde(default)]
    pub rating: Option<i32>,
}

/// Request payload for both creating and updating a book.
///
/// `year` and `rating` serialize as `null` when absent. The server decides
/// whether a missing value is acceptable; the client only coerces form text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BookInput {
    pub title: String,
    pub author: String,
    pub year: Option<i32>,
    pub rating: Option<i32>,
}

/// Aggregate counters computed server-side. Year markers are `None` when the
/// collection is empty.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Stats {
    pub total: u64,
    #[serde(default)]
    pub oldest: Option<i32>,
    #[serde(default)]
    pub newest: Option<i32>,
}

/// Rejection body returned with a non-success status.
///
/// `detail` is a string for domain errors, but request validation failures
/// carry a structured value, so it is kept as raw JSON.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorDetail {
    pub detail: serde_json::Value,
}

impl ErrorDetail {
    /// Human-readable text of the detail. Strings are returned verbatim,
    /// anything else as compact JSON.
    pub fn message(&self) -> String {
        match &self.detail {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}
