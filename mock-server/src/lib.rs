use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};

pub const MIN_YEAR: i32 = 1000;
pub const MAX_YEAR: i32 = 2025;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub year: i32,
    pub rating: Option<i32>,
}

#[derive(Deserialize)]
pub struct CreateBook {
    pub title: String,
    pub author: String,
    pub year: Option<i32>,
    #[serde(default)]
    pub rating: Option<i32>,
}

/// Blank strings and zero/null numbers mean "keep the stored value".
#[derive(Deserialize)]
pub struct UpdateBook {
    pub title: Option<String>,
    pub author: Option<String>,
    pub year: Option<i32>,
    pub rating: Option<i32>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Stats {
    pub total: usize,
    pub oldest: Option<i32>,
    pub newest: Option<i32>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Detail {
    pub detail: String,
}

#[derive(Deserialize)]
pub struct SearchParams {
    pub q: String,
}

#[derive(Default)]
pub struct Store {
    books: BTreeMap<i64, Book>,
    next_id: i64,
}

impl Store {
    fn insert(&mut self, mut book: Book) -> Book {
        self.next_id += 1;
        book.id = self.next_id;
        self.books.insert(book.id, book.clone());
        book
    }

    fn exists(&self, title: &str, author: &str) -> bool {
        self.books.values().any(|b| {
            b.title.to_lowercase() == title.to_lowercase()
                && b.author.to_lowercase() == author.to_lowercase()
        })
    }
}

pub type Db = Arc<RwLock<Store>>;

type Rejection = (StatusCode, Json<Detail>);

fn reject(status: StatusCode, detail: impl Into<String>) -> Rejection {
    (
        status,
        Json(Detail {
            detail: detail.into(),
        }),
    )
}

fn not_found(id: i64) -> Rejection {
    reject(StatusCode::NOT_FOUND, format!("Book not found: ID {id}"))
}

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    Router::new()
        .route("/books/", get(list_books).post(create_book))
        .route("/books/stats", get(stats))
        .route("/books/search", get(search_books))
        .route(
            "/books/{id}",
            get(get_book).put(update_book).delete(delete_book),
        )
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

/// Validate a complete record the way the book API does before storing it.
fn validate(
    title: &str,
    author: &str,
    year: Option<i32>,
    rating: Option<i32>,
) -> Result<Book, Rejection> {
    let title = title.trim();
    if title.is_empty() {
        return Err(reject(
            StatusCode::BAD_REQUEST,
            "Invalid title: the title cannot be empty.",
        ));
    }
    let author = author.trim();
    if author.is_empty() {
        return Err(reject(
            StatusCode::BAD_REQUEST,
            "Invalid author: the author cannot be empty.",
        ));
    }
    let year = year.ok_or_else(|| {
        reject(
            StatusCode::UNPROCESSABLE_ENTITY,
            "Invalid year: a whole number is required.",
        )
    })?;
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return Err(reject(
            StatusCode::BAD_REQUEST,
            format!("Invalid year: {year}. The year must be between {MIN_YEAR} and {MAX_YEAR}."),
        ));
    }
    if let Some(rating) = rating {
        if !(1..=5).contains(&rating) {
            return Err(reject(
                StatusCode::BAD_REQUEST,
                format!("Invalid rating: {rating}. The rating must be between 1 and 5."),
            ));
        }
    }
    Ok(Book {
        id: 0,
        title: title.to_string(),
        author: author.to_string(),
        year,
        rating,
    })
}

async fn list_books(State(db): State<Db>) -> Json<Vec<Book>> {
    let store = db.read().await;
    Json(store.books.values().cloned().collect())
}

async fn stats(State(db): State<Db>) -> Json<Stats> {
    let store = db.read().await;
    let years = store.books.values().map(|b| b.year);
    Json(Stats {
        total: store.books.len(),
        oldest: years.clone().min(),
        newest: years.max(),
    })
}

async fn search_books(
    State(db): State<Db>,
    Query(params): Query<SearchParams>,
) -> Json<Vec<Book>> {
    if params.q.is_empty() {
        return Json(Vec::new());
    }
    let needle = params.q.to_lowercase();
    let store = db.read().await;
    Json(
        store
            .books
            .values()
            .filter(|b| b.title.to_lowercase().contains(&needle))
            .cloned()
            .collect(),
    )
}

async fn get_book(State(db): State<Db>, Path(id): Path<i64>) -> Result<Json<Book>, Rejection> {
    let store = db.read().await;
    store.books.get(&id).cloned().map(Json).ok_or_else(|| not_found(id))
}

async fn create_book(
    State(db): State<Db>,
    Json(input): Json<CreateBook>,
) -> Result<(StatusCode, Json<Book>), Rejection> {
    let mut store = db.write().await;
    if store.exists(input.title.trim(), input.author.trim()) {
        return Err(reject(
            StatusCode::CONFLICT,
            format!(
                "The book '{}' by {} already exists in the library.",
                input.title.trim(),
                input.author.trim()
            ),
        ));
    }
    let book = validate(&input.title, &input.author, input.year, input.rating)?;
    Ok((StatusCode::CREATED, Json(store.insert(book))))
}

async fn update_book(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Json(input): Json<UpdateBook>,
) -> Result<Json<Book>, Rejection> {
    let mut store = db.write().await;
    let existing = store.books.get(&id).cloned().ok_or_else(|| not_found(id))?;

    let title = input
        .title
        .filter(|t| !t.trim().is_empty())
        .unwrap_or(existing.title);
    let author = input
        .author
        .filter(|a| !a.trim().is_empty())
        .unwrap_or(existing.author);
    let year = input.year.filter(|y| *y != 0).unwrap_or(existing.year);
    let rating = input.rating.filter(|r| *r != 0).or(existing.rating);

    let mut updated = validate(&title, &author, Some(year), rating)?;
    updated.id = id;
    store.books.insert(id, updated.clone());
    Ok(Json(updated))
}

async fn delete_book(State(db): State<Db>, Path(id): Path<i64>) -> Result<StatusCode, Rejection> {
    let mut store = db.write().await;
    store
        .books
        .remove(&id)
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or_else(|| not_found(id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn book_serializes_null_rating() {
        let book = Book {
            id: 1,
            title: "Dune".to_string(),
            author: "Herbert".to_string(),
            year: 1965,
            rating: None,
        };
        let json = serde_json::to_value(&book).unwrap();
        assert_eq!(json["id"], 1);
        assert!(json["rating"].is_null());
    }

    #[test]
    fn create_book_rating_defaults_to_none() {
        let input: CreateBook =
            serde_json::from_str(r#"{"title":"Dune","author":"Herbert","year":1965}"#).unwrap();
        assert!(input.rating.is_none());
        assert_eq!(input.year, Some(1965));
    }

    #[test]
    fn create_book_rejects_missing_title() {
        let result: Result<CreateBook, _> =
            serde_json::from_str(r#"{"author":"Herbert","year":1965}"#);
        assert!(result.is_err());
    }

    #[test]
    fn validate_trims_text() {
        let book = validate("  Dune ", " Herbert", Some(1965), Some(5)).unwrap();
        assert_eq!(book.title, "Dune");
        assert_eq!(book.author, "Herbert");
    }

    #[test]
    fn validate_rejects_out_of_range_year() {
        let (status, Json(detail)) = validate("Dune", "Herbert", Some(999), None).unwrap_err();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(detail.detail.contains("999"));
    }

    #[test]
    fn validate_rejects_bad_rating() {
        let (status, _) = validate("Dune", "Herbert", Some(1965), Some(6)).unwrap_err();
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn validate_requires_year() {
        let (status, _) = validate("Dune", "Herbert", None, None).unwrap_err();
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn duplicate_check_ignores_case() {
        let mut store = Store::default();
        store.insert(validate("Dune", "Herbert", Some(1965), None).unwrap());
        assert!(store.exists("DUNE", "herbert"));
        assert!(!store.exists("Dune", "Asimov"));
    }
}
