//! The page surface the view renders into.
//!
//! # Design
//! `Page` stands in for the document: the view reads form contents from it
//! and pushes fully computed state into it, never the reverse. Everything
//! shown in the list is derived from one API response at a time, so the list
//! is replaced wholesale by a `ListContent` value.

use std::time::Duration;

use book_core::{Book, Stats};

use crate::form::{BookForm, EditForm};

/// Fixed element ids of the page.
pub mod ids {
    pub const BOOK_LIST: &str = "books-list";
    pub const STAT_TOTAL: &str = "stat-total";
    pub const STAT_OLDEST: &str = "stat-oldest";
    pub const STAT_NEWEST: &str = "stat-newest";
    pub const ADD_FORM: &str = "add-book-form";
    pub const EDIT_FORM: &str = "edit-book-form";
    pub const SEARCH_INPUT: &str = "search-input";
    pub const FORM_SUCCESS: &str = "form-success";
    pub const FORM_ERROR: &str = "form-error";
    pub const EDIT_ERROR: &str = "edit-error";
    pub const EDIT_MODAL: &str = "edit-modal";
}

pub const STAR: char = '⭐';

/// One rendered book.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookCard {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub year: i32,
    /// One star per rating point; `None` when the book is unrated.
    pub stars: Option<String>,
}

impl BookCard {
    pub fn from_book(book: &Book) -> Self {
        let stars = book
            .rating
            .and_then(|r| usize::try_from(r).ok())
            .filter(|&r| r > 0)
            .map(|r| STAR.to_string().repeat(r));
        Self {
            id: book.id,
            title: book.title.clone(),
            author: book.author.clone(),
            year: book.year,
            stars,
        }
    }
}

/// Content of the book list container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListContent {
    Cards(Vec<BookCard>),
    /// Placeholder shown when the collection is empty.
    Empty,
    /// Persistent error panel.
    Error(String),
}

impl ListContent {
    pub fn from_books(books: &[Book]) -> Self {
        if books.is_empty() {
            ListContent::Empty
        } else {
            ListContent::Cards(books.iter().map(BookCard::from_book).collect())
        }
    }

    pub fn cards(&self) -> &[BookCard] {
        match self {
            ListContent::Cards(cards) => cards,
            _ => &[],
        }
    }
}

impl Default for ListContent {
    fn default() -> Self {
        ListContent::Cards(Vec::new())
    }
}

pub const MISSING_YEAR: &str = "-";

/// Text of the three stats fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsDisplay {
    pub total: String,
    pub oldest: String,
    pub newest: String,
}

impl From<&Stats> for StatsDisplay {
    fn from(stats: &Stats) -> Self {
        let year = |y: Option<i32>| y.map_or_else(|| MISSING_YEAR.to_string(), |y| y.to_string());
        Self {
            total: stats.total.to_string(),
            oldest: year(stats.oldest),
            newest: year(stats.newest),
        }
    }
}

/// Where a message is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageSlot {
    AddSuccess,
    AddError,
    EditError,
}

impl MessageSlot {
    pub const ALL: [MessageSlot; 3] = [
        MessageSlot::AddSuccess,
        MessageSlot::AddError,
        MessageSlot::EditError,
    ];

    /// Id of the element the message is written into.
    pub fn id(self) -> &'static str {
        match self {
            MessageSlot::AddSuccess => ids::FORM_SUCCESS,
            MessageSlot::AddError => ids::FORM_ERROR,
            MessageSlot::EditError => ids::EDIT_ERROR,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Overlay {
    #[default]
    Hidden,
    Visible,
}

/// What the view needs from the document.
pub trait Page {
    fn render_list(&mut self, content: ListContent);

    fn render_stats(&mut self, stats: StatsDisplay);

    fn add_form(&self) -> BookForm;

    fn reset_add_form(&mut self);

    fn edit_form(&self) -> EditForm;

    fn fill_edit_form(&mut self, form: EditForm);

    /// `duration: None` keeps the message until it is replaced or cleared.
    fn show_message(&mut self, slot: MessageSlot, text: String, duration: Option<Duration>);

    fn clear_message(&mut self, slot: MessageSlot);

    fn set_overlay(&mut self, overlay: Overlay);

    /// Blocking yes/no question.
    fn confirm(&mut self, prompt: &str) -> bool;

    /// Blocking notice.
    fn alert(&mut self, text: &str);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book(id: i64, rating: Option<i32>) -> Book {
        Book {
            id,
            title: format!("Title {id}"),
            author: "Author".to_string(),
            year: 2000,
            rating,
        }
    }

    #[test]
    fn stars_match_rating() {
        let card = BookCard::from_book(&book(1, Some(3)));
        assert_eq!(card.stars.as_deref(), Some("⭐⭐⭐"));
        assert_eq!(card.stars.unwrap().chars().count(), 3);
    }

    #[test]
    fn no_stars_without_positive_rating() {
        assert_eq!(BookCard::from_book(&book(1, None)).stars, None);
        assert_eq!(BookCard::from_book(&book(1, Some(0))).stars, None);
        assert_eq!(BookCard::from_book(&book(1, Some(-2))).stars, None);
    }

    #[test]
    fn empty_books_give_placeholder() {
        assert_eq!(ListContent::from_books(&[]), ListContent::Empty);
        assert!(ListContent::Empty.cards().is_empty());
    }

    #[test]
    fn stats_display_uses_dash_for_missing_years() {
        let display = StatsDisplay::from(&Stats::default());
        assert_eq!(display.total, "0");
        assert_eq!(display.oldest, "-");
        assert_eq!(display.newest, "-");
    }
}
