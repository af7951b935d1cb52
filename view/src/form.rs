//! Raw form contents and their coercion into API payloads.

use book_core::{Book, BookInput};

/// The four text fields shared by the add and edit forms, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookForm {
    pub title: String,
    pub author: String,
    pub year: String,
    pub rating: String,
}

impl BookForm {
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        year: impl Into<String>,
        rating: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            year: year.into(),
            rating: rating.into(),
        }
    }

    /// Pre-fill from a stored book. A missing rating becomes a blank field.
    pub fn from_book(book: &Book) -> Self {
        Self {
            title: book.title.clone(),
            author: book.author.clone(),
            year: book.year.to_string(),
            rating: book.rating.map(|r| r.to_string()).unwrap_or_default(),
        }
    }

    /// Text is passed through untouched; only the numeric fields are coerced.
    pub fn to_input(&self) -> BookInput {
        BookInput {
            title: self.title.clone(),
            author: self.author.clone(),
            year: coerce_int(&self.year),
            rating: if self.rating.trim().is_empty() {
                None
            } else {
                coerce_int(&self.rating)
            },
        }
    }
}

/// The edit form: the hidden id field plus the four visible fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditForm {
    pub id: Option<i64>,
    pub fields: BookForm,
}

/// Lenient integer parsing: leading whitespace, an optional sign, then the
/// leading run of ASCII digits. Trailing garbage is ignored. No digits, or a
/// value outside `i32`, yields `None`.
pub fn coerce_int(raw: &str) -> Option<i32> {
    let s = raw.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    if end == 0 {
        return None;
    }
    let magnitude: i64 = rest[..end].parse().ok()?;
    i32::try_from(if negative { -magnitude } else { magnitude }).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coerce_plain_numbers() {
        assert_eq!(coerce_int("1965"), Some(1965));
        assert_eq!(coerce_int("  42 "), Some(42));
        assert_eq!(coerce_int("-5"), Some(-5));
        assert_eq!(coerce_int("+7"), Some(7));
    }

    #[test]
    fn coerce_ignores_trailing_text() {
        assert_eq!(coerce_int("1965abc"), Some(1965));
        assert_eq!(coerce_int("12.9"), Some(12));
    }

    #[test]
    fn coerce_rejects_non_numbers() {
        assert_eq!(coerce_int(""), None);
        assert_eq!(coerce_int("   "), None);
        assert_eq!(coerce_int("abc"), None);
        assert_eq!(coerce_int("-"), None);
        assert_eq!(coerce_int("99999999999"), None);
        assert_eq!(coerce_int("99999999999999999999999"), None);
    }

    #[test]
    fn blank_rating_is_none() {
        let input = BookForm::new("Dune", "Herbert", "1965", " ").to_input();
        assert_eq!(input.year, Some(1965));
        assert_eq!(input.rating, None);
    }

    #[test]
    fn full_form_becomes_exact_input() {
        let input = BookForm::new("Dune", "Herbert", "1965", "5").to_input();
        assert_eq!(
            input,
            BookInput {
                title: "Dune".to_string(),
                author: "Herbert".to_string(),
                year: Some(1965),
                rating: Some(5),
            }
        );
    }

    #[test]
    fn from_book_blanks_missing_rating() {
        let book = Book {
            id: 3,
            title: "Foundation".to_string(),
            author: "Asimov".to_string(),
            year: 1951,
            rating: None,
        };
        let form = BookForm::from_book(&book);
        assert_eq!(form.year, "1951");
        assert_eq!(form.rating, "");
    }
}
