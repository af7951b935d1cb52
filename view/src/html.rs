//! Markup for the book list container.

use crate::page::{BookCard, ListContent};

pub const EMPTY_TITLE: &str = "No books in your library yet";
pub const EMPTY_HINT: &str = "Add one to get started!";

pub fn render_list(content: &ListContent) -> String {
    match content {
        ListContent::Empty => format!(
            "<div class=\"empty-state\"><p>📚</p><p>{EMPTY_TITLE}</p><p>{EMPTY_HINT}</p></div>"
        ),
        ListContent::Error(message) => format!(
            "<div class=\"error-message\" style=\"display: block;\">❌ {}</div>",
            escape(message)
        ),
        ListContent::Cards(cards) => cards.iter().map(render_card).collect(),
    }
}

fn render_card(card: &BookCard) -> String {
    let mut out = format!(
        "<div class=\"book-item\" data-id=\"{id}\">\
         <div class=\"book-header\"><div>\
         <div class=\"book-title\">📖 {title}</div>\
         <div class=\"book-author\">by {author}</div>\
         </div></div>\
         <div class=\"book-meta\"><span class=\"meta-item\">📅 {year}</span>",
        id = card.id,
        title = escape(&card.title),
        author = escape(&card.author),
        year = card.year,
    );
    if let Some(stars) = &card.stars {
        out.push_str(&format!("<span class=\"meta-item rating\">{stars}</span>"));
    }
    out.push_str(&format!(
        "</div><div class=\"book-actions\">\
         <button class=\"btn-edit\" data-action=\"edit\" data-id=\"{id}\">✏️ Edit</button>\
         <button class=\"btn-delete\" data-action=\"delete\" data-id=\"{id}\">🗑️ Delete</button>\
         </div></div>",
        id = card.id,
    ));
    out
}

/// Escape text for element content and quoted attribute values.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(id: i64, title: &str, stars: Option<&str>) -> BookCard {
        BookCard {
            id,
            title: title.to_string(),
            author: "Herbert".to_string(),
            year: 1965,
            stars: stars.map(str::to_string),
        }
    }

    #[test]
    fn empty_state_has_no_cards() {
        let html = render_list(&ListContent::Empty);
        assert!(html.contains("empty-state"));
        assert!(!html.contains("book-item"));
    }

    #[test]
    fn one_item_per_card() {
        let html = render_list(&ListContent::Cards(vec![
            card(1, "Dune", Some("⭐⭐")),
            card(2, "Children of Dune", None),
        ]));
        assert_eq!(html.matches("class=\"book-item\"").count(), 2);
        assert_eq!(html.matches("class=\"meta-item rating\"").count(), 1);
        assert!(html.contains("data-id=\"2\""));
        assert!(html.contains("📅 1965"));
    }

    #[test]
    fn card_sections_in_order() {
        let html = render_card(&card(7, "Dune", Some("⭐")));
        let title = html.find("book-title").unwrap();
        let rating = html.find("meta-item rating").unwrap();
        let edit = html.find("btn-edit").unwrap();
        let delete = html.find("btn-delete").unwrap();
        assert!(title < rating && rating < edit && edit < delete);
        assert_eq!(html.matches("data-id=\"7\"").count(), 3);
        assert!(html.ends_with("</div></div>"));
    }

    #[test]
    fn text_is_escaped() {
        let html = render_list(&ListContent::Cards(vec![card(1, "<b>Bold</b> & co", None)]));
        assert!(html.contains("&lt;b&gt;Bold&lt;/b&gt; &amp; co"));
        assert!(!html.contains("<b>"));
    }

    #[test]
    fn error_panel_is_visible() {
        let html = render_list(&ListContent::Error("down".to_string()));
        assert!(html.contains("error-message"));
        assert!(html.contains("down"));
    }
}
