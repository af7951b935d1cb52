//! Line-oriented front-end over `BookListView` and `Document`.
//!
//! Each command is translated into the page event a browser would raise;
//! after it completes the shell prints the list, the stats and any message
//! that appeared since the previous print.

use std::cell::Cell;
use std::io::{BufRead, Write};

use tokio::time::Instant;

use crate::api::BookApi;
use crate::document::Document;
use crate::error::{Result, ViewError};
use crate::events::PageEvent;
use crate::form::BookForm;
use crate::html::{EMPTY_HINT, EMPTY_TITLE};
use crate::page::{ids, ListContent, MessageSlot, Overlay};
use crate::view::{BookListView, DELETE_PROMPT};

pub const HELP: &str = "\
Commands:
  list              show every book
  search <text>     filter by title (empty text shows every book)
  add               add a book
  edit <id>         edit a book
  delete <id>       delete a book
  stats             refresh the statistics
  html              print the list markup
  help              show this help
  quit              leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    Search(String),
    Add,
    Edit(i64),
    Delete(i64),
    Stats,
    Html,
    Help,
    Quit,
}

impl Command {
    /// Parse one input line. Blank lines yield `None`.
    pub fn parse(line: &str) -> Result<Option<Command>> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }
        let (name, rest) = line.split_once(' ').unwrap_or((line, ""));
        let rest = rest.trim();

        let command = match name.to_lowercase().as_str() {
            "list" | "ls" => Command::List,
            "search" | "find" => Command::Search(rest.to_string()),
            "add" => Command::Add,
            "edit" => Command::Edit(parse_id(line, rest)?),
            "delete" | "rm" => Command::Delete(parse_id(line, rest)?),
            "stats" => Command::Stats,
            "html" => Command::Html,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            _ => return Err(ViewError::command(line, "unknown command, try 'help'")),
        };
        Ok(Some(command))
    }
}

fn parse_id(line: &str, raw: &str) -> Result<i64> {
    raw.parse()
        .map_err(|_| ViewError::command(line, "expected a numeric book id"))
}

pub struct Shell<A> {
    view: BookListView<A, Document>,
    printed: Cell<u64>,
}

impl<A: BookApi> Shell<A> {
    pub fn new(view: BookListView<A, Document>) -> Self {
        Self {
            view,
            printed: Cell::new(0),
        }
    }

    pub fn view(&self) -> &BookListView<A, Document> {
        &self.view
    }

    pub async fn run<R: BufRead, W: Write>(&self, mut input: R, mut out: W) -> Result<()> {
        writeln!(out, "📚 Book library. Type 'help' for commands.")?;
        self.view.handle(PageEvent::Loaded).await;
        self.print_page(&mut out)?;

        loop {
            write!(out, "> ")?;
            out.flush()?;
            let Some(line) = read_line(&mut input)? else {
                break;
            };
            let command = match Command::parse(&line) {
                Ok(Some(command)) => command,
                Ok(None) => continue,
                Err(err) => {
                    writeln!(out, "❌ {err}")?;
                    continue;
                }
            };

            match command {
                Command::Quit => break,
                Command::Help => {
                    writeln!(out, "{HELP}")?;
                    continue;
                }
                Command::Html => {
                    let markup = self
                        .view
                        .page()
                        .inner_html(ids::BOOK_LIST)
                        .unwrap_or_default();
                    writeln!(out, "{markup}")?;
                    continue;
                }
                Command::List => self.view.handle(PageEvent::Loaded).await,
                Command::Search(query) => self.view.handle(PageEvent::SearchInput(query)).await,
                Command::Stats => self.view.load_stats().await,
                Command::Add => {
                    let Some(form) = prompt_form(&mut input, &mut out, None)? else {
                        break;
                    };
                    self.view.page_mut().set_add_form(form);
                    self.view.handle(PageEvent::AddSubmitted).await;
                }
                Command::Edit(id) => {
                    self.view.handle(PageEvent::EditClicked(id)).await;
                    if self.view.page().overlay() == Overlay::Visible {
                        let current = self.view.page_mut().edit_form_mut().fields.clone();
                        let Some(form) = prompt_form(&mut input, &mut out, Some(&current))? else {
                            break;
                        };
                        self.view.page_mut().edit_form_mut().fields = form;
                        self.view.handle(PageEvent::EditSubmitted).await;
                        if self.view.page().overlay() == Overlay::Visible {
                            self.view.handle(PageEvent::EditCancelled).await;
                        }
                    }
                }
                Command::Delete(id) => {
                    let label = format!("{DELETE_PROMPT} [y/N] ");
                    let Some(answer) = prompt(&mut input, &mut out, &label)? else {
                        break;
                    };
                    let confirmed = matches!(answer.trim().to_lowercase().as_str(), "y" | "yes");
                    self.view.page_mut().queue_confirm(confirmed);
                    self.view.handle(PageEvent::DeleteClicked(id)).await;
                }
            }
            self.print_page(&mut out)?;
        }

        writeln!(out, "👋 Goodbye!")?;
        Ok(())
    }

    fn print_page<W: Write>(&self, out: &mut W) -> Result<()> {
        let mut page = self.view.page_mut();

        writeln!(out)?;
        match page.list() {
            ListContent::Empty => {
                writeln!(out, "  📚 {EMPTY_TITLE}. {EMPTY_HINT}")?
            }
            ListContent::Error(message) => writeln!(out, "  ❌ {message}")?,
            ListContent::Cards(cards) => {
                for card in cards {
                    write!(
                        out,
                        "  #{:<4} 📖 {} by {} ({})",
                        card.id, card.title, card.author, card.year
                    )?;
                    if let Some(stars) = &card.stars {
                        write!(out, " {stars}")?;
                    }
                    writeln!(out)?;
                }
            }
        }
        if let Some(stats) = page.stats() {
            writeln!(
                out,
                "  Total: {} | Oldest: {} | Newest: {}",
                stats.total, stats.oldest, stats.newest
            )?;
        }

        let now = Instant::now();
        let mut newest = self.printed.get();
        for slot in MessageSlot::ALL {
            if let Some(banner) = page.banner(slot) {
                if banner.seq > self.printed.get() && banner.is_visible_at(now) {
                    writeln!(out, "  {}", banner.text)?;
                }
                newest = newest.max(banner.seq);
            }
        }
        self.printed.set(newest);

        for alert in page.take_alerts() {
            writeln!(out, "  [!] {alert}")?;
        }
        Ok(())
    }
}

fn read_line(input: &mut impl BufRead) -> Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(|c: char| c == '\r' || c == '\n').to_string()))
}

fn prompt(input: &mut impl BufRead, out: &mut impl Write, label: &str) -> Result<Option<String>> {
    write!(out, "{label}")?;
    out.flush()?;
    read_line(input)
}

/// Ask for the four fields. With `current`, a blank answer keeps the
/// existing value.
fn prompt_form(
    input: &mut impl BufRead,
    out: &mut impl Write,
    current: Option<&BookForm>,
) -> Result<Option<BookForm>> {
    let mut form = current.cloned().unwrap_or_default();
    let fields: [(&str, &mut String); 4] = [
        ("Title", &mut form.title),
        ("Author", &mut form.author),
        ("Year", &mut form.year),
        ("Rating 1-5 (optional)", &mut form.rating),
    ];
    for (label, value) in fields {
        let label = if current.is_some() {
            format!("{label} [{value}]: ")
        } else {
            format!("{label}: ")
        };
        let Some(answer) = prompt(input, out, &label)? else {
            return Ok(None);
        };
        if current.is_none() || !answer.trim().is_empty() {
            *value = answer;
        }
    }
    Ok(Some(form))
}
