//! In-memory page used by the terminal front-end and by tests.
//!
//! Messages are stamped with `tokio::time::Instant`, so a paused test clock
//! controls when timed messages disappear.

use std::collections::{HashMap, VecDeque};
use std::time::Duration;

use tokio::time::Instant;

use crate::form::{BookForm, EditForm};
use crate::html;
use crate::page::{ids, ListContent, MessageSlot, Overlay, Page, StatsDisplay};

#[derive(Debug, Clone)]
pub struct Banner {
    pub text: String,
    /// Position of this message among all messages shown on the page.
    pub seq: u64,
    shown_at: Instant,
    duration: Option<Duration>,
}

impl Banner {
    pub fn is_visible_at(&self, now: Instant) -> bool {
        match self.duration {
            Some(duration) => now < self.shown_at + duration,
            None => true,
        }
    }
}

#[derive(Debug, Default)]
pub struct Document {
    list: ListContent,
    stats: Option<StatsDisplay>,
    add_form: BookForm,
    edit_form: EditForm,
    banners: HashMap<MessageSlot, Banner>,
    shown: u64,
    overlay: Overlay,
    confirm_answers: VecDeque<bool>,
    prompts: Vec<String>,
    alerts: Vec<String>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn list(&self) -> &ListContent {
        &self.list
    }

    pub fn stats(&self) -> Option<&StatsDisplay> {
        self.stats.as_ref()
    }

    pub fn set_add_form(&mut self, form: BookForm) {
        self.add_form = form;
    }

    pub fn add_form_fields(&self) -> &BookForm {
        &self.add_form
    }

    pub fn edit_form_mut(&mut self) -> &mut EditForm {
        &mut self.edit_form
    }

    pub fn overlay(&self) -> Overlay {
        self.overlay
    }

    /// Text of a message that is still visible now.
    pub fn message(&self, slot: MessageSlot) -> Option<&str> {
        let now = Instant::now();
        self.banners
            .get(&slot)
            .filter(|b| b.is_visible_at(now))
            .map(|b| b.text.as_str())
    }

    pub fn banner(&self, slot: MessageSlot) -> Option<&Banner> {
        self.banners.get(&slot)
    }

    /// Answer the next confirmation prompt. Unanswered prompts are declined.
    pub fn queue_confirm(&mut self, answer: bool) {
        self.confirm_answers.push_back(answer);
    }

    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    pub fn alerts(&self) -> &[String] {
        &self.alerts
    }

    pub fn take_alerts(&mut self) -> Vec<String> {
        std::mem::take(&mut self.alerts)
    }

    /// Text content of an element by id, as far as this page models it.
    pub fn text(&self, id: &str) -> Option<String> {
        if let Some(slot) = MessageSlot::ALL.into_iter().find(|slot| slot.id() == id) {
            return self.message(slot).map(str::to_string);
        }
        let stats = self.stats.as_ref()?;
        match id {
            ids::STAT_TOTAL => Some(stats.total.clone()),
            ids::STAT_OLDEST => Some(stats.oldest.clone()),
            ids::STAT_NEWEST => Some(stats.newest.clone()),
            _ => None,
        }
    }

    /// Markup of the list container.
    pub fn inner_html(&self, id: &str) -> Option<String> {
        (id == ids::BOOK_LIST).then(|| html::render_list(&self.list))
    }
}

impl Page for Document {
    fn render_list(&mut self, content: ListContent) {
        self.list = content;
    }

    fn render_stats(&mut self, stats: StatsDisplay) {
        self.stats = Some(stats);
    }

    fn add_form(&self) -> BookForm {
        self.add_form.clone()
    }

    fn reset_add_form(&mut self) {
        self.add_form = BookForm::default();
    }

    fn edit_form(&self) -> EditForm {
        self.edit_form.clone()
    }

    fn fill_edit_form(&mut self, form: EditForm) {
        self.edit_form = form;
    }

    fn show_message(&mut self, slot: MessageSlot, text: String, duration: Option<Duration>) {
        self.shown += 1;
        self.banners.insert(
            slot,
            Banner {
                text,
                seq: self.shown,
                shown_at: Instant::now(),
                duration,
            },
        );
    }

    fn clear_message(&mut self, slot: MessageSlot) {
        self.banners.remove(&slot);
    }

    fn set_overlay(&mut self, overlay: Overlay) {
        self.overlay = overlay;
    }

    fn confirm(&mut self, prompt: &str) -> bool {
        self.prompts.push(prompt.to_string());
        self.confirm_answers.pop_front().unwrap_or(false)
    }

    fn alert(&mut self, text: &str) {
        self.alerts.push(text.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn timed_message_expires() {
        let mut doc = Document::new();
        doc.show_message(
            MessageSlot::AddSuccess,
            "saved".to_string(),
            Some(Duration::from_millis(3000)),
        );
        assert_eq!(doc.text(ids::FORM_SUCCESS).as_deref(), Some("saved"));

        tokio::time::advance(Duration::from_millis(2999)).await;
        assert_eq!(doc.message(MessageSlot::AddSuccess), Some("saved"));

        tokio::time::advance(Duration::from_millis(1)).await;
        assert_eq!(doc.message(MessageSlot::AddSuccess), None);
    }

    #[tokio::test(start_paused = true)]
    async fn untimed_message_stays() {
        let mut doc = Document::new();
        doc.show_message(MessageSlot::EditError, "nope".to_string(), None);
        tokio::time::advance(Duration::from_secs(3600)).await;
        assert_eq!(doc.message(MessageSlot::EditError), Some("nope"));
    }

    #[test]
    fn clear_removes_untimed_message() {
        let mut doc = Document::new();
        doc.show_message(MessageSlot::EditError, "nope".to_string(), None);
        doc.show_message(MessageSlot::AddError, "other".to_string(), None);
        doc.clear_message(MessageSlot::EditError);
        assert_eq!(doc.message(MessageSlot::EditError), None);
        assert!(doc.banner(MessageSlot::EditError).is_none());
        assert_eq!(doc.message(MessageSlot::AddError), Some("other"));
    }

    #[test]
    fn confirm_defaults_to_no() {
        let mut doc = Document::new();
        doc.queue_confirm(true);
        assert!(doc.confirm("first?"));
        assert!(!doc.confirm("second?"));
        assert_eq!(doc.prompts(), ["first?", "second?"]);
    }

    #[test]
    fn stats_text_by_id() {
        let mut doc = Document::new();
        assert_eq!(doc.text(ids::STAT_TOTAL), None);
        doc.render_stats(StatsDisplay {
            total: "2".to_string(),
            oldest: "1951".to_string(),
            newest: "-".to_string(),
        });
        assert_eq!(doc.text(ids::STAT_TOTAL).as_deref(), Some("2"));
        assert_eq!(doc.text(ids::STAT_OLDEST).as_deref(), Some("1951"));
        assert_eq!(doc.text(ids::STAT_NEWEST).as_deref(), Some("-"));
    }
}
