use crate::assistant::{self, gate, ChatMessage};
use crate::catalog::{CatalogStatus, Product};
use crate::filter::{self, Debouncer, FilterState};
use crate::selection::SelectionStore;
use crate::store;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranscriptEntry {
    User(String),
    Assistant(String),
    Notice(String),
    Error(String),
}

/// Single owner of all mutable app state: catalog status, filter, selection,
/// conversation history, and the display transcript. The UI layer only calls
/// the operations below, so everything here is testable without a window.
pub struct RoutineState {
    data_dir: PathBuf,
    catalog: CatalogStatus,
    filter: FilterState,
    debouncer: Debouncer,
    selection: SelectionStore,
    history: Vec<ChatMessage>,
    transcript: Vec<TranscriptEntry>,
    visible: Vec<Product>,
    awaiting_reply: bool,
}

impl RoutineState {
    pub fn new(data_dir: PathBuf) -> Self {
        let (persisted, warning) = store::load_selection(&data_dir);
        if let Some(warning) = warning {
            tracing::warn!("{warning}; starting with an empty selection");
        }

        Self {
            data_dir,
            catalog: CatalogStatus::Loading,
            filter: FilterState::default(),
            debouncer: Debouncer::default(),
            selection: SelectionStore::from_products(persisted),
            history: Vec::new(),
            transcript: Vec::new(),
            visible: Vec::new(),
            awaiting_reply: false,
        }
    }

    pub fn catalog(&self) -> &CatalogStatus {
        &self.catalog
    }

    pub fn set_catalog(&mut self, result: Result<Vec<Product>, String>) {
        self.catalog = match result {
            Ok(products) => CatalogStatus::Ready(products),
            Err(message) => CatalogStatus::Failed(message),
        };
        self.refresh_visible();
    }

    /// Distinct category names, in catalog order, for the category picker.
    pub fn categories(&self) -> Vec<String> {
        let CatalogStatus::Ready(products) = &self.catalog else {
            return Vec::new();
        };
        let mut categories: Vec<String> = Vec::new();
        for product in products {
            if !categories
                .iter()
                .any(|known| known.eq_ignore_ascii_case(&product.category))
            {
                categories.push(product.category.clone());
            }
        }
        categories
    }

    pub fn visible_products(&self) -> &[Product] {
        &self.visible
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    // Search input is debounced; the value only lands in the filter once
    // poll_search observes the quiescence deadline.
    pub fn search_input(&mut self, raw: &str, now: Instant) {
        self.debouncer.schedule(raw.to_string(), now);
    }

    pub fn poll_search(&mut self, now: Instant) -> bool {
        let Some(text) = self.debouncer.poll(now) else {
            return false;
        };
        self.filter.set_search(&text);
        self.refresh_visible();
        true
    }

    pub fn next_search_deadline(&self) -> Option<Instant> {
        self.debouncer.next_deadline()
    }

    pub fn set_category(&mut self, category: Option<String>) {
        self.filter.set_category(category);
        self.refresh_visible();
    }

    pub fn clear_filters(&mut self) {
        self.debouncer.cancel();
        self.filter.clear();
        self.refresh_visible();
    }

    pub fn selection(&self) -> &[Product] {
        self.selection.products()
    }

    pub fn is_selected(&self, product_id: u32) -> bool {
        self.selection.contains(product_id)
    }

    pub fn toggle_selection(&mut self, product_id: u32) {
        let CatalogStatus::Ready(products) = &self.catalog else {
            return;
        };
        let Some(product) = products.iter().find(|product| product.id == product_id) else {
            return;
        };
        let product = product.clone();
        self.selection.toggle(&product);
        self.persist_selection();
    }

    pub fn remove_selection(&mut self, product_id: u32) {
        self.selection.remove(product_id);
        self.persist_selection();
    }

    /// Clears the selection together with the conversation it contextualized.
    pub fn clear_selection(&mut self) {
        self.selection.clear();
        self.history.clear();
        self.transcript.clear();
        self.persist_selection();
    }

    pub fn transcript(&self) -> &[TranscriptEntry] {
        &self.transcript
    }

    pub fn history(&self) -> &[ChatMessage] {
        &self.history
    }

    pub fn awaiting_reply(&self) -> bool {
        self.awaiting_reply
    }

    /// Queues a routine request for the current selection. Returns the wire
    /// messages to send, or None when nothing should be dispatched.
    pub fn request_routine(&mut self) -> Option<Vec<ChatMessage>> {
        if self.awaiting_reply {
            return None;
        }
        if self.selection.is_empty() {
            self.transcript.push(TranscriptEntry::Notice(
                "Select at least one product to generate a routine.".to_string(),
            ));
            return None;
        }

        let prompt = assistant::routine_prompt(self.selection.products());
        self.transcript.push(TranscriptEntry::User(prompt.clone()));
        self.history.push(ChatMessage::user(prompt));
        self.awaiting_reply = true;
        Some(self.outbound_messages())
    }

    /// Applies the topic gate and queues a follow-up question. Rejected
    /// questions get the canned redirect locally and never produce messages.
    pub fn ask(&mut self, question: &str) -> Option<Vec<ChatMessage>> {
        let question = question.trim();
        if question.is_empty() || self.awaiting_reply {
            return None;
        }

        self.transcript
            .push(TranscriptEntry::User(question.to_string()));

        if !gate::is_on_topic(question, self.history.len()) {
            self.transcript
                .push(TranscriptEntry::Assistant(gate::REDIRECT_REPLY.to_string()));
            return None;
        }

        self.history.push(ChatMessage::user(question));
        self.awaiting_reply = true;
        Some(self.outbound_messages())
    }

    pub fn assistant_replied(&mut self, reply: String) {
        self.transcript
            .push(TranscriptEntry::Assistant(reply.clone()));
        self.history.push(ChatMessage::assistant(reply));
        self.awaiting_reply = false;
    }

    /// Failures surface inline and always clear the in-flight flag so no
    /// loading indicator can outlive the request.
    pub fn assistant_failed(&mut self, message: String) {
        self.transcript.push(TranscriptEntry::Error(message));
        self.awaiting_reply = false;
    }

    fn outbound_messages(&self) -> Vec<ChatMessage> {
        let mut messages = vec![assistant::system_preamble(self.selection.products())];
        messages.extend(self.history.iter().cloned());
        messages
    }

    fn refresh_visible(&mut self) {
        self.visible = match &self.catalog {
            CatalogStatus::Ready(products) => filter::filter(products, &self.filter),
            _ => Vec::new(),
        };
    }

    fn persist_selection(&mut self) {
        if let Err(err) = store::save_selection(&self.data_dir, self.selection.products()) {
            tracing::warn!(error = %err, "failed to persist selection");
        }
    }
}
