//! Conversation history sidebar state.

use serde::{Deserialize, Serialize};

/// A past conversation as listed in the history sidebar.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    #[serde(rename = "conversation_id")]
    pub id: String,
    pub title: String,
}

impl Conversation {
    #[must_use]
    pub fn new(id: String, title: String) -> Self {
        Self { id, title }
    }
}

/// State of the conversation history list.
#[derive(Debug, Default, Clone)]
pub struct HistoryState {
    conversations: Vec<Conversation>,
    current_id: Option<String>,
}

impl HistoryState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn conversations(&self) -> &[Conversation] {
        &self.conversations
    }

    #[must_use]
    pub fn current_id(&self) -> Option<&str> {
        self.current_id.as_deref()
    }

    /// The currently selected conversation, if any.
    #[must_use]
    pub fn current(&self) -> Option<&Conversation> {
        let id = self.current_id.as_deref()?;
        self.conversations.iter().find(|c| c.id == id)
    }

    /// Replace the list wholesale, e.g. from an initial load.
    pub fn init(&mut self, conversations: Vec<Conversation>) {
        self.conversations = conversations;
    }

    /// Prepend a new conversation; the newest entry sits on top.
    pub fn add(&mut self, conversation: Conversation) {
        self.conversations.insert(0, conversation);
    }

    pub fn set_current(&mut self, id: Option<String>) {
        self.current_id = id;
    }

    /// Append a streamed title chunk to the conversation with `id`.
    /// Unknown ids are a no-op.
    pub fn append_title(&mut self, id: &str, chunk: &str) {
        if let Some(conversation) = self.conversations.iter_mut().find(|c| c.id == id) {
            conversation.title.push_str(chunk);
        }
    }

    pub fn clear(&mut self) {
        self.conversations.clear();
        self.current_id = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn conversation(id: &str, title: &str) -> Conversation {
        Conversation::new(id.to_owned(), title.to_owned())
    }

    #[test]
    fn add_prepends_newest_entry() {
        let mut history = HistoryState::new();
        history.add(conversation("1", "older"));
        history.add(conversation("2", "newer"));

        assert_eq!(history.conversations()[0].id, "2");
        assert_eq!(history.conversations()[1].id, "1");
    }

    #[test]
    fn current_resolves_selected_conversation() {
        let mut history = HistoryState::new();
        history.init(vec![conversation("1", "a"), conversation("2", "b")]);
        history.set_current(Some("2".to_owned()));

        assert_eq!(history.current().map(|c| c.title.as_str()), Some("b"));
    }

    #[test]
    fn current_is_none_when_selection_missing_from_list() {
        let mut history = HistoryState::new();
        history.init(vec![conversation("1", "a")]);
        history.set_current(Some("missing".to_owned()));

        assert!(history.current().is_none());
    }

    #[test]
    fn append_title_extends_matching_entry() {
        let mut history = HistoryState::new();
        history.init(vec![conversation("1", "Rust ")]);

        history.append_title("1", "questions");
        history.append_title("unknown", "ignored");

        assert_eq!(history.conversations()[0].title, "Rust questions");
    }

    #[test]
    fn clear_drops_entries_and_selection() {
        let mut history = HistoryState::new();
        history.add(conversation("1", "a"));
        history.set_current(Some("1".to_owned()));

        history.clear();

        assert!(history.conversations().is_empty());
        assert!(history.current_id().is_none());
    }

    #[test]
    fn conversation_deserializes_wire_field_name() {
        let json = r#"{"conversation_id":"abc","title":"t"}"#;
        let parsed: Conversation = serde_json::from_str(json).expect("deserialization failed");

        assert_eq!(parsed.id, "abc");
    }
}
