//! Active chat transcript state.

use serde::{Deserialize, Serialize};

/// Author of a chat message.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
    /// Intermediate tool-call output emitted while the assistant is working;
    /// replaced by the final assistant message when it arrives
    AssistantTool,
}

/// A single message in the transcript.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    #[must_use]
    pub fn new(role: Role, content: String) -> Self {
        Self { role, content }
    }
}

/// State of the active chat view.
#[derive(Debug, Default, Clone)]
pub struct ChatState {
    active: bool,
    new_chat_enabled: bool,
    messages: Vec<ChatMessage>,
    current_index: Option<usize>,
}

impl ChatState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    #[must_use]
    pub fn is_new_chat_enabled(&self) -> bool {
        self.new_chat_enabled
    }

    #[must_use]
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    #[must_use]
    pub fn current_index(&self) -> Option<usize> {
        self.current_index
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    pub fn set_new_chat_enabled(&mut self, enabled: bool) {
        self.new_chat_enabled = enabled;
    }

    pub fn set_current_index(&mut self, index: Option<usize>) {
        self.current_index = index;
    }

    /// Replace the transcript wholesale, e.g. when loading a conversation
    /// from history.
    pub fn init_messages(&mut self, messages: Vec<ChatMessage>) {
        self.messages = messages;
    }

    pub fn push_user_message(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    /// Append an intermediate tool-call message to the transcript.
    pub fn push_tool_message(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    /// Merge an assistant message into the transcript.
    ///
    /// Depending on the trailing message this either starts a new assistant
    /// turn (after a user message or on an empty transcript), replaces a
    /// pending tool message, or concatenates streamed content onto the
    /// assistant message already in progress.
    pub fn append_assistant_message(&mut self, message: ChatMessage) {
        match self.messages.last_mut() {
            None | Some(ChatMessage { role: Role::User, .. }) => self.messages.push(message),
            Some(ChatMessage {
                role: Role::AssistantTool,
                ..
            }) => {
                self.messages.pop();
                self.messages.push(message);
            }
            Some(last) => last.content.push_str(&message.content),
        }
    }

    pub fn clear_messages(&mut self) {
        self.messages.clear();
    }

    /// Undo the chat: deactivate the view and drop the transcript.
    pub fn reset(&mut self) {
        self.active = false;
        self.new_chat_enabled = false;
        self.clear_messages();
    }

    /// Content of the most recent user message, if any.
    #[must_use]
    pub fn current_question(&self) -> Option<&str> {
        self.messages
            .iter()
            .rev()
            .find(|m| m.role == Role::User)
            .map(|m| m.content.as_str())
    }
}
