//! Owned UI state stores.
//!
//! Each store is a plain owned struct with a constructor and defined mutating
//! methods; there are no ambient singletons. Hosts construct an [`AppState`]
//! (or individual stores) and pass it wherever state is needed.
//!
//! The only invariant any store upholds is that list membership reflects the
//! last action applied; there is no cross-store coupling.

pub mod chat;
pub mod history;
pub mod knowledge;
pub mod settings;
pub mod toast;
pub mod user;

pub use chat::{ChatMessage, ChatState, Role};
pub use history::{Conversation, HistoryState};
pub use knowledge::{Database, FileEntry, KnowledgeState};
pub use settings::{Server, SettingsState};
pub use toast::{ToastLevel, ToastState};
pub use user::{UserInfo, UserState};

/// Aggregate of all application stores, for dependency injection.
#[non_exhaustive]
#[derive(Debug, Default)]
pub struct AppState {
    pub chat: ChatState,
    pub history: HistoryState,
    pub knowledge: KnowledgeState,
    pub settings: SettingsState,
    pub toast: ToastState,
    pub user: UserState,
}

impl AppState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}
