//! Toast notification state.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Severity of a toast notification.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToastLevel {
    #[default]
    Error,
    Info,
    Success,
}

/// State of the single toast slot. Showing a new toast replaces the current
/// one.
#[derive(Debug, Default, Clone)]
pub struct ToastState {
    visible: bool,
    text: String,
    level: ToastLevel,
}

impl ToastState {
    /// Recommended delay before the host hides a toast. Dismissal is the
    /// host's concern; the store only tracks visibility.
    pub const AUTO_DISMISS: Duration = Duration::from_secs(3);

    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn level(&self) -> ToastLevel {
        self.level
    }

    pub fn show(&mut self, text: String, level: ToastLevel) {
        self.text = text;
        self.level = level;
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }
}
