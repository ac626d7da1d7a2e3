//! User session state.

use serde::{Deserialize, Serialize};

/// Profile of the signed-in user.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: String,
    pub username: String,
}

impl UserInfo {
    #[must_use]
    pub fn new(id: String, username: String) -> Self {
        Self { id, username }
    }
}

/// State of the user session.
#[derive(Debug, Default, Clone)]
pub struct UserState {
    logged_in: bool,
    info: Option<UserInfo>,
}

impl UserState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        self.logged_in
    }

    #[must_use]
    pub fn info(&self) -> Option<&UserInfo> {
        self.info.as_ref()
    }

    pub fn set_logged_in(&mut self, logged_in: bool) {
        self.logged_in = logged_in;
    }

    pub fn set_info(&mut self, info: Option<UserInfo>) {
        self.info = info;
    }

    pub fn logout(&mut self) {
        self.logged_in = false;
        self.info = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logout_clears_session() {
        let mut user = UserState::new();
        user.set_logged_in(true);
        user.set_info(Some(UserInfo::new("42".to_owned(), "alice".to_owned())));

        user.logout();

        assert!(!user.is_logged_in());
        assert!(user.info().is_none());
    }
}
