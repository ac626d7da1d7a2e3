//! Login credentials for the chat backend.

/// Secret string types that redact values in debug output for security.
pub use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::json;

/// Credentials used to identify the user to the chat backend. When supplied to
/// [`crate::ws::ConnectionManager::connect`], a login payload is sent as the
/// first frame after the connection opens (and again after every reconnect).
#[derive(Clone, Debug, Deserialize)]
pub struct Credentials {
    pub(crate) username: String,
    pub(crate) password: SecretString,
}

impl Credentials {
    #[must_use]
    pub fn new(username: String, password: String) -> Self {
        Self {
            username,
            password: SecretString::from(password),
        }
    }

    /// Returns the username.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns the password.
    #[must_use]
    pub fn password(&self) -> &SecretString {
        &self.password
    }

    /// Serializes the login handshake payload sent immediately after a
    /// connection opens.
    pub(crate) fn login_payload(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&json!({
            "type": "login",
            "username": self.username,
            "password": self.password.expose_secret(),
        }))
    }
}
