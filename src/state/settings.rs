//! Settings panel state.

use serde::{Deserialize, Serialize};

/// Blur intensity applied while a modal panel is open.
const PANEL_BLUR_INTENSITY: u8 = 5;

/// A configured chat backend server.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Server {
    pub name: String,
    pub url: String,
}

impl Server {
    #[must_use]
    pub fn new(name: String, url: String) -> Self {
        Self { name, url }
    }
}

/// State of the settings panel.
#[derive(Debug, Default, Clone)]
pub struct SettingsState {
    panel_open: bool,
    servers: Vec<Server>,
    blur_intensity: u8,
}

impl SettingsState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_panel_open(&self) -> bool {
        self.panel_open
    }

    #[must_use]
    pub fn servers(&self) -> &[Server] {
        &self.servers
    }

    #[must_use]
    pub fn blur_intensity(&self) -> u8 {
        self.blur_intensity
    }

    pub fn toggle_panel(&mut self) {
        self.panel_open = !self.panel_open;
    }

    pub fn add_server(&mut self, server: Server) {
        self.servers.push(server);
    }

    /// Replace the server list wholesale, e.g. from an initial load.
    pub fn init_servers(&mut self, servers: Vec<Server>) {
        self.servers = servers;
    }

    pub fn clear_servers(&mut self) {
        self.servers.clear();
    }

    pub fn set_blur_intensity(&mut self, intensity: u8) {
        self.blur_intensity = intensity;
    }

    pub fn blur_background(&mut self) {
        self.blur_intensity = PANEL_BLUR_INTENSITY;
    }

    pub fn unblur_background(&mut self) {
        self.blur_intensity = 0;
    }
}
