//! Knowledge-base panel state.

use serde::{Deserialize, Serialize};

/// A knowledge database available to the chat.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Database {
    pub name: String,
}

impl Database {
    #[must_use]
    pub fn new(name: String) -> Self {
        Self { name }
    }
}

/// A file inside the currently selected database.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    pub name: String,
}

impl FileEntry {
    #[must_use]
    pub fn new(name: String) -> Self {
        Self { name }
    }
}

/// State of the knowledge-base panel.
#[derive(Debug, Default, Clone)]
pub struct KnowledgeState {
    panel_open: bool,
    databases: Vec<Database>,
    current_database: Option<String>,
    files: Vec<FileEntry>,
}

impl KnowledgeState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_panel_open(&self) -> bool {
        self.panel_open
    }

    #[must_use]
    pub fn databases(&self) -> &[Database] {
        &self.databases
    }

    #[must_use]
    pub fn current_database(&self) -> Option<&str> {
        self.current_database.as_deref()
    }

    /// Files of the currently selected database.
    #[must_use]
    pub fn files(&self) -> &[FileEntry] {
        &self.files
    }

    pub fn toggle_panel(&mut self) {
        self.panel_open = !self.panel_open;
    }

    pub fn add_database(&mut self, database: Database) {
        self.databases.push(database);
    }

    /// Remove a database by name. When the removed database was selected, the
    /// selection and its file list are cleared too.
    pub fn remove_database(&mut self, name: &str) {
        self.databases.retain(|db| db.name != name);
        if self.current_database.as_deref() == Some(name) {
            self.current_database = None;
            self.files.clear();
        }
    }

    pub fn set_current_database(&mut self, name: Option<String>) {
        self.current_database = name;
    }

    pub fn set_files(&mut self, files: Vec<FileEntry>) {
        self.files = files;
    }

    pub fn add_file(&mut self, file: FileEntry) {
        self.files.push(file);
    }

    pub fn remove_file(&mut self, name: &str) {
        self.files.retain(|file| file.name != name);
    }

    pub fn clear(&mut self) {
        self.databases.clear();
        self.current_database = None;
        self.files.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_panel_flips_state() {
        let mut knowledge = KnowledgeState::new();
        assert!(!knowledge.is_panel_open());

        knowledge.toggle_panel();
        assert!(knowledge.is_panel_open());

        knowledge.toggle_panel();
        assert!(!knowledge.is_panel_open());
    }

    #[test]
    fn removing_selected_database_clears_selection_and_files() {
        let mut knowledge = KnowledgeState::new();
        knowledge.add_database(Database::new("docs".to_owned()));
        knowledge.set_current_database(Some("docs".to_owned()));
        knowledge.add_file(FileEntry::new("readme.md".to_owned()));

        knowledge.remove_database("docs");

        assert!(knowledge.databases().is_empty());
        assert!(knowledge.current_database().is_none());
        assert!(knowledge.files().is_empty());
    }

    #[test]
    fn removing_other_database_keeps_selection() {
        let mut knowledge = KnowledgeState::new();
        knowledge.add_database(Database::new("docs".to_owned()));
        knowledge.add_database(Database::new("wiki".to_owned()));
        knowledge.set_current_database(Some("docs".to_owned()));
        knowledge.add_file(FileEntry::new("readme.md".to_owned()));

        knowledge.remove_database("wiki");

        assert_eq!(knowledge.current_database(), Some("docs"));
        assert_eq!(knowledge.files().len(), 1);
    }

    #[test]
    fn remove_file_filters_by_name() {
        let mut knowledge = KnowledgeState::new();
        knowledge.add_file(FileEntry::new("a.txt".to_owned()));
        knowledge.add_file(FileEntry::new("b.txt".to_owned()));

        knowledge.remove_file("a.txt");

        assert_eq!(knowledge.files().len(), 1);
        assert_eq!(knowledge.files()[0].name, "b.txt");
    }
}
