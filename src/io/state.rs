use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

const STATE_FILE: &str = ".state.json";

/// TUI layout remembered between sessions (written to .state.json).
///
/// Only navigation is kept. Drafts, searches and pending deletes belong to
/// a single interaction and are never written.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UiState {
    /// "inventory" or "tickets"
    pub view: String,
    #[serde(default)]
    pub inventory_cursor: usize,
    /// "all", "open", "progress" or "resolved"
    #[serde(default)]
    pub ticket_tab: String,
}

pub fn read_ui_state(data_dir: &Path) -> Option<UiState> {
    let content = fs::read_to_string(data_dir.join(STATE_FILE)).ok()?;
    serde_json::from_str(&content).ok()
}

pub fn write_ui_state(data_dir: &Path, state: &UiState) -> Result<(), std::io::Error> {
    let content = serde_json::to_string_pretty(state)?;
    fs::write(data_dir.join(STATE_FILE), content)
}
