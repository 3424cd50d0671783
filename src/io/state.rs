use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::model::Tab;

/// Persisted TUI state (written to state.json)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UiState {
    /// Which tab was showing when the TUI last exited
    #[serde(default)]
    pub active_tab: Tab,
}

/// Read state.json from the given directory
pub fn read_ui_state(dir: &Path) -> Option<UiState> {
    let path = dir.join("state.json");
    let content = fs::read_to_string(&path).ok()?;
    serde_json::from_str(&content).ok()
}

/// Write state.json into the given directory, creating it if needed
pub fn write_ui_state(dir: &Path, state: &UiState) -> Result<(), std::io::Error> {
    fs::create_dir_all(dir)?;
    let path = dir.join("state.json");
    let content = serde_json::to_string_pretty(state)?;
    fs::write(&path, content)
}
