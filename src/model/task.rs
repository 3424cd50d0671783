use std::fmt;

use serde::{Deserialize, Serialize};

/// Server-assigned task identifier
pub type TaskId = u64;

/// A task as the remote service stores it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub text: String,
    pub completed: bool,
}

impl Task {
    pub fn new(id: TaskId, text: impl Into<String>, completed: bool) -> Self {
        Task {
            id,
            text: text.into(),
            completed,
        }
    }
}

/// Which subset of tasks is displayed and fetched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    #[default]
    Current,
    Completed,
}

impl Tab {
    pub const ALL: [Tab; 2] = [Tab::Current, Tab::Completed];

    pub fn for_completed(completed: bool) -> Self {
        if completed { Tab::Completed } else { Tab::Current }
    }

    /// Value of the `completed` query parameter for this tab
    pub fn completed(self) -> bool {
        matches!(self, Tab::Completed)
    }

    /// The other tab
    pub fn other(self) -> Self {
        match self {
            Tab::Current => Tab::Completed,
            Tab::Completed => Tab::Current,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Tab::Current => "Current Tasks",
            Tab::Completed => "Completed Tasks",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Tab::Current => "current",
            Tab::Completed => "completed",
        }
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
