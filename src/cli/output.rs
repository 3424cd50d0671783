use serde::Serialize;

use crate::model::{Tab, Task, TaskId};

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct TaskJson {
    pub id: TaskId,
    pub text: String,
    pub completed: bool,
}

#[derive(Serialize)]
pub struct TaskListJson {
    pub tab: Tab,
    pub tasks: Vec<TaskJson>,
}

#[derive(Serialize)]
pub struct MutationJson {
    pub ok: bool,
    pub action: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<TaskId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

pub fn task_to_json(task: &Task) -> TaskJson {
    TaskJson {
        id: task.id,
        text: task.text.clone(),
        completed: task.completed,
    }
}

pub fn task_list_json(tab: Tab, tasks: &[Task]) -> TaskListJson {
    TaskListJson {
        tab,
        tasks: tasks.iter().map(task_to_json).collect(),
    }
}

// ---------------------------------------------------------------------------
// Text formatting
// ---------------------------------------------------------------------------

/// One task per line: right-aligned id, checkbox, text
pub fn format_task_line(task: &Task, id_width: usize) -> String {
    let checkbox = if task.completed { "[x]" } else { "[ ]" };
    format!("{:>width$}  {} {}", task.id, checkbox, task.text, width = id_width)
}

/// Text listing for a tab, with a placeholder line when empty
pub fn format_task_listing(tab: Tab, tasks: &[Task]) -> Vec<String> {
    if tasks.is_empty() {
        return vec![format!("(no {} tasks)", tab.as_str())];
    }
    let id_width = tasks
        .iter()
        .map(|t| t.id.to_string().len())
        .max()
        .unwrap_or(1);
    tasks
        .iter()
        .map(|t| format_task_line(t, id_width))
        .collect()
}
