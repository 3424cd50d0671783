//! The task list view-model as a pure state machine.
//!
//! [`update`] applies a [`Msg`] to the [`ViewState`] and returns the
//! [`Effect`]s the caller must perform. Nothing here touches the network;
//! outcomes of effects come back in as `Fetched`/`Created`/`Toggled`/
//! `Deleted` messages. See [`crate::ops::sync`] for the runner.

use std::fmt;

use crate::client::ApiError;
use crate::model::{Tab, Task, TaskId};

/// Everything the task list view shows
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    /// Tasks of the last successful fetch, in server order
    pub tasks: Vec<Task>,
    /// Contents of the new-task input
    pub pending_text: String,
    pub active_tab: Tab,
}

impl ViewState {
    pub fn new(active_tab: Tab) -> Self {
        ViewState {
            active_tab,
            ..Default::default()
        }
    }

    /// Whether submitting now would issue a create request
    pub fn can_submit(&self) -> bool {
        !self.pending_text.trim().is_empty()
    }
}

/// Input events and effect outcomes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// The view was opened
    Mount,
    SelectTab(Tab),
    /// Refetch the active tab
    Refresh,
    /// Replace the new-task input text
    SetInput(String),
    SubmitNewTask,
    ToggleTask(TaskId),
    DeleteTask(TaskId),

    Fetched {
        tab: Tab,
        result: Result<Vec<Task>, ApiError>,
    },
    Created(Result<(), ApiError>),
    Toggled {
        id: TaskId,
        result: Result<(), ApiError>,
    },
    Deleted {
        id: TaskId,
        result: Result<(), ApiError>,
    },
}

/// Which request a reported failure belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Fetch(Tab),
    Create,
    Toggle(TaskId),
    Delete(TaskId),
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Fetch(tab) => write!(f, "fetch {} tasks", tab),
            Action::Create => f.write_str("create task"),
            Action::Toggle(id) => write!(f, "toggle task {}", id),
            Action::Delete(id) => write!(f, "delete task {}", id),
        }
    }
}

/// Work requested by [`update`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Fetch the full list for a tab
    Fetch(Tab),
    Create { text: String },
    Toggle(TaskId),
    Delete(TaskId),
    /// Log a failed request; the view keeps its last-known state
    ReportFailure { action: Action, error: ApiError },
}

/// Apply a message to the view state.
///
/// Fetch outcomes replace `tasks` no matter which tab they were issued
/// for: overlapping fetches are not sequenced, the last one to arrive wins.
pub fn update(state: &mut ViewState, msg: Msg) -> Vec<Effect> {
    match msg {
        Msg::Mount | Msg::Refresh => vec![Effect::Fetch(state.active_tab)],
        Msg::SelectTab(tab) => {
            state.active_tab = tab;
            vec![Effect::Fetch(tab)]
        }
        Msg::SetInput(text) => {
            state.pending_text = text;
            Vec::new()
        }
        Msg::SubmitNewTask => {
            if !state.can_submit() {
                return Vec::new();
            }
            vec![Effect::Create {
                text: state.pending_text.trim().to_string(),
            }]
        }
        Msg::ToggleTask(id) => vec![Effect::Toggle(id)],
        Msg::DeleteTask(id) => vec![Effect::Delete(id)],

        Msg::Fetched { tab, result } => match result {
            Ok(tasks) => {
                state.tasks = tasks;
                Vec::new()
            }
            Err(error) => vec![failure(Action::Fetch(tab), error)],
        },
        Msg::Created(result) => match result {
            Ok(()) => {
                state.pending_text.clear();
                vec![Effect::Fetch(state.active_tab)]
            }
            Err(error) => vec![failure(Action::Create, error)],
        },
        Msg::Toggled { id, result } => confirm(state, Action::Toggle(id), result),
        Msg::Deleted { id, result } => confirm(state, Action::Delete(id), result),
    }
}

fn confirm(state: &ViewState, action: Action, result: Result<(), ApiError>) -> Vec<Effect> {
    match result {
        Ok(()) => vec![Effect::Fetch(state.active_tab)],
        Err(error) => vec![failure(action, error)],
    }
}

fn failure(action: Action, error: ApiError) -> Effect {
    Effect::ReportFailure { action, error }
}
