//! Access to the remote task service.
//!
//! [`TaskApi`] is the seam between the view-model's effect runner and the
//! network. [`HttpTaskApi`] talks to the real service; [`MemoryTaskApi`]
//! keeps tasks in process and can simulate failures.

pub mod http;
pub mod memory;

pub use http::HttpTaskApi;
pub use memory::{Call, MemoryTaskApi};

use crate::model::{Tab, Task, TaskId};

/// A failed call to the task service
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The request never completed (connection refused, DNS, timeout)
    #[error("{route}: {message}")]
    Transport { route: String, message: String },
    /// The server answered with a non-success status
    #[error("{route}: server returned HTTP {status}")]
    Status { route: String, status: u16 },
    /// The response body was not what the client expected
    #[error("{route}: could not decode response: {message}")]
    Decode { route: String, message: String },
}

/// The server contract the client is written against:
///
/// - `GET /tasks?completed={true|false}`
/// - `POST /tasks` with `{"text", "completed": false}`
/// - `PUT /tasks/{id}/toggle`
/// - `DELETE /tasks/{id}`
pub trait TaskApi {
    /// List the tasks belonging to a tab, in server order
    fn list(&mut self, tab: Tab) -> Result<Vec<Task>, ApiError>;
    /// Create an uncompleted task
    fn create(&mut self, text: &str) -> Result<(), ApiError>;
    /// Flip a task's completion flag in a single update
    fn toggle(&mut self, id: TaskId) -> Result<(), ApiError>;
    fn delete(&mut self, id: TaskId) -> Result<(), ApiError>;
}

impl<T: TaskApi + ?Sized> TaskApi for Box<T> {
    fn list(&mut self, tab: Tab) -> Result<Vec<Task>, ApiError> {
        (**self).list(tab)
    }

    fn create(&mut self, text: &str) -> Result<(), ApiError> {
        (**self).create(text)
    }

    fn toggle(&mut self, id: TaskId) -> Result<(), ApiError> {
        (**self).toggle(id)
    }

    fn delete(&mut self, id: TaskId) -> Result<(), ApiError> {
        (**self).delete(id)
    }
}

/// Human-readable route label used in errors and logs
pub fn route_label(method: &str, path: &str) -> String {
    format!("{} {}", method, path)
}

/// Decode a list response. Anything other than a JSON array counts as an
/// empty list; an array containing malformed tasks is a decode error.
pub fn decode_task_list(route: &str, body: serde_json::Value) -> Result<Vec<Task>, ApiError> {
    if !body.is_array() {
        tracing::warn!(route, "list response is not an array, treating as empty");
        return Ok(Vec::new());
    }
    serde_json::from_value(body).map_err(|e| ApiError::Decode {
        route: route.to_string(),
        message: e.to_string(),
    })
}
