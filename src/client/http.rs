use std::time::Duration;

use serde::Serialize;

use super::{ApiError, TaskApi, decode_task_list, route_label};
use crate::model::{Tab, Task, TaskId};

/// Body of `POST /tasks`
#[derive(Serialize)]
struct NewTask<'a> {
    text: &'a str,
    completed: bool,
}

/// Blocking HTTP client for the task service
pub struct HttpTaskApi {
    agent: ureq::Agent,
    base_url: String,
}

impl HttpTaskApi {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(timeout)
            .user_agent(concat!("tectask/", env!("CARGO_PKG_VERSION")))
            .build();
        HttpTaskApi {
            agent,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

fn map_error(route: &str, err: ureq::Error) -> ApiError {
    match err {
        ureq::Error::Status(status, _) => ApiError::Status {
            route: route.to_string(),
            status,
        },
        ureq::Error::Transport(transport) => ApiError::Transport {
            route: route.to_string(),
            message: transport.to_string(),
        },
    }
}

impl TaskApi for HttpTaskApi {
    fn list(&mut self, tab: Tab) -> Result<Vec<Task>, ApiError> {
        let completed = if tab.completed() { "true" } else { "false" };
        let route = route_label("GET", &format!("/tasks?completed={}", completed));
        tracing::debug!(%route, "request");

        let response = self
            .agent
            .get(&self.url("/tasks"))
            .query("completed", completed)
            .call()
            .map_err(|e| map_error(&route, e))?;
        let body: serde_json::Value = response.into_json().map_err(|e| ApiError::Decode {
            route: route.clone(),
            message: e.to_string(),
        })?;
        decode_task_list(&route, body)
    }

    fn create(&mut self, text: &str) -> Result<(), ApiError> {
        let route = route_label("POST", "/tasks");
        tracing::debug!(%route, "request");

        self.agent
            .post(&self.url("/tasks"))
            .send_json(NewTask {
                text,
                completed: false,
            })
            .map_err(|e| map_error(&route, e))?;
        Ok(())
    }

    fn toggle(&mut self, id: TaskId) -> Result<(), ApiError> {
        let path = format!("/tasks/{}/toggle", id);
        let route = route_label("PUT", &path);
        tracing::debug!(%route, "request");

        self.agent
            .put(&self.url(&path))
            .call()
            .map_err(|e| map_error(&route, e))?;
        Ok(())
    }

    fn delete(&mut self, id: TaskId) -> Result<(), ApiError> {
        let path = format!("/tasks/{}", id);
        let route = route_label("DELETE", &path);
        tracing::debug!(%route, "request");

        self.agent
            .delete(&self.url(&path))
            .call()
            .map_err(|e| map_error(&route, e))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_stripped() {
        let api = HttpTaskApi::new("http://localhost:4000/", Duration::from_secs(1));
        assert_eq!(api.base_url(), "http://localhost:4000");
        assert_eq!(api.url("/tasks/3"), "http://localhost:4000/tasks/3");
    }

    #[test]
    fn new_task_body_always_uncompleted() {
        let body = serde_json::to_value(NewTask {
            text: "buy milk",
            completed: false,
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({"text": "buy milk", "completed": false}));
    }

    #[test]
    fn unreachable_server_is_transport_error() {
        // Port 1 on loopback refuses connections on any sane test machine.
        let mut api = HttpTaskApi::new("http://127.0.0.1:1", Duration::from_secs(2));
        let err = api.list(Tab::Current).unwrap_err();
        match err {
            ApiError::Transport { route, .. } => {
                assert_eq!(route, "GET /tasks?completed=false");
            }
            other => panic!("expected transport error, got {:?}", other),
        }
    }
}
