use std::cell::RefCell;
use std::rc::Rc;

use super::{ApiError, TaskApi, route_label};
use crate::model::{Tab, Task, TaskId};

/// One request as seen by [`MemoryTaskApi`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    List(Tab),
    Create(String),
    Toggle(TaskId),
    Delete(TaskId),
}

#[derive(Debug)]
struct Store {
    tasks: Vec<Task>,
    next_id: TaskId,
    calls: Vec<Call>,
    fail_remaining: usize,
    offline: bool,
}

impl Default for Store {
    fn default() -> Self {
        Store {
            tasks: Vec::new(),
            next_id: 1,
            calls: Vec::new(),
            fail_remaining: 0,
            offline: false,
        }
    }
}

/// In-process task service. Clones share the same store, so a test can
/// keep a handle while the controller owns another.
#[derive(Debug, Clone, Default)]
pub struct MemoryTaskApi {
    store: Rc<RefCell<Store>>,
}

impl MemoryTaskApi {
    pub fn new() -> Self {
        MemoryTaskApi::default()
    }

    /// Start from an existing list. New ids continue after the largest one.
    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        let api = MemoryTaskApi::new();
        {
            let mut store = api.store.borrow_mut();
            store.next_id = tasks.iter().map(|t| t.id).max().map_or(1, |max| max + 1);
            store.tasks = tasks;
        }
        api
    }

    /// Fail the next `count` requests with a simulated network error
    pub fn fail_next(&self, count: usize) {
        self.store.borrow_mut().fail_remaining = count;
    }

    /// Fail every request until switched back
    pub fn set_offline(&self, offline: bool) {
        self.store.borrow_mut().offline = offline;
    }

    /// Every request received so far, failed ones included
    pub fn calls(&self) -> Vec<Call> {
        self.store.borrow().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.store.borrow_mut().calls.clear();
    }

    /// All stored tasks, regardless of tab
    pub fn tasks(&self) -> Vec<Task> {
        self.store.borrow().tasks.clone()
    }

    fn begin(&self, call: Call, route: String) -> Result<(), ApiError> {
        let mut store = self.store.borrow_mut();
        store.calls.push(call);
        if store.offline {
            return Err(simulated(route));
        }
        if store.fail_remaining > 0 {
            store.fail_remaining -= 1;
            return Err(simulated(route));
        }
        Ok(())
    }
}

fn simulated(route: String) -> ApiError {
    ApiError::Transport {
        route,
        message: "simulated network error".to_string(),
    }
}

fn not_found(route: String) -> ApiError {
    ApiError::Status { route, status: 404 }
}

impl TaskApi for MemoryTaskApi {
    fn list(&mut self, tab: Tab) -> Result<Vec<Task>, ApiError> {
        let route = route_label("GET", &format!("/tasks?completed={}", tab.completed()));
        self.begin(Call::List(tab), route)?;
        let store = self.store.borrow();
        Ok(store
            .tasks
            .iter()
            .filter(|t| t.completed == tab.completed())
            .cloned()
            .collect())
    }

    fn create(&mut self, text: &str) -> Result<(), ApiError> {
        self.begin(Call::Create(text.to_string()), route_label("POST", "/tasks"))?;
        let mut store = self.store.borrow_mut();
        let id = store.next_id;
        store.next_id += 1;
        store.tasks.push(Task::new(id, text, false));
        Ok(())
    }

    fn toggle(&mut self, id: TaskId) -> Result<(), ApiError> {
        let route = route_label("PUT", &format!("/tasks/{}/toggle", id));
        self.begin(Call::Toggle(id), route.clone())?;
        let mut store = self.store.borrow_mut();
        let task = store
            .tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| not_found(route))?;
        task.completed = !task.completed;
        Ok(())
    }

    fn delete(&mut self, id: TaskId) -> Result<(), ApiError> {
        let route = route_label("DELETE", &format!("/tasks/{}", id));
        self.begin(Call::Delete(id), route.clone())?;
        let mut store = self.store.borrow_mut();
        let before = store.tasks.len();
        store.tasks.retain(|t| t.id != id);
        if store.tasks.len() == before {
            return Err(not_found(route));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn create_assigns_increasing_ids() {
        let mut api = MemoryTaskApi::with_tasks(vec![Task::new(4, "old", true)]);
        api.create("a").unwrap();
        api.create("b").unwrap();
        assert_eq!(
            api.list(Tab::Current).unwrap(),
            vec![Task::new(5, "a", false), Task::new(6, "b", false)]
        );
    }

    #[test]
    fn toggle_keeps_identity() {
        let mut api = MemoryTaskApi::with_tasks(vec![Task::new(1, "buy milk", false)]);
        api.toggle(1).unwrap();
        assert!(api.list(Tab::Current).unwrap().is_empty());
        assert_eq!(
            api.list(Tab::Completed).unwrap(),
            vec![Task::new(1, "buy milk", true)]
        );
    }

    #[test]
    fn unknown_ids_are_404() {
        let mut api = MemoryTaskApi::new();
        assert!(matches!(api.toggle(9), Err(ApiError::Status { status: 404, .. })));
        assert!(matches!(api.delete(9), Err(ApiError::Status { status: 404, .. })));
    }

    #[test]
    fn fail_next_counts_down() {
        let mut api = MemoryTaskApi::new();
        api.fail_next(1);
        assert!(api.create("x").is_err());
        assert!(api.create("x").is_ok());
        assert_eq!(api.calls().len(), 2);
        assert_eq!(api.tasks().len(), 1);
    }

    #[test]
    fn offline_fails_everything_until_restored() {
        let mut api = MemoryTaskApi::with_tasks(vec![Task::new(1, "t", false)]);
        api.set_offline(true);
        assert!(api.list(Tab::Current).is_err());
        assert!(api.delete(1).is_err());
        api.set_offline(false);
        assert_eq!(api.list(Tab::Current).unwrap().len(), 1);
    }

    #[test]
    fn clones_share_state() {
        let handle = MemoryTaskApi::new();
        let mut owned = handle.clone();
        owned.create("shared").unwrap();
        assert_eq!(handle.tasks().len(), 1);
        assert_eq!(handle.calls(), vec![Call::Create("shared".into())]);
    }
}
