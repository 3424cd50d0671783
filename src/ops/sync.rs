use std::collections::VecDeque;

use crate::client::TaskApi;
use crate::model::Tab;
use crate::ops::view_ops::{Effect, Msg, ViewState, update};

/// Owns the view state and performs its effects against a [`TaskApi`].
///
/// Each dispatched message runs its whole request chain on the calling
/// thread before returning: the user action, then any refetch it triggers.
pub struct Controller<A: TaskApi> {
    api: A,
    state: ViewState,
}

impl<A: TaskApi> Controller<A> {
    pub fn new(api: A, active_tab: Tab) -> Self {
        Controller {
            api,
            state: ViewState::new(active_tab),
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn dispatch(&mut self, msg: Msg) {
        let mut queue: VecDeque<Effect> = update(&mut self.state, msg).into();
        while let Some(effect) = queue.pop_front() {
            if let Some(outcome) = self.perform(effect) {
                queue.extend(update(&mut self.state, outcome));
            }
        }
    }

    fn perform(&mut self, effect: Effect) -> Option<Msg> {
        match effect {
            Effect::Fetch(tab) => {
                let result = self.api.list(tab);
                if let Ok(tasks) = &result {
                    tracing::debug!(%tab, count = tasks.len(), "fetched tasks");
                }
                Some(Msg::Fetched { tab, result })
            }
            Effect::Create { text } => {
                Some(Msg::Created(self.api.create(&text)))
            }
            Effect::Toggle(id) => {
                Some(Msg::Toggled {
                    id,
                    result: self.api.toggle(id),
                })
            }
            Effect::Delete(id) => {
                Some(Msg::Deleted {
                    id,
                    result: self.api.delete(id),
                })
            }
            Effect::ReportFailure { action, error } => {
                tracing::warn!(%action, %error, "request failed");
                None
            }
        }
    }
}
