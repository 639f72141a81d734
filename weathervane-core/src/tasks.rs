//! Keyed one-shot async tasks
//!
//! Every task resolves into exactly one action, which is sent back to the
//! runtime's action channel. Tasks are registered under a [`TaskKey`]; spawning
//! under a key that is still in flight aborts the older task first, so only the
//! most recent request for a key can report back.
//!
//! ```ignore
//! tasks.spawn("weather", async move {
//!     match api.fetch(&city).await {
//!         Ok(result) => Action::WeatherDidLoad { request_id, result },
//!         Err(e) => Action::WeatherDidError { request_id, message: e.to_string() },
//!     }
//! });
//! ```

use std::collections::HashMap;
use std::future::Future;

use tokio::sync::mpsc;
use tokio::task::AbortHandle;

use crate::Action;

/// Name under which a task is registered
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct TaskKey(String);

impl TaskKey {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl From<&'static str> for TaskKey {
    fn from(s: &'static str) -> Self {
        Self::new(s)
    }
}

impl From<String> for TaskKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Registry of in-flight tasks
pub struct TaskManager<A> {
    tasks: HashMap<TaskKey, AbortHandle>,
    action_tx: mpsc::UnboundedSender<A>,
    spawned: u64,
    superseded: u64,
}

impl<A> TaskManager<A>
where
    A: Action,
{
    /// `action_tx` receives the action each task resolves to.
    pub fn new(action_tx: mpsc::UnboundedSender<A>) -> Self {
        Self {
            tasks: HashMap::new(),
            action_tx,
            spawned: 0,
            superseded: 0,
        }
    }

    /// Spawn `future` under `key`, aborting any unfinished task with that key.
    ///
    /// An aborted task never sends its action. Must be called from within a
    /// tokio runtime.
    pub fn spawn<F>(&mut self, key: impl Into<TaskKey>, future: F) -> &mut Self
    where
        F: Future<Output = A> + Send + 'static,
    {
        let key = key.into();
        if self.abort(&key) {
            self.superseded += 1;
            tracing::debug!(task = key.name(), "superseded in-flight task");
        }

        let tx = self.action_tx.clone();
        let handle = tokio::spawn(async move {
            let action = future.await;
            // Receiver gone means the runtime is shutting down
            let _ = tx.send(action);
        });

        self.spawned += 1;
        tracing::trace!(task = key.name(), "task spawned");
        self.tasks.insert(key, handle.abort_handle());
        self
    }

    /// Abort the task registered under `key`, if any.
    pub fn cancel(&mut self, key: &TaskKey) {
        if self.abort(key) {
            tracing::debug!(task = key.name(), "task cancelled");
        }
    }

    /// Abort every registered task.
    pub fn cancel_all(&mut self) {
        for (_, handle) in self.tasks.drain() {
            handle.abort();
        }
    }

    /// Whether a task under `key` is registered and has not finished yet.
    pub fn is_running(&self, key: &TaskKey) -> bool {
        self.tasks
            .get(key)
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Number of registered tasks, finished or not.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Total number of tasks spawned over the manager's lifetime.
    pub fn spawned(&self) -> u64 {
        self.spawned
    }

    /// How many spawns replaced a task that was still running.
    pub fn superseded(&self) -> u64 {
        self.superseded
    }

    /// Returns true when an unfinished task was aborted.
    fn abort(&mut self, key: &TaskKey) -> bool {
        match self.tasks.remove(key) {
            Some(handle) => {
                let was_running = !handle.is_finished();
                handle.abort();
                was_running
            }
            None => false,
        }
    }
}

impl<A> Drop for TaskManager<A> {
    fn drop(&mut self) {
        for (_, handle) in self.tasks.drain() {
            handle.abort();
        }
    }
}
