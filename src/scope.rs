//! Lifetime scope for view subscriptions

use std::future::Future;
use tokio::task::JoinSet;

/// Owns every task a view spawns; dropping the scope aborts them all
#[derive(Default)]
pub struct Scope {
    tasks: JoinSet<()>,
}

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn a task tied to this scope
    pub fn spawn<F>(&mut self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.tasks.spawn(task);
    }

    /// Number of tasks still tracked
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Abort every task and wait for them to stop
    pub async fn close(mut self) {
        self.tasks.shutdown().await;
    }
}
