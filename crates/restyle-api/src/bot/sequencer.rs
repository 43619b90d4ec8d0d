//! Per-user ordering of event tasks.
//!
//! Every event still runs in its own task, but a user's task first waits for
//! that user's previous task to finish. Events from one user are therefore
//! handled strictly in arrival order while different users run concurrently.

use std::collections::HashMap;
use std::future::Future;

use tokio::task::JoinHandle;

use restyle_types::chat::SessionKey;

#[derive(Debug, Default)]
pub struct EventSequencer {
    tails: HashMap<SessionKey, JoinHandle<()>>,
}

impl EventSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn `work` for `key`, chained after the user's previous task.
    pub fn spawn<F>(&mut self, key: SessionKey, work: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let previous = self.tails.remove(&key);
        let handle = tokio::spawn(async move {
            if let Some(previous) = previous {
                if let Err(e) = previous.await {
                    tracing::error!(error = %e, "previous event task failed");
                }
            }
            work.await;
        });
        self.tails.insert(key, handle);
    }

    /// Forget users whose last task has completed.
    pub fn prune(&mut self) {
        self.tails.retain(|_, handle| !handle.is_finished());
    }

    /// Number of users with a task still queued or running.
    pub fn pending(&self) -> usize {
        self.tails.len()
    }
}
