pub mod data_loader;

use std::collections::HashMap;
use std::future::Future;
use tokio::task::JoinHandle;

/// Tracks spawned session tasks by name so a newer request supersedes an
/// older one for the same data.
pub struct BackgroundTaskManager {
    tasks: HashMap<String, JoinHandle<()>>,
}

impl BackgroundTaskManager {
    pub fn new() -> Self {
        Self {
            tasks: HashMap::new(),
        }
    }

    /// Spawn a task under `task_id`, aborting any task still running under
    /// the same id.
    pub fn spawn_load_task<F>(&mut self, task_id: impl Into<String>, future: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let task_id = task_id.into();
        self.tasks.retain(|_, handle| !handle.is_finished());

        if let Some(handle) = self.tasks.remove(&task_id) {
            tracing::debug!("Superseding running task {}", task_id);
            handle.abort();
        }

        self.tasks.insert(task_id, tokio::spawn(future));
    }

    /// Abort every task whose id starts with `prefix` (e.g. all insights loads).
    pub fn cancel_matching(&mut self, prefix: &str) {
        self.tasks.retain(|task_id, handle| {
            let matched = task_id.starts_with(prefix);
            if matched {
                handle.abort();
            }
            !matched
        });
    }

    /// Cancel all running tasks (used on logout and shutdown)
    pub fn cancel_all(&mut self) {
        for (_, handle) in self.tasks.drain() {
            handle.abort();
        }
    }

    pub fn running(&self) -> usize {
        self.tasks
            .values()
            .filter(|handle| !handle.is_finished())
            .count()
    }
}

impl Default for BackgroundTaskManager {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for BackgroundTaskManager {
    fn drop(&mut self) {
        self.cancel_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_same_id_supersedes_running_task() {
        let mut manager = BackgroundTaskManager::new();
        manager.spawn_load_task("roster", std::future::pending());
        manager.spawn_load_task("roster", std::future::pending());

        assert_eq!(manager.running(), 1);
    }

    #[tokio::test]
    async fn test_cancel_matching_prefix() {
        let mut manager = BackgroundTaskManager::new();
        manager.spawn_load_task("insights_1", std::future::pending());
        manager.spawn_load_task("insights_2", std::future::pending());
        manager.spawn_load_task("roster", std::future::pending());

        manager.cancel_matching("insights_");

        assert_eq!(manager.running(), 1);
        manager.cancel_all();
        assert_eq!(manager.running(), 0);
    }
}
