use std::future::Future;
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::task::JoinHandle;
use tracing::info;

/// Controls background course-content downloads.
#[async_trait]
pub trait DownloadWorkerController: Send + Sync {
    /// Stop every outstanding download.
    async fn cancel_work(&self);
}

/// Tracks spawned download tasks so they can be aborted together.
#[derive(Default)]
pub struct DownloadQueue {
    tasks: Mutex<Vec<JoinHandle<()>>>,
}

impl DownloadQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn a download on the current runtime and track it.
    pub fn enqueue<F>(&self, download: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let handle = tokio::spawn(download);
        if let Ok(mut tasks) = self.tasks.lock() {
            tasks.retain(|task| !task.is_finished());
            tasks.push(handle);
        }
    }

    /// Number of downloads still running.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.tasks
            .lock()
            .map(|tasks| tasks.iter().filter(|task| !task.is_finished()).count())
            .unwrap_or(0)
    }
}

#[async_trait]
impl DownloadWorkerController for DownloadQueue {
    async fn cancel_work(&self) {
        let drained: Vec<JoinHandle<()>> = match self.tasks.lock() {
            Ok(mut tasks) => tasks.drain(..).collect(),
            Err(poisoned) => poisoned.into_inner().drain(..).collect(),
        };
        info!(count = drained.len(), "cancelling downloads");
        for task in drained {
            task.abort();
            // Wait for the abort to land so callers observe a quiet queue.
            let _ = task.await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn cancel_work_aborts_running_downloads() {
        let queue = DownloadQueue::new();
        queue.enqueue(async {
            tokio::time::sleep(Duration::from_secs(60)).await;
        });
        queue.enqueue(async {
            tokio::time::sleep(Duration::from_secs(60)).await;
        });
        assert_eq!(queue.pending(), 2);

        queue.cancel_work().await;
        assert_eq!(queue.pending(), 0);
    }
}
