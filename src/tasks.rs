use std::future::Future;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Handle to a background task.
///
/// Dropping the handle detaches the task; it keeps running to completion.
/// Call [`TaskHandle::abort`] to cancel it explicitly.
#[derive(Debug)]
pub struct TaskHandle {
    join: JoinHandle<()>,
}

impl TaskHandle {
    pub fn spawn<F>(future: F) -> Self
    where
        F: Future<Output = ()> + Send + 'static,
    {
        Self {
            join: tokio::spawn(future),
        }
    }

    pub fn abort(&self) {
        self.join.abort();
    }

    /// Wait for the task. Returns `false` if it was aborted or panicked.
    pub async fn wait(self) -> bool {
        self.join.await.is_ok()
    }
}

/// Run `task` once after `delay`.
pub fn schedule<F>(delay: Duration, task: F) -> TaskHandle
where
    F: FnOnce() + Send + 'static,
{
    TaskHandle::spawn(async move {
        tokio::time::sleep(delay).await;
        task();
    })
}
