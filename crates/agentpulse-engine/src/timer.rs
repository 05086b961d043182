//! Cancellable background task

use std::future::Future;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;

/// A spawned task with a stop channel.
///
/// The task receives the stop receiver and must return once it fires.
pub(crate) struct TimerHandle {
    name: &'static str,
    stop_tx: oneshot::Sender<()>,
    task: JoinHandle<()>,
}

impl TimerHandle {
    pub(crate) fn spawn<F, Fut>(name: &'static str, body: F) -> Self
    where
        F: FnOnce(oneshot::Receiver<()>) -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let (stop_tx, stop_rx) = oneshot::channel();
        let task = tokio::spawn(body(stop_rx));
        Self {
            name,
            stop_tx,
            task,
        }
    }

    /// Signal the task and wait for it to finish.
    pub(crate) async fn cancel(self) {
        let _ = self.stop_tx.send(());
        if let Err(e) = self.task.await {
            tracing::warn!(timer = self.name, "timer task ended abnormally: {}", e);
        } else {
            tracing::debug!(timer = self.name, "timer stopped");
        }
    }
}
