//! Debouncing of rapid successive inputs.

use std::time::Duration;
use tokio::{sync::mpsc, task::JoinHandle};

/// Search input quiet period, roughly the median human reaction time
pub const SEARCH_DEBOUNCE_DELAY: Duration = Duration::from_millis(275);

/// Emits only the last value pushed before a quiet period of `delay`.
///
/// Every push restarts the timer. When the input side is closed a pending
/// value is still emitted.
pub struct Debouncer<T> {
    input: mpsc::UnboundedSender<T>,
    output: mpsc::UnboundedReceiver<T>,
    task: JoinHandle<()>,
}

impl<T: Send + 'static> Debouncer<T> {
    /// Spawn the debouncing task on the current runtime
    pub fn new(delay: Duration) -> Self {
        let (input, mut inbox) = mpsc::unbounded_channel::<T>();
        let (outbox, output) = mpsc::unbounded_channel::<T>();

        let task = tokio::spawn(async move {
            let mut pending: Option<T> = None;
            loop {
                if pending.is_none() {
                    match inbox.recv().await {
                        Some(value) => pending = Some(value),
                        None => break,
                    }
                    continue;
                }

                tokio::select! {
                    next = inbox.recv() => match next {
                        Some(value) => pending = Some(value),
                        None => {
                            if let Some(value) = pending.take() {
                                let _ = outbox.send(value);
                            }
                            break;
                        }
                    },
                    _ = tokio::time::sleep(delay) => {
                        if let Some(value) = pending.take()
                            && outbox.send(value).is_err()
                        {
                            break;
                        }
                    }
                }
            }
        });

        Self {
            input,
            output,
            task,
        }
    }

    /// Feed a new value, restarting the quiet period
    pub fn push(&self, value: T) {
        let _ = self.input.send(value);
    }

    /// Wait for the next settled value
    pub async fn next(&mut self) -> Option<T> {
        self.output.recv().await
    }

    /// Settled value, if one is ready
    pub fn try_next(&mut self) -> Option<T> {
        self.output.try_recv().ok()
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        self.task.abort();
    }
}
