//! Trailing-edge debouncing of a single value.
//!
//! Values pushed into a [`Debouncer`] are held back until no new value has
//! arrived for the configured window; only the latest one is then published
//! on a `watch` channel. Every push restarts the window.

use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{sleep, Instant};

/// Debounced observable value.
///
/// Must be created inside a Tokio runtime: the timer runs on a spawned task,
/// which is aborted when the debouncer is dropped.
pub struct Debouncer<T> {
    input: mpsc::UnboundedSender<T>,
    output: watch::Receiver<T>,
    task: JoinHandle<()>,
}

impl<T> Debouncer<T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    /// Start with `initial` published and a quiet period of `window`.
    pub fn new(initial: T, window: Duration) -> Self {
        let (input, mut pushes) = mpsc::unbounded_channel::<T>();
        let (publish, output) = watch::channel(initial);

        let task = tokio::spawn(async move {
            let mut pending: Option<T> = None;
            let timer = sleep(window);
            tokio::pin!(timer);

            loop {
                tokio::select! {
                    next = pushes.recv() => match next {
                        Some(value) => {
                            pending = Some(value);
                            timer.as_mut().reset(Instant::now() + window);
                        }
                        None => break,
                    },
                    () = &mut timer, if pending.is_some() => {
                        if let Some(value) = pending.take() {
                            publish.send_if_modified(|current| {
                                if *current == value {
                                    false
                                } else {
                                    *current = value;
                                    true
                                }
                            });
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

    /// Offer a new value; cancels whatever was pending.
    pub fn push(&self, value: T) {
        // Only fails once the task is gone, i.e. while dropping
        let _ = self.input.send(value);
    }

    /// Last published value
    pub fn current(&self) -> T {
        self.output.borrow().clone()
    }

    /// Receiver notified on every publication
    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.output.clone()
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        self.task.abort();
    }
}
