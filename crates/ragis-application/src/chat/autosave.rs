//! Resettable one-shot timer backing the debounced autosave.

use std::future::Future;
use std::sync::Mutex;
use std::time::Duration;

use tokio::task::JoinHandle;

/// Quiet period a burst of transcript mutations must outlast before the
/// durable write happens.
pub(crate) const SAVE_DEBOUNCE: Duration = Duration::from_millis(500);

/// A cancelable, resettable delay timer.
///
/// Scheduling while a timer is pending aborts the pending one, so only the
/// action scheduled after the last burst runs. Dropping the debouncer
/// drops any pending action (bounded loss, at most one delay window).
pub(crate) struct Debouncer {
    timer: Mutex<Option<JoinHandle<()>>>,
}

impl Debouncer {
    pub fn new() -> Self {
        Self {
            timer: Mutex::new(None),
        }
    }

    /// Schedules `action` to run after `delay`, replacing any pending timer.
    pub fn schedule<F>(&self, delay: Duration, action: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            action.await;
        });

        let mut guard = self.timer.lock().unwrap();
        if let Some(pending) = guard.replace(handle) {
            pending.abort();
        }
    }

    /// Aborts a pending timer, if any.
    pub fn cancel(&self) {
        if let Some(pending) = self.timer.lock().unwrap().take() {
            pending.abort();
        }
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test(start_paused = true)]
    async fn burst_collapses_to_one_execution() {
        let debouncer = Debouncer::new();
        let fired = Arc::new(AtomicUsize::new(0));

        for _ in 0..5 {
            let fired = Arc::clone(&fired);
            debouncer.schedule(SAVE_DEBOUNCE, async move {
                fired.fetch_add(1, Ordering::SeqCst);
            });
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
        tokio::time::sleep(SAVE_DEBOUNCE * 2).await;

        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_drops_the_pending_action() {
        let debouncer = Debouncer::new();
        let fired = Arc::new(AtomicUsize::new(0));

        {
            let fired = Arc::clone(&fired);
            debouncer.schedule(SAVE_DEBOUNCE, async move {
                fired.fetch_add(1, Ordering::SeqCst);
            });
        }
        debouncer.cancel();
        tokio::time::sleep(SAVE_DEBOUNCE * 2).await;

        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }
}
