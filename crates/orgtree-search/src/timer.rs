//! The highlight-clear timer.

use std::{
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
    time::Duration,
};

use tokio::{task::JoinHandle, time::sleep};

/// A single pending delayed action that is replaced whenever it is rescheduled.
///
/// Scheduling aborts the previous task and bumps a generation counter. The task checks
/// the counter again after sleeping, so an old timer never runs its action once a newer
/// one has been scheduled.
#[derive(Debug, Default)]
pub struct HighlightTimer {
    /// The pending task, if any.
    pending: Option<JoinHandle<()>>,
    /// Incremented on every schedule and cancel.
    generation: Arc<AtomicU64>,
}

impl HighlightTimer {
    /// Creates a timer with nothing pending.
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `action` after `delay`, replacing any pending action.
    ///
    /// Must be called from within a tokio runtime.
    pub fn schedule<F>(&mut self, delay: Duration, action: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.cancel();
        let generation = self.generation.load(Ordering::SeqCst);
        let current = Arc::clone(&self.generation);
        self.pending = Some(tokio::spawn(async move {
            sleep(delay).await;
            if current.load(Ordering::SeqCst) == generation {
                action();
            }
        }));
    }

    /// Drops the pending action without running it.
    pub fn cancel(&mut self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    /// Returns true if an action is scheduled and has not run yet.
    pub fn is_pending(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl Drop for HighlightTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicUsize;

    use tokio::task::yield_now;

    use super::*;

    fn counter() -> (Arc<AtomicUsize>, impl Fn() -> usize) {
        let count = Arc::new(AtomicUsize::new(0));
        let read = Arc::clone(&count);
        (count, move || read.load(Ordering::SeqCst))
    }

    #[tokio::test(start_paused = true)]
    async fn fires_after_delay() {
        let (count, fired) = counter();
        let mut timer = HighlightTimer::new();
        timer.schedule(Duration::from_millis(2500), move || {
            count.fetch_add(1, Ordering::SeqCst);
        });
        assert!(timer.is_pending());

        sleep(Duration::from_millis(2400)).await;
        assert_eq!(fired(), 0);

        sleep(Duration::from_millis(200)).await;
        yield_now().await;
        assert_eq!(fired(), 1);
        assert!(!timer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn rescheduling_replaces_pending_action() {
        let (first, first_fired) = counter();
        let (second, second_fired) = counter();
        let mut timer = HighlightTimer::new();

        timer.schedule(Duration::from_millis(100), move || {
            first.fetch_add(1, Ordering::SeqCst);
        });
        sleep(Duration::from_millis(50)).await;
        timer.schedule(Duration::from_millis(100), move || {
            second.fetch_add(1, Ordering::SeqCst);
        });

        sleep(Duration::from_millis(300)).await;
        yield_now().await;
        assert_eq!(first_fired(), 0);
        assert_eq!(second_fired(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_and_drop_prevent_firing() {
        let (count, fired) = counter();
        let mut timer = HighlightTimer::new();
        let for_drop = Arc::clone(&count);
        timer.schedule(Duration::from_millis(10), move || {
            count.fetch_add(1, Ordering::SeqCst);
        });
        timer.cancel();
        assert!(!timer.is_pending());

        timer.schedule(Duration::from_millis(10), move || {
            for_drop.fetch_add(1, Ordering::SeqCst);
        });
        drop(timer);

        sleep(Duration::from_millis(50)).await;
        assert_eq!(fired(), 0);
    }
}
