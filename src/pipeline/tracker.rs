use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::Notify;

/// Counts outstanding units of work: one per submitted work item and one
/// per produced finding. The increment always happens before the unit is
/// handed off, the decrement after it is fully handled, so `wait` returning
/// means every submitted item and every finding has been drained.
#[derive(Debug, Default)]
pub struct CompletionTracker {
    outstanding: AtomicUsize,
    zero: Notify,
}

impl CompletionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, n: usize) {
        self.outstanding.fetch_add(n, Ordering::AcqRel);
    }

    pub fn done(&self) {
        let prev = self.outstanding.fetch_sub(1, Ordering::AcqRel);
        assert!(prev > 0, "completion tracker underflow");
        if prev == 1 {
            self.zero.notify_waiters();
        }
    }

    pub fn outstanding(&self) -> usize {
        self.outstanding.load(Ordering::Acquire)
    }

    /// Block until the counter returns to zero. Returns immediately if it
    /// already is. Not a poll: the waiter parks on a notification that is
    /// fired by the final `done`.
    pub async fn wait(&self) {
        loop {
            // Register interest before checking, so a final `done` landing
            // between the check and the await still wakes us.
            let notified = self.zero.notified();
            if self.outstanding.load(Ordering::Acquire) == 0 {
                return;
            }
            notified.await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    #[tokio::test]
    async fn test_wait_returns_immediately_when_idle() {
        let tracker = CompletionTracker::new();
        tracker.wait().await;
    }

    #[tokio::test]
    async fn test_wait_blocks_until_all_done() {
        let tracker = Arc::new(CompletionTracker::new());
        tracker.add(2);

        let waiter = {
            let tracker = tracker.clone();
            tokio::spawn(async move { tracker.wait().await })
        };

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!waiter.is_finished());

        tracker.done();
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!waiter.is_finished());

        tracker.done();
        tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .expect("waiter should finish after the final done")
            .unwrap();
        assert_eq!(tracker.outstanding(), 0);
    }

    #[tokio::test]
    async fn test_concurrent_add_done_balance_out() {
        let tracker = Arc::new(CompletionTracker::new());
        tracker.add(100);

        let mut handles = Vec::new();
        for _ in 0..4 {
            let tracker = tracker.clone();
            handles.push(tokio::spawn(async move {
                for _ in 0..25 {
                    tracker.done();
                }
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        tokio::time::timeout(Duration::from_secs(1), tracker.wait())
            .await
            .expect("tracker should reach zero");
    }

    #[tokio::test]
    #[should_panic(expected = "underflow")]
    async fn test_done_without_add_panics() {
        let tracker = CompletionTracker::new();
        tracker.done();
    }
}
