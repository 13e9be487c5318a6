//! Auto-clear timer for the copy confirmation.
//!
//! At most one clear is pending. Scheduling a new one cancels the previous
//! task, so the confirmation disappears a fixed delay after the latest
//! copy. The ticket carried by [`Action::CopyFeedbackExpired`] guards
//! against a clear that was already queued when it was cancelled.

use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio_util::sync::CancellationToken;
use tracing::trace;

use crate::action::Action;

pub struct FeedbackTimer {
    delay: Duration,
    pending: Option<CancellationToken>,
}

impl FeedbackTimer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Replace any pending clear with one for `ticket`.
    pub fn schedule(&mut self, ticket: u64, action_tx: UnboundedSender<Action>) {
        self.cancel();

        let cancel = CancellationToken::new();
        let task_cancel = cancel.clone();
        let delay = self.delay;
        tokio::spawn(async move {
            tokio::select! {
                () = task_cancel.cancelled() => {
                    trace!(ticket, "copy feedback clear cancelled");
                }
                () = tokio::time::sleep(delay) => {
                    let _ = action_tx.send(Action::CopyFeedbackExpired(ticket));
                }
            }
        });

        self.pending = Some(cancel);
    }

    pub fn cancel(&mut self) {
        if let Some(token) = self.pending.take() {
            token.cancel();
        }
    }
}

impl Drop for FeedbackTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    #[tokio::test(start_paused = true)]
    async fn fires_after_delay() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut timer = FeedbackTimer::new(Duration::from_secs(2));
        timer.schedule(1, tx);

        tokio::time::sleep(Duration::from_millis(1999)).await;
        assert!(rx.try_recv().is_err());

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert_eq!(rx.try_recv().unwrap(), Action::CopyFeedbackExpired(1));
    }

    #[tokio::test(start_paused = true)]
    async fn reschedule_cancels_previous() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut timer = FeedbackTimer::new(Duration::from_secs(2));
        timer.schedule(1, tx.clone());

        tokio::time::sleep(Duration::from_secs(1)).await;
        timer.schedule(2, tx);

        // Past the first deadline: nothing from ticket 1.
        tokio::time::sleep(Duration::from_millis(1500)).await;
        assert!(rx.try_recv().is_err());

        tokio::time::sleep(Duration::from_millis(600)).await;
        assert_eq!(rx.try_recv().unwrap(), Action::CopyFeedbackExpired(2));
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn drop_cancels_pending() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut timer = FeedbackTimer::new(Duration::from_secs(2));
        timer.schedule(7, tx);
        drop(timer);

        tokio::time::sleep(Duration::from_secs(3)).await;
        assert!(rx.try_recv().is_err());
    }
}
