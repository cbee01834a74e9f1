//! One-shot cooperative cancellation.
//!
//! Every suspension point in the agent goes through [`CancelToken::sleep`],
//! which resolves to a boolean instead of raising: `true` means the wait
//! elapsed naturally, `false` means it was cancelled. Callers branch on the
//! result; cancellation is never expressed as an error or a panic.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;

/// Handle that can be signaled exactly once. Clones observe the same signal;
/// there is no un-cancel.
#[derive(Clone, Debug)]
pub struct CancelToken {
    tx: Arc<watch::Sender<bool>>,
}

impl CancelToken {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx: Arc::new(tx) }
    }

    /// Signals the token. Idempotent.
    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }

    pub fn is_cancelled(&self) -> bool {
        *self.tx.borrow()
    }

    /// Resolves once the token is signaled; immediately if it already was.
    pub async fn cancelled(&self) {
        let mut rx = self.tx.subscribe();
        // wait_for only errs when the sender drops, and we hold the sender.
        let _ = rx.wait_for(|&cancelled| cancelled).await;
    }

    /// Sleeps for `duration` unless cancelled first.
    ///
    /// Returns `true` when the sleep elapsed naturally and `false` when it
    /// was cut short (or the token was already signaled on entry).
    pub async fn sleep(&self, duration: Duration) -> bool {
        if self.is_cancelled() {
            return false;
        }
        tokio::select! {
            _ = tokio::time::sleep(duration) => true,
            _ = self.cancelled() => false,
        }
    }

    /// True when both handles observe the same underlying signal.
    pub(crate) fn same(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.tx, &other.tx)
    }
}

impl Default for CancelToken {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn sleep_completes_when_not_cancelled() {
        let token = CancelToken::new();
        assert!(token.sleep(Duration::from_secs(5)).await);
        assert!(!token.is_cancelled());
    }

    #[tokio::test(start_paused = true)]
    async fn sleep_reports_cancellation() {
        let token = CancelToken::new();
        let sleeper = {
            let token = token.clone();
            tokio::spawn(async move { token.sleep(Duration::from_secs(3600)).await })
        };
        tokio::time::sleep(Duration::from_millis(10)).await;
        token.cancel();
        assert!(!sleeper.await.unwrap());
    }

    #[tokio::test(start_paused = true)]
    async fn already_cancelled_token_short_circuits() {
        let token = CancelToken::new();
        token.cancel();
        token.cancel();
        assert!(token.is_cancelled());
        assert!(!token.sleep(Duration::from_secs(1)).await);
        // cancelled() resolves without waiting.
        token.cancelled().await;
    }

    #[tokio::test(start_paused = true)]
    async fn clones_share_the_signal() {
        let token = CancelToken::new();
        let clone = token.clone();
        token.cancel();
        assert!(clone.is_cancelled());
        assert!(token.same(&clone));
        assert!(!token.same(&CancelToken::new()));
    }
}
