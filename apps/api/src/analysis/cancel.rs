use std::future::{pending, Future};
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::{sleep_until, Instant};
use tracing::warn;

use crate::errors::AppError;

/// Cancellation for collaborator calls: an explicit signal, an optional
/// deadline, or both. Once either fires, `guard` stops waiting and returns
/// `AppError::Cancelled`; the pipeline never runs the core on that path.
#[derive(Debug, Clone)]
pub struct CancelSignal {
    rx: watch::Receiver<bool>,
    deadline: Option<Instant>,
}

/// Sender side of a `CancelSignal`.
#[cfg(test)]
#[derive(Debug)]
pub struct CancelHandle(watch::Sender<bool>);

#[cfg(test)]
impl CancelHandle {
    pub fn cancel(&self) {
        self.0.send_replace(true);
    }
}

impl CancelSignal {
    #[cfg(test)]
    pub fn channel() -> (CancelHandle, CancelSignal) {
        let (tx, rx) = watch::channel(false);
        (CancelHandle(tx), CancelSignal { rx, deadline: None })
    }

    /// A signal that never fires.
    pub fn never() -> Self {
        let (_tx, rx) = watch::channel(false);
        Self { rx, deadline: None }
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self::never().and_timeout(timeout)
    }

    pub fn and_timeout(mut self, timeout: Duration) -> Self {
        self.deadline = Some(Instant::now() + timeout);
        self
    }

    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow() || self.deadline.is_some_and(|d| Instant::now() >= d)
    }

    /// Awaits `fut` unless the signal fires first.
    pub async fn guard<F: Future>(&self, fut: F) -> Result<F::Output, AppError> {
        if self.is_cancelled() {
            return Err(AppError::Cancelled);
        }

        let mut rx = self.rx.clone();
        tokio::select! {
            biased;
            _ = wait_for_cancel(&mut rx) => Err(AppError::Cancelled),
            _ = wait_for_deadline(self.deadline) => {
                warn!("Collaborator call exceeded its deadline");
                Err(AppError::Cancelled)
            }
            out = fut => Ok(out),
        }
    }
}

async fn wait_for_cancel(rx: &mut watch::Receiver<bool>) {
    loop {
        if *rx.borrow_and_update() {
            return;
        }
        // sender gone: nothing can cancel any more
        if rx.changed().await.is_err() {
            pending::<()>().await;
        }
    }
}

async fn wait_for_deadline(deadline: Option<Instant>) {
    match deadline {
        Some(d) => sleep_until(d).await,
        None => pending::<()>().await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_never_lets_future_complete() {
        let out = CancelSignal::never().guard(async { 42 }).await.unwrap();
        assert_eq!(out, 42);
    }

    #[tokio::test]
    async fn test_cancel_before_call_short_circuits() {
        let (handle, signal) = CancelSignal::channel();
        handle.cancel();
        assert!(signal.is_cancelled());
        let result = signal.guard(async { unreachable!("must not be polled") }).await;
        assert!(matches!(result, Err(AppError::Cancelled)));
    }

    #[tokio::test]
    async fn test_cancel_during_call() {
        let (handle, signal) = CancelSignal::channel();
        let slow = async {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            "late"
        };
        let (result, _) = tokio::join!(signal.guard(slow), async { handle.cancel() });
        assert!(matches!(result, Err(AppError::Cancelled)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_deadline_cancels_slow_call() {
        let signal = CancelSignal::with_timeout(Duration::from_secs(5));
        let result = signal
            .guard(tokio::time::sleep(Duration::from_secs(60)))
            .await;
        assert!(matches!(result, Err(AppError::Cancelled)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_fast_call_beats_deadline() {
        let signal = CancelSignal::with_timeout(Duration::from_secs(5));
        let result = signal
            .guard(async {
                tokio::time::sleep(Duration::from_millis(10)).await;
                "done"
            })
            .await;
        assert_eq!(result.unwrap(), "done");
    }
}
