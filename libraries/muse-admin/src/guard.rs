//! Periodic session validity check for protected views.
//!
//! A [`SessionGuard`] is mounted when a protected view opens. It checks the
//! session at once and then on a fixed interval. The first failed check ends
//! polling for good; a new guard must be mounted to check again.

use muse_client::SessionAuthority;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// How often a mounted guard re-checks the session.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(60);

/// What the guard currently knows about the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardStatus {
    /// The mount check has not finished
    Checking,
    /// The last check passed; polling continues
    Valid,
    /// A check failed; polling has ended
    Expired,
    /// Polling was stopped or the guard was dropped
    Stopped,
}

impl GuardStatus {
    /// True once polling can no longer change the status.
    pub fn is_final(self) -> bool {
        matches!(self, Self::Expired | Self::Stopped)
    }
}

/// Cancellable polling task bound to a view's lifetime.
///
/// Dropping the guard cancels the poll.
pub struct SessionGuard {
    status: watch::Receiver<GuardStatus>,
    cancel: CancellationToken,
}

impl SessionGuard {
    /// Mount with the default 60 second interval. Requires a tokio runtime.
    pub fn mount(authority: Arc<dyn SessionAuthority>) -> Self {
        Self::with_interval(authority, DEFAULT_POLL_INTERVAL)
    }

    pub fn with_interval(authority: Arc<dyn SessionAuthority>, period: Duration) -> Self {
        let (tx, rx) = watch::channel(GuardStatus::Checking);
        let cancel = CancellationToken::new();
        tokio::spawn(poll(authority, period, tx, cancel.clone()));
        debug!(interval_secs = period.as_secs(), "Session guard mounted");
        Self { status: rx, cancel }
    }

    pub fn status(&self) -> GuardStatus {
        *self.status.borrow()
    }

    /// Receiver that observes every status change, for hosts that react to
    /// expiry.
    pub fn subscribe(&self) -> watch::Receiver<GuardStatus> {
        self.status.clone()
    }

    /// Wait for the mount check to finish.
    pub async fn checked(&self) -> GuardStatus {
        self.wait_until(|s| s != GuardStatus::Checking).await
    }

    /// Wait until polling has ended, by expiry or by [`SessionGuard::stop`].
    pub async fn finished(&self) -> GuardStatus {
        self.wait_until(GuardStatus::is_final).await
    }

    async fn wait_until(&self, done: impl Fn(GuardStatus) -> bool) -> GuardStatus {
        let mut rx = self.status.clone();
        let result = rx.wait_for(|s| done(*s)).await.map(|s| *s);
        result.unwrap_or_else(|_| *self.status.borrow())
    }

    /// Stop polling. Has no effect once the session has expired.
    pub fn stop(&self) {
        self.cancel.cancel();
    }
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

async fn poll(
    authority: Arc<dyn SessionAuthority>,
    period: Duration,
    status: watch::Sender<GuardStatus>,
    cancel: CancellationToken,
) {
    // The first tick completes immediately, which gives the mount check.
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            _ = interval.tick() => {}
        }

        let valid = tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            valid = authority.is_session_valid() => valid,
        };

        if valid {
            status.send_replace(GuardStatus::Valid);
        } else {
            warn!("Session no longer valid, polling stopped");
            status.send_replace(GuardStatus::Expired);
            return;
        }
    }

    info!("Session guard stopped");
    status.send_replace(GuardStatus::Stopped);
}
