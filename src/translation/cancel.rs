//! Cancellation for one translation: a caller-owned trigger plus a deadline.

use std::sync::OnceLock;
use std::time::Duration;

use tokio::time::{Instant, sleep_until};
use tokio_util::sync::CancellationToken;

/// Stand-in deadline for timeouts too large to add to the current instant.
const FAR_FUTURE: Duration = Duration::from_secs(86400 * 365 * 30);

/// Which source aborted the translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelCause {
    User,
    Deadline,
}

/// The caller's side of cancellation (Ctrl+C, `/cancel`, ...).
///
/// Cheap to clone; every clone cancels the same translation.
#[derive(Debug, Clone, Default)]
pub struct CancelTrigger {
    token: CancellationToken,
}

impl CancelTrigger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation. Calling this more than once has no further effect.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

/// Composite of a [`CancelTrigger`] and a deadline armed at creation.
///
/// When both sources are set at the moment the abort is observed, the
/// deadline wins: the outcome is reported as a timeout. The first resolved
/// cause is kept, so every later observation agrees with it.
#[derive(Debug)]
pub struct CancellationHandle {
    trigger: CancelTrigger,
    deadline: Instant,
    cause: OnceLock<CancelCause>,
}

impl CancellationHandle {
    /// Arms the deadline `timeout` from now.
    ///
    /// A timeout that overflows the clock is treated as roughly thirty years.
    pub fn new(trigger: CancelTrigger, timeout: Duration) -> Self {
        let now = Instant::now();
        Self {
            trigger,
            deadline: now.checked_add(timeout).unwrap_or(now + FAR_FUTURE),
            cause: OnceLock::new(),
        }
    }

    pub const fn deadline(&self) -> Instant {
        self.deadline
    }

    /// Completes when either source fires.
    pub async fn fired(&self) {
        tokio::select! {
            () = self.trigger.token.cancelled() => {}
            () = sleep_until(self.deadline) => {}
        }
    }

    /// Resolves which source fired, if any.
    ///
    /// Deadline takes precedence over a user cancel when both are set.
    pub fn cause(&self) -> Option<CancelCause> {
        if let Some(cause) = self.cause.get() {
            return Some(*cause);
        }

        let observed = if Instant::now() >= self.deadline {
            CancelCause::Deadline
        } else if self.trigger.is_cancelled() {
            CancelCause::User
        } else {
            return None;
        };

        Some(*self.cause.get_or_init(|| observed))
    }
}
