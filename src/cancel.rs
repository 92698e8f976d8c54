//! Cooperative cancellation for in-flight forecast requests.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::error::{ForecastError, Result};

/// Cancellation signal checked between pipeline phases (and inside the
/// autoregressive forecast loop, the most expensive computation).
///
/// Clones share the underlying flag, so cancelling any clone cancels the
/// whole request. A token may also carry a deadline; once the deadline
/// passes the token reports itself cancelled.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
    deadline: Option<Instant>,
}

impl CancelToken {
    /// A token that is never cancelled unless [`cancel`](Self::cancel) is called.
    pub fn new() -> Self {
        Self::default()
    }

    /// A token that expires after `timeout`.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            flag: Arc::new(AtomicBool::new(false)),
            deadline: Some(Instant::now() + timeout),
        }
    }

    /// Derive a token sharing this token's flag but bounded by `timeout`.
    ///
    /// The earlier of the two deadlines wins.
    pub fn bounded(&self, timeout: Duration) -> Self {
        let candidate = Instant::now() + timeout;
        Self {
            flag: Arc::clone(&self.flag),
            deadline: Some(match self.deadline {
                Some(existing) => existing.min(candidate),
                None => candidate,
            }),
        }
    }

    /// Signal cancellation to every clone of this token.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    /// Whether the token has been cancelled or its deadline has passed.
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
            || self.deadline.is_some_and(|d| Instant::now() >= d)
    }

    /// Return a `Cancelled` error naming the current phase if the token
    /// has fired.
    pub fn check(&self, phase: &'static str) -> Result<()> {
        if self.is_cancelled() {
            Err(ForecastError::Cancelled { phase })
        } else {
            Ok(())
        }
    }
}
