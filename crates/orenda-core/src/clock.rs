//! Time abstractions: wall-clock timestamps and paced suspension.
//!
//! Transcript timestamps come from a [`Clock`]; every modeled delay
//! (character reveal, segment pause, terminal pause) goes through a
//! [`Pacer`] so that tests can observe delays without waiting on them.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Abstraction over system time for deterministic behavior.
pub trait Clock: Send + Sync {
    /// Returns the current time.
    fn now(&self) -> DateTime<Utc>;
}

/// Production clock that delegates to the system clock.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Suspends the current turn for a modeled delay.
///
/// Implementations must yield to the runtime rather than block the thread.
#[async_trait]
pub trait Pacer: Send + Sync {
    /// Waits for `duration` before resuming.
    async fn pause(&self, duration: Duration);
}

/// Production pacer backed by `tokio::time::sleep`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioPacer;

#[async_trait]
impl Pacer for TokioPacer {
    async fn pause(&self, duration: Duration) {
        if duration.is_zero() {
            return;
        }
        tokio::time::sleep(duration).await;
    }
}
