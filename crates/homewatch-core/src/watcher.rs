//! The run loop: poll → translate → dispatch, then sleep.
//!
//! ```text
//! Idle ──timer──▶ Polling ──always──▶ Idle
//! ```
//!
//! One cycle runs to completion (or failure) before the next begins. A
//! failed cycle is folded into a diagnostic notification and never stops
//! the loop.

use std::time::Duration;

use tracing::{debug, error, info};

use crate::error::Result;
use crate::notify::Notify;
use crate::poller::Poll;
use crate::translate;
use crate::types::Snapshot;

/// Owns the cursor and de-duplication state and drives the cycle against
/// injected [`Poll`] and [`Notify`] collaborators.
pub struct Watcher<P, N> {
    poller: P,
    notifier: N,
    retry_period: Duration,
    /// Update time of the last successfully processed submission.
    /// Advances monotonically, and only on a successful dispatch.
    cursor: i64,
    /// The most recently dispatched notification text; identical texts
    /// are suppressed, including diagnostic ones.
    last_sent: String,
}

impl<P: Poll, N: Notify> Watcher<P, N> {
    pub fn new(poller: P, notifier: N, retry_period: Duration) -> Self {
        Self {
            poller,
            notifier,
            retry_period,
            cursor: 0,
            last_sent: String::new(),
        }
    }

    /// Run indefinitely. Only process termination stops the loop.
    pub async fn run(&mut self) {
        info!(period_secs = self.retry_period.as_secs(), "entering poll loop");
        loop {
            self.cycle().await;
            tokio::time::sleep(self.retry_period).await;
        }
    }

    /// One poll → translate → dispatch cycle.
    pub async fn cycle(&mut self) {
        match self.observe().await {
            Ok(None) => debug!("no homeworks to report"),
            Ok(Some((text, next_cursor))) => self.dispatch(text, next_cursor).await,
            Err(e) => {
                let message = format!("Error during poll cycle: {e}");
                error!(kind = ?e.kind(), "{message}");
                // Cursor stays put so the failed window is retried.
                self.dispatch(message, self.cursor).await;
            }
        }
    }

    /// Fetch a snapshot and translate its newest submission.
    ///
    /// `None` means the snapshot was empty — nothing to report. The
    /// returned cursor is the submission's own update time, falling back
    /// to the server clock, else the current cursor.
    async fn observe(&mut self) -> Result<Option<(String, i64)>> {
        let Snapshot {
            homeworks,
            current_date,
        } = self.poller.poll(self.cursor).await?;

        let Some(newest) = homeworks.first() else {
            return Ok(None);
        };

        let text = translate::notification(newest)?;
        let next_cursor = newest.date_updated.or(current_date).unwrap_or(self.cursor);
        Ok(Some((text, next_cursor)))
    }

    /// Send unless identical to the previous notification; commit state
    /// only once delivery has succeeded, so a failed send is retried on
    /// the next cycle.
    async fn dispatch(&mut self, text: String, next_cursor: i64) {
        if text == self.last_sent {
            debug!("notification unchanged, not re-sending");
            return;
        }
        if self.notifier.send(&text).await {
            self.last_sent = text;
            self.cursor = next_cursor;
        }
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────
