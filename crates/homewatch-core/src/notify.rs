//! Notification delivery via the Telegram Bot API.

use serde_json::Value;
use tracing::{debug, error};

use crate::error::{HomewatchError, Result};
use crate::poller::REQUEST_TIMEOUT;

pub const TELEGRAM_API_BASE: &str = "https://api.telegram.org";

// ─── Notify seam ──────────────────────────────────────────────────────────

/// Delivery seam for the run loop. Implementations report success as a
/// boolean and never propagate delivery errors upward — the loop decides
/// whether to retry based on the flag.
#[allow(async_fn_in_trait)]
pub trait Notify {
    async fn send(&mut self, text: &str) -> bool;
}

// ─── TelegramNotifier ─────────────────────────────────────────────────────

/// Sends messages to one fixed chat through `POST /bot<token>/sendMessage`.
pub struct TelegramNotifier {
    http: reqwest::Client,
    url: String,
    chat_id: String,
}

impl TelegramNotifier {
    pub fn new(token: &str, chat_id: &str) -> Result<Self> {
        Self::with_base(TELEGRAM_API_BASE, token, chat_id)
    }

    /// Build against a different API host, so tests can point the
    /// notifier at a local mock server.
    pub fn with_base(base: &str, token: &str, chat_id: &str) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| HomewatchError::Dispatch(e.to_string()))?;
        Ok(Self {
            http,
            url: format!("{base}/bot{token}/sendMessage"),
            chat_id: chat_id.to_string(),
        })
    }

    async fn try_send(&self, text: &str) -> Result<()> {
        let response = self
            .http
            .post(&self.url)
            .form(&[("chat_id", self.chat_id.as_str()), ("text", text)])
            .send()
            .await
            .map_err(|e| HomewatchError::Dispatch(format!("sendMessage request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(HomewatchError::Dispatch(format!(
                "sendMessage returned HTTP {status}"
            )));
        }

        let body: Value = response.json().await.map_err(|e| {
            HomewatchError::Dispatch(format!("sendMessage response was not valid JSON: {e}"))
        })?;
        if body.get("ok").and_then(Value::as_bool) != Some(true) {
            return Err(HomewatchError::Dispatch(format!(
                "Telegram rejected the message: {body}"
            )));
        }

        Ok(())
    }
}

impl Notify for TelegramNotifier {
    async fn send(&mut self, text: &str) -> bool {
        match self.try_send(text).await {
            Ok(()) => {
                debug!(chat_id = %self.chat_id, "notification delivered: {text}");
                true
            }
            Err(e) => {
                error!("notification not delivered: {e}");
                false
            }
        }
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────
