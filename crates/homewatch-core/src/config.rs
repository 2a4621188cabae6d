use std::env;
use std::time::Duration;

use crate::error::{HomewatchError, Result};

pub const DEFAULT_ENDPOINT: &str =
    "https://practicum.yandex.ru/api/user_api/homework_statuses/";

pub const DEFAULT_RETRY_PERIOD: Duration = Duration::from_secs(600);

/// Environment variables that must be present and non-empty before the
/// loop may start.
pub const REQUIRED_VARS: [&str; 3] = ["PRACTICUM_TOKEN", "TELEGRAM_TOKEN", "TELEGRAM_CHAT_ID"];

/// Startup configuration, loaded once from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub practicum_token: String,
    pub telegram_token: String,
    pub chat_id: String,
    pub endpoint: String,
    pub retry_period: Duration,
}

impl Config {
    /// Load from the process environment.
    ///
    /// Collects every missing or empty variable before failing, so the
    /// operator sees the full list at once instead of one name per run.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut missing = Vec::new();
        let mut read = |name: &'static str| match lookup(name) {
            Some(value) if !value.trim().is_empty() => value,
            _ => {
                missing.push(name.to_string());
                String::new()
            }
        };

        let [practicum_token, telegram_token, chat_id] = REQUIRED_VARS.map(&mut read);

        if !missing.is_empty() {
            return Err(HomewatchError::MissingConfig(missing));
        }

        Ok(Self {
            practicum_token,
            telegram_token,
            chat_id,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            retry_period: DEFAULT_RETRY_PERIOD,
        })
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────
