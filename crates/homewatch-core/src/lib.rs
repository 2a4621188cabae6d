//! `homewatch-core` — homework-review status watcher.
//!
//! Polls the review API on a fixed interval, detects status changes for
//! the latest submission, and forwards human-readable notifications to a
//! Telegram chat.
//!
//! # Architecture
//!
//! ```text
//! Watcher (cursor, last-sent message)
//!     │
//!     ▼
//! Poll::poll(cursor)      ← GET ?from_date=<cursor>, OAuth header
//!     │                     checks HTTP status and embedded error keys
//!     ▼
//! validate::check_response  ← object → homeworks array → Vec<Submission>
//!     │
//!     ▼
//! translate::notification  ← verdict table, closed status set
//!     │
//!     ▼
//! Notify::send(text)      ← deduplicated against the last-sent message
//! ```
//!
//! The `Poll` and `Notify` traits are the injection seams: the binary
//! wires in [`HomeworkClient`] and [`TelegramNotifier`], tests wire in
//! scripted fakes. All loop state lives in the [`Watcher`] value — there
//! are no globals and nothing persists across restarts.

pub mod config;
pub mod error;
pub mod notify;
pub mod poller;
pub mod translate;
pub mod types;
pub mod validate;
pub mod watcher;

pub use config::Config;
pub use error::{ErrorKind, HomewatchError, Result};
pub use notify::{Notify, TelegramNotifier};
pub use poller::{HomeworkClient, Poll};
pub use types::{Snapshot, Submission, Verdict};
pub use watcher::Watcher;
