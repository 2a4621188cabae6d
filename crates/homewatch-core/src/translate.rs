//! Submission-to-notification translation.

use crate::error::{HomewatchError, Result};
use crate::types::{Submission, Verdict};

/// Produce the notification text for one submission.
///
/// Fails with a missing-field error if `homework_name` or `status` is
/// absent, and with an unknown-status error if the status falls outside
/// the verdict table.
pub fn notification(submission: &Submission) -> Result<String> {
    let name = submission
        .homework_name
        .as_deref()
        .ok_or(HomewatchError::MissingField("homework_name"))?;
    let status = submission
        .status
        .as_deref()
        .ok_or(HomewatchError::MissingField("status"))?;
    let verdict: Verdict = status.parse()?;
    Ok(format!("Status changed for \"{name}\". {}", verdict.text()))
}

// ─── Tests ────────────────────────────────────────────────────────────────
