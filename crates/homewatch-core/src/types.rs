use serde::Deserialize;
use std::str::FromStr;

use crate::error::HomewatchError;

// ─── Submission ───────────────────────────────────────────────────────────

/// One homework-review record as returned by the API.
///
/// Every field decodes as optional so the translator can report exactly
/// which one is absent instead of failing the whole payload decode.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Submission {
    #[serde(default)]
    pub homework_name: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub date_updated: Option<i64>,
}

// ─── Snapshot ─────────────────────────────────────────────────────────────

/// A validated poll result: submissions newest-first, plus the server's
/// own clock reading from the `current_date` field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    pub homeworks: Vec<Submission>,
    pub current_date: Option<i64>,
}

// ─── Verdict ──────────────────────────────────────────────────────────────

/// Review verdicts the API may assign. Closed set — anything else is an
/// [`HomewatchError::UnknownStatus`], never a default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Approved,
    Reviewing,
    Rejected,
}

impl Verdict {
    /// The human-readable text sent to the recipient.
    pub fn text(self) -> &'static str {
        match self {
            Verdict::Approved => "The reviewer liked everything. Hooray!",
            Verdict::Reviewing => "The work was taken up for review.",
            Verdict::Rejected => "The reviewer has remarks.",
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Verdict::Approved => write!(f, "approved"),
            Verdict::Reviewing => write!(f, "reviewing"),
            Verdict::Rejected => write!(f, "rejected"),
        }
    }
}

impl FromStr for Verdict {
    type Err = HomewatchError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "approved" => Ok(Verdict::Approved),
            "reviewing" => Ok(Verdict::Reviewing),
            "rejected" => Ok(Verdict::Rejected),
            other => Err(HomewatchError::UnknownStatus(other.to_string())),
        }
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────
