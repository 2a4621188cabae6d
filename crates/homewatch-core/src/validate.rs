//! Shape validation for decoded API payloads.
//!
//! The API contract is an object carrying a `homeworks` array; anything
//! else is a protocol error. An empty array is valid — it means there is
//! nothing to report this cycle.

use serde_json::Value;

use crate::error::{HomewatchError, Result};
use crate::types::{Snapshot, Submission};

/// Name for a JSON value's type, used in wrong-type diagnostics.
fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Check the payload's shape and produce a typed [`Snapshot`].
pub fn check_response(payload: &Value) -> Result<Snapshot> {
    let object = payload.as_object().ok_or(HomewatchError::NotAnObject {
        got: type_name(payload),
    })?;

    let homeworks = object
        .get("homeworks")
        .ok_or(HomewatchError::MissingKey("homeworks"))?;
    if !homeworks.is_array() {
        return Err(HomewatchError::WrongType {
            key: "homeworks",
            expected: "an array",
            got: type_name(homeworks),
        });
    }

    let homeworks: Vec<Submission> =
        serde_json::from_value(homeworks.clone()).map_err(|_| HomewatchError::WrongType {
            key: "homeworks",
            expected: "an array of submission objects",
            got: "an array with a malformed element",
        })?;

    let current_date = object.get("current_date").and_then(Value::as_i64);

    Ok(Snapshot {
        homeworks,
        current_date,
    })
}

// ─── Tests ────────────────────────────────────────────────────────────────
