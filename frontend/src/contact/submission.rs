use serde::Deserialize;

use super::fields::ContactFields;
use super::preview::synthesize_preview;

pub const GENERIC_FAILURE: &str = "Failed to send.";

/// Reply body of the contact relay. Every field is optional on the wire.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct ContactResponse {
    pub success: bool,
    pub message: Option<String>,
    pub error: Option<String>,
    pub errors: Option<Vec<String>>,
    pub preview: Option<String>,
}

/// Where a submit attempt currently stands.
#[derive(Clone, Debug, PartialEq)]
pub enum SubmitPhase {
    Idle,
    Submitting,
    /// The network call never completed; the form is being posted natively.
    FallingBack,
}

/// What to show once the relay has answered.
#[derive(Clone, Debug, PartialEq)]
pub enum SubmitOutcome {
    Sent { preview: String },
    Rejected { message: String },
}

pub fn is_json_content_type(content_type: Option<&str>) -> bool {
    content_type
        .map(|ct| ct.contains("application/json"))
        .unwrap_or(false)
}

fn rejection_message(body: Option<&ContactResponse>) -> String {
    let Some(body) = body else {
        return GENERIC_FAILURE.to_string();
    };
    if let Some(error) = body.error.as_deref().filter(|e| !e.is_empty()) {
        return error.to_string();
    }
    match body.errors.as_ref().map(|errors| errors.join("\n")) {
        Some(joined) if !joined.is_empty() => joined,
        _ => GENERIC_FAILURE.to_string(),
    }
}

/// Turns the relay's reply into what the visitor sees. `body` is the parsed
/// JSON body, `None` when the reply was not JSON or did not parse.
pub fn interpret_reply(
    ok: bool,
    body: Option<&ContactResponse>,
    submitted: &ContactFields,
    timestamp: &str,
) -> SubmitOutcome {
    if !ok {
        return SubmitOutcome::Rejected {
            message: rejection_message(body),
        };
    }
    let preview = body
        .and_then(|b| b.preview.clone())
        .filter(|p| !p.is_empty())
        .unwrap_or_else(|| synthesize_preview(submitted, timestamp));
    SubmitOutcome::Sent { preview }
}
