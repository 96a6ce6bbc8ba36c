//! Decoding of interpretation-service payloads
//!
//! The interpretation service turns free text into one of two tool calls,
//! `log_expense` or `query_expenses`. Its reply reaches us in one of these shapes:
//!
//! - an envelope: `{"success": true, "type": "expense" | "query", "data": {...}}`,
//!   or `{"success": false, "message": "..."}` when nothing could be extracted
//! - a bare tool call: `{"name": "log_expense", "args": {...}}`
//! - plain text with no JSON at all, which is the service talking to the user
//!
//! Models often wrap JSON in prose, so only the outermost `{...}` is parsed.

use serde::Deserialize;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::models::{Intent, LoggingIntent, QueryIntent};

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default = "default_success")]
    success: bool,
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    args: Option<Value>,
}

fn default_success() -> bool {
    true
}

/// Decode an interpretation-service reply into an intent
pub fn parse_interpretation(response: &str) -> Result<Intent> {
    let response = response.trim();

    let Some(json_str) = extract_json(response) else {
        // No tool call: whatever the service said goes back to the user
        let message = (!response.is_empty()).then(|| response.to_string());
        return Ok(Intent::Unparseable(message));
    };

    let envelope: Envelope = serde_json::from_str(json_str).map_err(|e| {
        Error::InvalidData(format!(
            "Invalid JSON from interpretation service: {} | Raw: {}",
            e,
            truncate(json_str, 200)
        ))
    })?;

    if !envelope.success {
        return Ok(Intent::Unparseable(envelope.message));
    }

    let (kind, payload) = match (envelope.name, envelope.kind) {
        (Some(name), _) => (name, envelope.args.or(envelope.data)),
        (None, Some(kind)) => (kind, envelope.data.or(envelope.args)),
        (None, None) => {
            return Err(Error::InvalidData(format!(
                "Interpretation payload has no type | Raw: {}",
                truncate(json_str, 200)
            )))
        }
    };
    let payload = payload.unwrap_or_else(|| Value::Object(Default::default()));

    match kind.to_lowercase().as_str() {
        "expense" | "log" | "log_expense" => {
            let intent: LoggingIntent = serde_json::from_value(payload)
                .map_err(|e| Error::InvalidData(format!("Invalid logging intent: {}", e)))?;
            Ok(Intent::Log(intent))
        }
        "query" | "query_expenses" => {
            let intent: QueryIntent = serde_json::from_value(payload)
                .map_err(|e| Error::InvalidData(format!("Invalid query intent: {}", e)))?;
            Ok(Intent::Query(intent))
        }
        other => Err(Error::InvalidData(format!(
            "Unknown interpretation type: {}",
            other
        ))),
    }
}

/// The outermost `{...}` in a response, if any
fn extract_json(response: &str) -> Option<&str> {
    let start = response.find('{')?;
    let end = response.rfind('}')?;
    (start < end).then(|| &response[start..=end])
}

fn truncate(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => format!("{}...", &s[..idx]),
        None => s.to_string(),
    }
}
