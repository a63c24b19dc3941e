//! Lenient interpretation of the oracle's raw text.
//!
//! Three tiers: strict JSON parse, then extraction of the brace-delimited
//! span, then a verbatim `{"texto": ...}` wrapper. The triage endpoint
//! always returns something structured: oracle formatting drift is
//! absorbed here, never surfaced as an error.

use std::sync::OnceLock;

use regex::Regex;
use serde_json::{json, Value};

/// Matches from the first `{` through the last `}` in the text. For
/// well-formed output with surrounding chatter this is the suggestion
/// object; nested objects stay intact because the match is greedy.
fn json_span() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)\{.*\}").expect("valid regex"))
}

/// Interpret the oracle's raw output as a structured suggestion.
pub fn interpret_response(raw: &str) -> Value {
    if let Ok(value) = serde_json::from_str::<Value>(raw.trim()) {
        return value;
    }

    if let Some(span) = json_span().find(raw) {
        if let Ok(value) = serde_json::from_str::<Value>(span.as_str()) {
            return value;
        }
    }

    json!({ "texto": raw })
}
