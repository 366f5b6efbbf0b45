//! Input document source.
//!
//! Reads a captured event export and hands back the parsed envelope batch.
//! The engine does not care where the bytes came from; this is the only place
//! that touches the input file.

use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

/// One captured event record: a UTC timestamp, an event-name discriminator,
/// and a JSON-encoded payload that is re-decoded downstream.
///
/// The capture feed writes PascalCase keys; camelCase variants are accepted
/// as aliases.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope {
    #[serde(rename = "EnqueuedTimeUtc", alias = "enqueuedTimeUtc")]
    pub enqueued_time_utc: String,

    #[serde(rename = "EventName", alias = "eventName")]
    pub event_name: String,

    #[serde(rename = "Payload", alias = "payload")]
    pub payload: String,
}

/// Load the input document: a JSON array of envelopes.
///
/// A document that does not parse as an envelope array is fatal; only the
/// embedded payloads get per-record error handling.
pub fn load_envelopes(path: &Path) -> anyhow::Result<Vec<Envelope>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read input document at {}", path.display()))?;

    let envelopes: Vec<Envelope> = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse input document at {}", path.display()))?;

    tracing::info!("Loaded {} envelope(s) from {}", envelopes.len(), path.display());
    Ok(envelopes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_accepts_pascal_case_keys() {
        let raw = r#"{
            "EnqueuedTimeUtc": "2021-09-05 08:04:08 UTC",
            "EventName": "DynamicPrice_Result",
            "Payload": "{}"
        }"#;

        let envelope: Envelope = serde_json::from_str(raw).unwrap();
        assert_eq!(envelope.enqueued_time_utc, "2021-09-05 08:04:08 UTC");
        assert_eq!(envelope.event_name, "DynamicPrice_Result");
        assert_eq!(envelope.payload, "{}");
    }

    #[test]
    fn test_envelope_accepts_camel_case_aliases() {
        let raw = r#"{
            "enqueuedTimeUtc": "2021-09-05 08:04:08 UTC",
            "eventName": "CurateOffer_Result",
            "payload": "[]"
        }"#;

        let envelope: Envelope = serde_json::from_str(raw).unwrap();
        assert_eq!(envelope.event_name, "CurateOffer_Result");
    }
}
