//! The externally visible result shape.
//!
//! ```json
//! { "source": "OpenAI", "reply": "Use urea and DAP...", "isFallback": false }
//! { "source": "fallback", "data": [ { "crop": "Rice", ... } ], "isFallback": true }
//! ```

use serde::{Deserialize, Serialize};

use crate::provider::MarketRecord;

/// Source tag used when an answer comes from a bundled static dataset.
pub const FALLBACK_SOURCE: &str = "fallback";

/// Payload of an [`Envelope`]: generated text or dataset rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnvelopeBody {
    Reply(String),
    Data(Vec<MarketRecord>),
}

/// Normalized, provenance-tagged result returned to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    pub source: String,
    #[serde(flatten)]
    pub body: EnvelopeBody,
    pub is_fallback: bool,
}

impl Envelope {
    /// The reply text, if this is a text envelope.
    pub fn reply(&self) -> Option<&str> {
        match &self.body {
            EnvelopeBody::Reply(text) => Some(text),
            EnvelopeBody::Data(_) => None,
        }
    }

    /// The dataset rows, if this is a data envelope.
    pub fn data(&self) -> Option<&[MarketRecord]> {
        match &self.body {
            EnvelopeBody::Reply(_) => None,
            EnvelopeBody::Data(rows) => Some(rows),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_envelope_json_shape() {
        let envelope = Envelope {
            source: "OpenAI".to_string(),
            body: EnvelopeBody::Reply("Use urea and DAP...".to_string()),
            is_fallback: false,
        };
        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "source": "OpenAI",
                "reply": "Use urea and DAP...",
                "isFallback": false
            })
        );
    }

    #[test]
    fn test_data_envelope_json_shape() {
        let envelope = Envelope {
            source: FALLBACK_SOURCE.to_string(),
            body: EnvelopeBody::Data(vec![MarketRecord::new("Rice", "2300", "Guntur", "Guntur")]),
            is_fallback: true,
        };
        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(value["source"], "fallback");
        assert_eq!(value["isFallback"], true);
        assert_eq!(value["data"][0]["crop"], "Rice");
        assert!(value.get("reply").is_none());
    }

    #[test]
    fn test_accessors() {
        let envelope = Envelope {
            source: "Gemini".to_string(),
            body: EnvelopeBody::Reply("hi".to_string()),
            is_fallback: false,
        };
        assert_eq!(envelope.reply(), Some("hi"));
        assert!(envelope.data().is_none());
    }
}
