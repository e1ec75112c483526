//! Envelope builder.

use bharatai_types::envelope::{Envelope, EnvelopeBody, FALLBACK_SOURCE};
use bharatai_types::provider::Reply;
use bharatai_types::query::Domain;

use crate::dataset::StaticDataset;

/// What the chain produced.
#[derive(Debug, Clone, Copy)]
pub enum Outcome<'a> {
    /// A provider answered.
    Live(&'a Reply),
    /// Every provider failed and the domain's static table is served.
    Fallback(&'a StaticDataset),
}

/// Wrap an outcome in the caller-facing envelope. Never fails.
///
/// Blank generated text is replaced with a domain-specific default.
pub fn build(domain: Domain, outcome: Outcome<'_>) -> Envelope {
    match outcome {
        Outcome::Live(reply) => Envelope {
            source: reply.source_name.clone(),
            body: live_body(domain, reply),
            is_fallback: false,
        },
        Outcome::Fallback(dataset) => Envelope {
            source: FALLBACK_SOURCE.to_string(),
            body: EnvelopeBody::Data(dataset.records().to_vec()),
            is_fallback: true,
        },
    }
}

fn live_body(domain: Domain, reply: &Reply) -> EnvelopeBody {
    match domain {
        Domain::MarketData => EnvelopeBody::Data(reply.records.clone()),
        Domain::TextChat | Domain::VisionAnalyze => {
            let text = reply.text.trim();
            if text.is_empty() {
                EnvelopeBody::Reply(default_message(domain, &reply.source_name))
            } else {
                EnvelopeBody::Reply(text.to_string())
            }
        }
    }
}

fn default_message(domain: Domain, source: &str) -> String {
    match domain {
        Domain::VisionAnalyze => "No diagnosis found.".to_string(),
        _ => format!("No response from {source}."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bharatai_types::provider::MarketRecord;

    #[test]
    fn test_live_text() {
        let reply = Reply::text("OpenAI", "Use urea and DAP...");
        let envelope = build(Domain::TextChat, Outcome::Live(&reply));
        assert_eq!(envelope.source, "OpenAI");
        assert_eq!(envelope.reply(), Some("Use urea and DAP..."));
        assert!(!envelope.is_fallback);
    }

    #[test]
    fn test_blank_text_gets_default() {
        let reply = Reply::text("Gemini", "  \n ");
        let envelope = build(Domain::TextChat, Outcome::Live(&reply));
        assert_eq!(envelope.reply(), Some("No response from Gemini."));

        let envelope = build(Domain::VisionAnalyze, Outcome::Live(&reply));
        assert_eq!(envelope.reply(), Some("No diagnosis found."));
    }

    #[test]
    fn test_live_market_carries_records() {
        let mut reply = Reply::text("data.gov.in", "");
        reply.records = vec![MarketRecord::new("Onion", "1800", "Bowenpally", "Hyderabad")];
        let envelope = build(Domain::MarketData, Outcome::Live(&reply));
        assert_eq!(envelope.source, "data.gov.in");
        assert_eq!(envelope.data().unwrap()[0].crop, "Onion");
        assert!(!envelope.is_fallback);
    }

    #[test]
    fn test_fallback_envelope() {
        let dataset = StaticDataset::mandi_prices();
        let envelope = build(Domain::MarketData, Outcome::Fallback(&dataset));
        assert_eq!(envelope.source, "fallback");
        assert!(envelope.is_fallback);
        assert_eq!(envelope.data().unwrap().len(), 4);
    }
}
