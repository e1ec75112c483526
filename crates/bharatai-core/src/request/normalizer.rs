//! Request normalizer.
//!
//! Turns an inbound payload into a validated [`Query`]. Pure: nothing here
//! touches the network, so a rejected payload never reaches a provider.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use bharatai_types::error::ValidationError;
use bharatai_types::query::{Domain, ImagePayload, Query, attr};

use super::prompt;

/// Caller input as received by the HTTP or CLI layer, before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawPayload {
    /// Free-form chat prompt.
    Text { prompt: String },
    /// Crop photo for disease diagnosis. `image` is base64, optionally as a
    /// `data:<mime>;base64,` URL.
    Vision {
        crop_type: Option<String>,
        image: String,
        mime_type: String,
    },
    /// Mandi price lookup for a state or district.
    Market { location: String },
    /// Farming recommendation; every field is optional.
    Recommendation {
        crop_type: Option<String>,
        soil_type: Option<String>,
        season: Option<String>,
        question: Option<String>,
    },
    Symptom { symptoms: String },
    HealthTips { disease: String },
}

impl RawPayload {
    /// Domain whose chain serves this payload.
    pub fn domain(&self) -> Domain {
        match self {
            RawPayload::Vision { .. } => Domain::VisionAnalyze,
            RawPayload::Market { .. } => Domain::MarketData,
            RawPayload::Text { .. }
            | RawPayload::Recommendation { .. }
            | RawPayload::Symptom { .. }
            | RawPayload::HealthTips { .. } => Domain::TextChat,
        }
    }
}

/// Validate `payload` for `domain` and build the canonical query.
pub fn normalize(domain: Domain, payload: RawPayload) -> Result<Query, ValidationError> {
    if payload.domain() != domain {
        return Err(ValidationError::PayloadMismatch { domain });
    }

    match payload {
        RawPayload::Text { prompt } => {
            let prompt = non_blank(&prompt).ok_or(ValidationError::EmptyPrompt)?;
            Ok(Query::new(domain).with_text(prompt))
        }
        RawPayload::Vision {
            crop_type,
            image,
            mime_type,
        } => {
            let image = decode_image(&image, &mime_type)?;
            let crop_type = crop_type.as_deref().and_then(non_blank);
            let mut query = Query::new(domain)
                .with_text(prompt::crop_diagnosis(crop_type))
                .with_image(image);
            if let Some(crop) = crop_type {
                query = query.with_attribute(attr::CROP_TYPE, crop);
            }
            Ok(query)
        }
        RawPayload::Market { location } => {
            let location = non_blank(&location).ok_or(ValidationError::MissingLocation)?;
            Ok(Query::new(domain).with_attribute(attr::LOCATION, location))
        }
        RawPayload::Recommendation {
            crop_type,
            soil_type,
            season,
            question,
        } => {
            let fields = [
                (attr::CROP_TYPE, crop_type.as_deref().and_then(non_blank)),
                (attr::SOIL_TYPE, soil_type.as_deref().and_then(non_blank)),
                (attr::SEASON, season.as_deref().and_then(non_blank)),
                (attr::QUESTION, question.as_deref().and_then(non_blank)),
            ];
            let text = prompt::recommendation(fields[0].1, fields[1].1, fields[2].1, fields[3].1);
            let query = fields
                .iter()
                .filter_map(|(name, value)| value.map(|v| (*name, v)))
                .fold(Query::new(domain).with_text(text), |q, (name, value)| {
                    q.with_attribute(name, value)
                });
            Ok(query)
        }
        RawPayload::Symptom { symptoms } => {
            let symptoms = non_blank(&symptoms).ok_or(ValidationError::MissingSymptoms)?;
            Ok(Query::new(domain)
                .with_text(prompt::symptom_analysis(symptoms))
                .with_attribute(attr::SYMPTOMS, symptoms))
        }
        RawPayload::HealthTips { disease } => {
            let disease = non_blank(&disease).ok_or(ValidationError::MissingDisease)?;
            Ok(Query::new(domain)
                .with_text(prompt::health_tips(disease))
                .with_attribute(attr::DISEASE, disease))
        }
    }
}

fn non_blank(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

/// Decode a base64 image, honouring a `data:<mime>;base64,` prefix.
///
/// The prefix's mime type is used when `mime_type` is blank.
fn decode_image(encoded: &str, mime_type: &str) -> Result<ImagePayload, ValidationError> {
    let encoded = encoded.trim();
    let (prefix_mime, body) = match encoded.strip_prefix("data:") {
        Some(rest) => {
            let (header, body) = rest.split_once(',').ok_or(ValidationError::InvalidImage)?;
            let params = header
                .strip_suffix(";base64")
                .ok_or(ValidationError::InvalidImage)?;
            let mime = params.split(';').next().unwrap_or_default();
            (non_blank(mime), body)
        }
        None => (None, encoded),
    };

    let compact: String = body.chars().filter(|c| !c.is_whitespace()).collect();
    let bytes = STANDARD
        .decode(compact.as_bytes())
        .map_err(|_| ValidationError::InvalidImage)?;
    if bytes.is_empty() {
        return Err(ValidationError::InvalidImage);
    }

    let mime_type = non_blank(mime_type)
        .or(prefix_mime)
        .ok_or(ValidationError::InvalidImage)?;

    Ok(ImagePayload {
        bytes,
        mime_type: mime_type.to_string(),
    })
}
