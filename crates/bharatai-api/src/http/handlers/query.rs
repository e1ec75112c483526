//! Query endpoints.
//!
//! Each handler decodes its body into a [`RawPayload`] and hands it to
//! [`resolve`]; normalization, chain walking and the envelope shape are the
//! same for every route.
//!
//! - POST /query/text
//! - POST /query/vision
//! - GET  /query/market?location= (or ?state=)
//! - POST /query/recommendations
//! - POST /query/health/symptom
//! - POST /query/health/tips

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Query as UrlQuery, State};
use serde::Deserialize;
use tracing::Instrument;
use tracing::field::Empty;

use bharatai_core::request::{RawPayload, normalize};
use bharatai_observe::attrs;
use bharatai_types::envelope::Envelope;

use crate::http::error::AppError;
use crate::state::AppState;

type JsonBody<T> = Result<Json<T>, JsonRejection>;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct TextBody {
    pub prompt: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VisionBody {
    pub crop_type: Option<String>,
    /// Base64 image, optionally as a data URL.
    pub image: String,
    pub mime_type: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct MarketParams {
    pub location: Option<String>,
    pub state: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RecommendationBody {
    pub crop_type: Option<String>,
    pub soil_type: Option<String>,
    pub season: Option<String>,
    pub question: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SymptomBody {
    pub symptoms: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct TipsBody {
    pub disease: String,
}

/// POST /query/text
pub async fn text(
    State(state): State<AppState>,
    body: JsonBody<TextBody>,
) -> Result<Json<Envelope>, AppError> {
    let Json(body) = body?;
    resolve(&state, RawPayload::Text { prompt: body.prompt }).await
}

/// POST /query/vision - crop disease diagnosis from a base64 image.
pub async fn vision(
    State(state): State<AppState>,
    body: JsonBody<VisionBody>,
) -> Result<Json<Envelope>, AppError> {
    let Json(body) = body?;
    resolve(
        &state,
        RawPayload::Vision {
            crop_type: body.crop_type,
            image: body.image,
            mime_type: body.mime_type,
        },
    )
    .await
}

/// GET /query/market - mandi prices; answers from the static table when the
/// live dataset is unavailable.
pub async fn market(
    State(state): State<AppState>,
    UrlQuery(params): UrlQuery<MarketParams>,
) -> Result<Json<Envelope>, AppError> {
    let location = params
        .location
        .filter(|l| !l.trim().is_empty())
        .or(params.state)
        .unwrap_or_default();
    resolve(&state, RawPayload::Market { location }).await
}

/// POST /query/recommendations
pub async fn recommendations(
    State(state): State<AppState>,
    body: JsonBody<RecommendationBody>,
) -> Result<Json<Envelope>, AppError> {
    let Json(body) = body?;
    resolve(
        &state,
        RawPayload::Recommendation {
            crop_type: body.crop_type,
            soil_type: body.soil_type,
            season: body.season,
            question: body.question,
        },
    )
    .await
}

/// POST /query/health/symptom
pub async fn symptom(
    State(state): State<AppState>,
    body: JsonBody<SymptomBody>,
) -> Result<Json<Envelope>, AppError> {
    let Json(body) = body?;
    resolve(&state, RawPayload::Symptom { symptoms: body.symptoms }).await
}

/// POST /query/health/tips
pub async fn tips(
    State(state): State<AppState>,
    body: JsonBody<TipsBody>,
) -> Result<Json<Envelope>, AppError> {
    let Json(body) = body?;
    resolve(&state, RawPayload::HealthTips { disease: body.disease }).await
}

/// Normalize `payload` and resolve it through its domain chain.
///
/// If the client disconnects, axum drops this future and the in-flight
/// provider call with it.
async fn resolve(state: &AppState, payload: RawPayload) -> Result<Json<Envelope>, AppError> {
    let domain = payload.domain();
    let query = normalize(domain, payload)?;

    let span = tracing::info_span!(
        "query",
        otel.name = %attrs::span_name(attrs::OP_RESOLVE, domain),
        request_id = %uuid::Uuid::now_v7(),
        bharatai.domain = %domain,
        bharatai.source = Empty,
        bharatai.is_fallback = Empty,
        bharatai.failed_attempts = Empty,
    );

    match state.orchestrator.resolve(&query).instrument(span.clone()).await {
        Ok(resolution) => {
            span.record(attrs::ENVELOPE_SOURCE, resolution.envelope.source.as_str());
            span.record(attrs::IS_FALLBACK, resolution.envelope.is_fallback);
            span.record(attrs::FAILED_ATTEMPTS, resolution.failures.len() as u64);
            Ok(Json(resolution.envelope))
        }
        Err(err) => {
            span.record(attrs::FAILED_ATTEMPTS, err.failures().len() as u64);
            Err(err.into())
        }
    }
}
