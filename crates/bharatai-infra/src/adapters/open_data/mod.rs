//! data.gov.in open datastore adapter (mandi prices).
//!
//! `GET {endpoint}?resource_id=..&api_key=..&format=json&filters={"state":..}&limit=..`.
//! The datastore only accepts its key as a query parameter, so transport
//! errors are stripped of their URL before they are logged.

pub mod types;

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;

use bharatai_core::router::adapter::ProviderAdapter;
use bharatai_types::config::MANDI_RESOURCE_ID;
use bharatai_types::provider::{Capability, MarketRecord, ProviderError, ProviderSpec, Reply};
use bharatai_types::query::{Query, attr};

use self::types::{DatastoreResponse, MandiRow};
use super::http;

const DEFAULT_LIMIT: &str = "10";

pub struct OpenDataAdapter {
    client: reqwest::Client,
    name: String,
    endpoint: String,
    resource_id: String,
    limit: String,
    api_key: Option<SecretString>,
}

impl OpenDataAdapter {
    pub fn new(client: reqwest::Client, spec: &ProviderSpec, api_key: Option<SecretString>) -> Self {
        Self {
            client,
            name: spec.name.clone(),
            endpoint: spec.endpoint().to_string(),
            resource_id: spec.param("resource_id").unwrap_or(MANDI_RESOURCE_ID).to_string(),
            limit: spec.param("limit").unwrap_or(DEFAULT_LIMIT).to_string(),
            api_key,
        }
    }
}

impl ProviderAdapter for OpenDataAdapter {
    fn name(&self) -> &str {
        &self.name
    }

    fn capability(&self) -> Capability {
        Capability::DatasetQuery
    }

    async fn invoke(&self, query: &Query, timeout: Duration) -> Result<Reply, ProviderError> {
        let api_key = self
            .api_key
            .as_ref()
            .ok_or_else(|| ProviderError::auth(format!("{} API key is not configured", self.name)))?;

        let location = query.attribute(attr::LOCATION).unwrap_or_default();
        let filters = serde_json::json!({ "state": location }).to_string();

        let request = self
            .client
            .get(&self.endpoint)
            .timeout(timeout)
            .query(&[
                ("resource_id", self.resource_id.as_str()),
                ("api_key", api_key.expose_secret()),
                ("format", "json"),
                ("filters", filters.as_str()),
                ("limit", self.limit.as_str()),
            ]);

        let raw = http::send_json(request).await?;
        map_response(&self.name, raw)
    }
}

/// Map `records` to market rows. A missing `records` field is malformed;
/// an empty array is a valid answer with no rows.
pub fn map_response(source: &str, raw: Value) -> Result<Reply, ProviderError> {
    let parsed: DatastoreResponse = serde_json::from_value(raw.clone()).map_err(|e| {
        ProviderError::malformed(format!("unexpected datastore response shape: {e}"))
    })?;

    let rows = parsed
        .records
        .ok_or_else(|| ProviderError::malformed("datastore response has no records field"))?;

    let mut reply = Reply::text(source, String::new()).with_raw_payload(raw);
    reply.records = rows.iter().map(to_record).collect();
    Ok(reply)
}

fn to_record(row: &MandiRow) -> MarketRecord {
    MarketRecord {
        crop: field_text(&row.commodity, "Unknown"),
        price: field_text(&row.modal_price, "N/A"),
        market: field_text(&row.market, "Unknown"),
        district: field_text(&row.district, "Unknown"),
    }
}

fn field_text(value: &Option<Value>, default: &str) -> String {
    match value {
        Some(Value::String(s)) if !s.trim().is_empty() => s.trim().to_string(),
        Some(Value::Number(n)) => n.to_string(),
        _ => default.to_string(),
    }
}
