//! data.gov.in datastore wire types.

use serde::Deserialize;
use serde_json::Value;

/// Datastore response. Only `records` matters; the envelope carries
/// paging and field metadata that is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct DatastoreResponse {
    pub records: Option<Vec<MandiRow>>,
}

/// One mandi price row. Values arrive as strings or numbers depending on
/// the dataset revision.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MandiRow {
    pub commodity: Option<Value>,
    pub modal_price: Option<Value>,
    pub market: Option<Value>,
    pub district: Option<Value>,
}
