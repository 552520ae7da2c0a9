use serde::{Deserialize, Serialize};

/// One element of a client-driven batch: the page starts and completes the
/// documents one by one, keeping several signatures in flight.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartBatchElementRequestRestDTO {
    pub document_id: u32,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteBatchElementRequestRestDTO {
    pub token: String,
}
