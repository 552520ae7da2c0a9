use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StartPadesSignatureRequestRestDTO {
    /// Base64-encoded PDF; the bundled sample document when absent.
    pub file_to_sign: Option<String>,
    pub signature_policy_id: Option<Uuid>,
    pub security_context_id: Option<Uuid>,
}
