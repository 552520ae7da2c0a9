use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StartCadesSignatureRequestRestDTO {
    /// Base64-encoded content; the bundled sample document when absent.
    /// Ignored when co-signing a CMS that encapsulates its content.
    pub file_to_sign: Option<String>,
    /// Base64-encoded CMS to co-sign instead of starting a fresh signature.
    pub cms_to_co_sign: Option<String>,
    pub encapsulate_content: Option<bool>,
    pub signature_policy_id: Option<Uuid>,
    pub security_context_id: Option<Uuid>,
}
