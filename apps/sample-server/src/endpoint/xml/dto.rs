use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StartFullXmlSignatureRequestRestDTO {
    /// Base64-encoded XML; the bundled sample invoice when absent.
    pub file_to_sign: Option<String>,
    pub signature_policy_id: Option<Uuid>,
    pub security_context_id: Option<Uuid>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StartXmlElementSignatureRequestRestDTO {
    /// Base64-encoded XML; the bundled NF-e batch envelope when absent.
    pub file_to_sign: Option<String>,
    /// Id of the element to sign; defaults to the `infNFe` element of the
    /// bundled envelope.
    pub element_to_sign_id: Option<String>,
    pub signature_policy_id: Option<Uuid>,
    pub security_context_id: Option<Uuid>,
}
