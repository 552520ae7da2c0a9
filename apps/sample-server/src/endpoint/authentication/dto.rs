use rest_pki::{PKCertificate, ValidationResults};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StartAuthenticationRequestRestDTO {
    /// Security context to validate the certificate against; the Lacuna
    /// Test context when absent.
    pub security_context_id: Option<Uuid>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteAuthenticationResponseRestDTO {
    pub is_valid: bool,
    pub certificate: PKCertificate,
    pub validation_results: ValidationResults,
    /// Human-readable rendering of the tree above.
    pub validation_results_text: String,
}
