//! Wire shapes shared by the signature start and completion calls.

use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use uuid::Uuid;

use crate::models::PKCertificate;
use crate::signature::pades::{PadesMeasurementUnits, PadesVisualRepresentation};
use crate::signature::xml::XmlSignatureElementLocationRestDTO;

#[skip_serializing_none]
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PadesSignatureStartRequestRestDTO {
    pub pdf_to_sign: String,
    pub signature_policy_id: Uuid,
    pub security_context_id: Option<Uuid>,
    pub certificate: Option<String>,
    pub visual_representation: Option<PadesVisualRepresentation>,
    pub measurement_units: Option<PadesMeasurementUnits>,
    pub callback_argument: Option<String>,
}

#[skip_serializing_none]
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CadesSignatureStartRequestRestDTO {
    pub content_to_sign: Option<String>,
    pub cms_to_co_sign: Option<String>,
    pub signature_policy_id: Uuid,
    pub security_context_id: Option<Uuid>,
    pub certificate: Option<String>,
    pub encapsulate_content: Option<bool>,
    pub callback_argument: Option<String>,
}

#[skip_serializing_none]
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct XmlSignatureStartRequestRestDTO {
    pub xml: String,
    pub element_to_sign_id: Option<String>,
    pub signature_element_location: Option<XmlSignatureElementLocationRestDTO>,
    pub signature_policy_id: Uuid,
    pub security_context_id: Option<Uuid>,
    pub certificate: Option<String>,
    pub callback_argument: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SignatureStartResponseRestDTO {
    pub token: String,
    pub to_sign_data: Option<String>,
    pub to_sign_hash: Option<String>,
    pub digest_algorithm_oid: Option<String>,
    pub certificate: Option<PKCertificate>,
}

#[derive(Debug, Serialize)]
pub(crate) struct SignedBytesRequestRestDTO {
    pub signature: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PadesCompleteResponseRestDTO {
    pub signed_pdf: String,
    pub certificate: PKCertificate,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CadesCompleteResponseRestDTO {
    pub cms: String,
    pub certificate: PKCertificate,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct XmlCompleteResponseRestDTO {
    pub signed_xml: String,
    pub certificate: PKCertificate,
}
