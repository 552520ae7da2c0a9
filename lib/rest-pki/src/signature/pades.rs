//! PAdES (PDF) signatures, including the optional visual representation
//! stamped onto the document.

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use uuid::Uuid;

use crate::client::RestPkiClient;
use crate::error::Error;
use crate::models::PKCertificate;
use crate::signature::dto::{PadesCompleteResponseRestDTO, PadesSignatureStartRequestRestDTO};
use crate::signature::{SignatureStartResult, complete, start_for_params, start_for_token};
use crate::util::to_base64;

const API_PATH: &str = "Api/PadesSignatures";

/// Accumulates the elements of a PAdES signature and starts the operation.
///
/// The PDF content and the signature policy must be set before starting;
/// `start` additionally requires the signer certificate, while
/// `start_with_web_pki` leaves the certificate to the browser component.
pub struct PadesSignatureStarter {
    client: RestPkiClient,
    pdf_to_sign: Option<Vec<u8>>,
    signature_policy_id: Option<Uuid>,
    security_context_id: Option<Uuid>,
    signer_certificate: Option<Vec<u8>>,
    visual_representation: Option<PadesVisualRepresentation>,
    measurement_units: Option<PadesMeasurementUnits>,
    callback_argument: Option<String>,
}

impl PadesSignatureStarter {
    pub fn new(client: RestPkiClient) -> Self {
        Self {
            client,
            pdf_to_sign: None,
            signature_policy_id: None,
            security_context_id: None,
            signer_certificate: None,
            visual_representation: None,
            measurement_units: None,
            callback_argument: None,
        }
    }

    pub fn set_pdf_to_sign(&mut self, content: impl Into<Vec<u8>>) -> &mut Self {
        self.pdf_to_sign = Some(content.into());
        self
    }

    pub fn set_pdf_to_sign_from_file(&mut self, path: impl AsRef<Path>) -> std::io::Result<&mut Self> {
        self.pdf_to_sign = Some(std::fs::read(path)?);
        Ok(self)
    }

    pub fn set_signature_policy(&mut self, policy_id: Uuid) -> &mut Self {
        self.signature_policy_id = Some(policy_id);
        self
    }

    pub fn set_security_context(&mut self, security_context_id: Uuid) -> &mut Self {
        self.security_context_id = Some(security_context_id);
        self
    }

    /// DER- or PEM-encoded certificate of the signer, required by `start`.
    pub fn set_signer_certificate(&mut self, certificate: impl Into<Vec<u8>>) -> &mut Self {
        self.signer_certificate = Some(certificate.into());
        self
    }

    pub fn set_visual_representation(
        &mut self,
        representation: PadesVisualRepresentation,
    ) -> &mut Self {
        self.visual_representation = Some(representation);
        self
    }

    pub fn set_measurement_units(&mut self, units: PadesMeasurementUnits) -> &mut Self {
        self.measurement_units = Some(units);
        self
    }

    pub fn set_callback_argument(&mut self, argument: impl Into<String>) -> &mut Self {
        self.callback_argument = Some(argument.into());
        self
    }

    /// Starts a signature to be performed by the Web PKI browser
    /// component, yielding the operation token.
    pub async fn start_with_web_pki(&self) -> Result<String, Error> {
        let request = self.request(None)?;
        start_for_token(&self.client, API_PATH, &request).await
    }

    /// Starts a signature whose private key is held by the caller,
    /// yielding the parameters for the local signing step.
    pub async fn start(&self) -> Result<SignatureStartResult, Error> {
        let certificate = self
            .signer_certificate
            .as_deref()
            .ok_or(Error::MissingParameter("signer certificate"))?;

        let request = self.request(Some(to_base64(certificate)?))?;
        start_for_params(&self.client, API_PATH, &request).await
    }

    fn request(
        &self,
        certificate: Option<String>,
    ) -> Result<PadesSignatureStartRequestRestDTO, Error> {
        let pdf_to_sign = self
            .pdf_to_sign
            .as_deref()
            .ok_or(Error::MissingParameter("PDF to sign"))?;
        let signature_policy_id = self
            .signature_policy_id
            .ok_or(Error::MissingParameter("signature policy"))?;

        Ok(PadesSignatureStartRequestRestDTO {
            pdf_to_sign: to_base64(pdf_to_sign)?,
            signature_policy_id,
            security_context_id: self.security_context_id,
            certificate,
            visual_representation: self.visual_representation.clone(),
            measurement_units: self.measurement_units,
            callback_argument: self.callback_argument.clone(),
        })
    }
}

/// Completes a PAdES signature and returns the signed PDF.
pub struct PadesSignatureFinisher {
    client: RestPkiClient,
    token: Option<String>,
    signature: Option<Vec<u8>>,
    certificate: Option<PKCertificate>,
}

impl PadesSignatureFinisher {
    pub fn new(client: RestPkiClient) -> Self {
        Self {
            client,
            token: None,
            signature: None,
            certificate: None,
        }
    }

    pub fn set_token(&mut self, token: impl Into<String>) -> &mut Self {
        self.token = Some(token.into());
        self
    }

    /// Signature bytes produced locally. When set, the completion uses the
    /// `SignedBytes` call instead of the Web PKI `Finalize` call.
    pub fn set_signature(&mut self, signature: impl Into<Vec<u8>>) -> &mut Self {
        self.signature = Some(signature.into());
        self
    }

    /// Finalizes the operation and returns the signed PDF bytes.
    pub async fn finish(&mut self) -> Result<Vec<u8>, Error> {
        let token = self
            .token
            .as_deref()
            .ok_or(Error::MissingParameter("token"))?;

        let response: PadesCompleteResponseRestDTO =
            complete(&self.client, API_PATH, token, self.signature.as_deref()).await?;

        self.certificate = Some(response.certificate);
        crate::util::from_base64(&response.signed_pdf)
    }

    /// Certificate used by the signer; only available after `finish`.
    pub fn certificate(&self) -> Result<&PKCertificate, Error> {
        self.certificate
            .as_ref()
            .ok_or(Error::NotCompleted("the signer certificate"))
    }
}

#[derive(Copy, Clone, Debug, Serialize, Deserialize)]
pub enum PadesMeasurementUnits {
    Centimeters,
    PdfPoints,
}

#[skip_serializing_none]
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PadesVisualRepresentation {
    pub text: Option<PadesVisualText>,
    pub image: Option<PadesVisualImage>,
    pub position: Option<PadesVisualPositioning>,
}

/// Text section of the visual representation. The template may reference
/// certificate fields with `{{signerName}}` and `{{signerNationalId}}`
/// tags, substituted by the service.
#[skip_serializing_none]
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PadesVisualText {
    pub text: Option<String>,
    pub include_signing_time: Option<bool>,
    pub horizontal_align: Option<PadesHorizontalAlign>,
    pub container: Option<PadesVisualRectangle>,
}

#[skip_serializing_none]
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PadesVisualImage {
    pub resource: Option<ResourceContent>,
    /// 0 is fully transparent, 100 fully opaque.
    pub opacity: Option<i32>,
    pub horizontal_align: Option<PadesHorizontalAlign>,
    pub vertical_align: Option<PadesVerticalAlign>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceContent {
    /// Base64-encoded content.
    pub content: String,
    pub mime_type: String,
}

impl ResourceContent {
    pub fn from_bytes(content: &[u8], mime_type: impl Into<String>) -> Result<Self, Error> {
        Ok(Self {
            content: to_base64(content)?,
            mime_type: mime_type.into(),
        })
    }
}

#[derive(Copy, Clone, Debug, Serialize, Deserialize)]
pub enum PadesHorizontalAlign {
    Left,
    Center,
    Right,
}

#[derive(Copy, Clone, Debug, Serialize, Deserialize)]
pub enum PadesVerticalAlign {
    Top,
    Center,
    Bottom,
}

/// Placement of the visual representation: either `auto` (signatures laid
/// out inside a container, wrapping into rows) or `manual` (an explicit
/// rectangle). Page number 0 appends a new page; negative values count
/// from the end of the document (-1 is the last page).
#[skip_serializing_none]
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PadesVisualPositioning {
    pub page_number: Option<i32>,
    pub measurement_units: Option<PadesMeasurementUnits>,
    pub auto: Option<PadesVisualAutoPositioning>,
    pub manual: Option<PadesVisualManualPositioning>,
}

#[skip_serializing_none]
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PadesVisualAutoPositioning {
    pub container: Option<PadesVisualRectangle>,
    pub signature_rectangle_size: Option<PadesSize>,
    pub row_spacing: Option<f64>,
}

#[skip_serializing_none]
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PadesVisualManualPositioning {
    pub left: Option<f64>,
    pub top: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub bottom: Option<f64>,
}

#[skip_serializing_none]
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PadesVisualRectangle {
    pub left: Option<f64>,
    pub top: Option<f64>,
    pub right: Option<f64>,
    pub bottom: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PadesSize {
    pub width: f64,
    pub height: f64,
}

/// Positioning presets computed by the service, customizable after fetch.
pub struct PadesVisualPositioningPresets;

impl PadesVisualPositioningPresets {
    /// Signatures ordered as a footnote of the last page.
    pub async fn footnote(client: &RestPkiClient) -> Result<PadesVisualPositioning, Error> {
        Self::fetch(client, "Footnote", None, None).await
    }

    pub async fn footnote_on_page(
        client: &RestPkiClient,
        page_number: i32,
        rows: Option<u32>,
    ) -> Result<PadesVisualPositioning, Error> {
        Self::fetch(client, "Footnote", Some(page_number), rows).await
    }

    /// Signatures placed on a new page appended to the document.
    pub async fn new_page(client: &RestPkiClient) -> Result<PadesVisualPositioning, Error> {
        Self::fetch(client, "NewPage", None, None).await
    }

    async fn fetch(
        client: &RestPkiClient,
        preset: &str,
        page_number: Option<i32>,
        rows: Option<u32>,
    ) -> Result<PadesVisualPositioning, Error> {
        let mut path = format!("Api/PadesVisualPositioningPresets/{preset}");

        let mut query = vec![];
        if let Some(page_number) = page_number {
            query.push(format!("pageNumber={page_number}"));
        }
        if let Some(rows) = rows {
            query.push(format!("rows={rows}"));
        }
        if !query.is_empty() {
            path.push('?');
            path.push_str(&query.join("&"));
        }

        client.get_json(&path).await
    }
}
