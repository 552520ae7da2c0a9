//! CAdES (CMS) signatures, covering both signing fresh content and
//! co-signing an existing CMS.

use std::path::Path;

use uuid::Uuid;

use crate::client::RestPkiClient;
use crate::error::Error;
use crate::models::PKCertificate;
use crate::signature::dto::{CadesCompleteResponseRestDTO, CadesSignatureStartRequestRestDTO};
use crate::signature::{SignatureStartResult, complete, start_for_params, start_for_token};
use crate::util::{from_base64, to_base64};

const API_PATH: &str = "Api/CadesSignatures";

/// Accumulates the elements of a CAdES signature.
///
/// Exactly one of the content to sign or a CMS to co-sign must be set;
/// when co-signing a CMS that encapsulates its content, the service takes
/// the content from the CMS itself.
pub struct CadesSignatureStarter {
    client: RestPkiClient,
    content_to_sign: Option<Vec<u8>>,
    cms_to_co_sign: Option<Vec<u8>>,
    signature_policy_id: Option<Uuid>,
    security_context_id: Option<Uuid>,
    signer_certificate: Option<Vec<u8>>,
    encapsulate_content: Option<bool>,
    callback_argument: Option<String>,
}

impl CadesSignatureStarter {
    pub fn new(client: RestPkiClient) -> Self {
        Self {
            client,
            content_to_sign: None,
            cms_to_co_sign: None,
            signature_policy_id: None,
            security_context_id: None,
            signer_certificate: None,
            encapsulate_content: None,
            callback_argument: None,
        }
    }

    pub fn set_content_to_sign(&mut self, content: impl Into<Vec<u8>>) -> &mut Self {
        self.content_to_sign = Some(content.into());
        self
    }

    pub fn set_content_to_sign_from_file(
        &mut self,
        path: impl AsRef<Path>,
    ) -> std::io::Result<&mut Self> {
        self.content_to_sign = Some(std::fs::read(path)?);
        Ok(self)
    }

    pub fn set_cms_to_co_sign(&mut self, cms: impl Into<Vec<u8>>) -> &mut Self {
        self.cms_to_co_sign = Some(cms.into());
        self
    }

    pub fn set_cms_to_co_sign_from_file(
        &mut self,
        path: impl AsRef<Path>,
    ) -> std::io::Result<&mut Self> {
        self.cms_to_co_sign = Some(std::fs::read(path)?);
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

    pub fn set_signer_certificate(&mut self, certificate: impl Into<Vec<u8>>) -> &mut Self {
        self.signer_certificate = Some(certificate.into());
        self
    }

    /// Whether the resulting CMS should encapsulate the signed content.
    /// When omitted, the service includes the content unless a co-signed
    /// CMS without encapsulated content was given.
    pub fn set_encapsulate_content(&mut self, encapsulate: bool) -> &mut Self {
        self.encapsulate_content = Some(encapsulate);
        self
    }

    pub fn set_callback_argument(&mut self, argument: impl Into<String>) -> &mut Self {
        self.callback_argument = Some(argument.into());
        self
    }

    pub async fn start_with_web_pki(&self) -> Result<String, Error> {
        let request = self.request(None)?;
        start_for_token(&self.client, API_PATH, &request).await
    }

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
    ) -> Result<CadesSignatureStartRequestRestDTO, Error> {
        if self.content_to_sign.is_none() && self.cms_to_co_sign.is_none() {
            return Err(Error::MissingParameter("content to sign or CMS to co-sign"));
        }
        let signature_policy_id = self
            .signature_policy_id
            .ok_or(Error::MissingParameter("signature policy"))?;

        Ok(CadesSignatureStartRequestRestDTO {
            content_to_sign: self
                .content_to_sign
                .as_deref()
                .map(to_base64)
                .transpose()?,
            cms_to_co_sign: self.cms_to_co_sign.as_deref().map(to_base64).transpose()?,
            signature_policy_id,
            security_context_id: self.security_context_id,
            certificate,
            encapsulate_content: self.encapsulate_content,
            callback_argument: self.callback_argument.clone(),
        })
    }
}

/// Completes a CAdES signature and returns the CMS bytes.
pub struct CadesSignatureFinisher {
    client: RestPkiClient,
    token: Option<String>,
    signature: Option<Vec<u8>>,
    certificate: Option<PKCertificate>,
}

impl CadesSignatureFinisher {
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

    pub fn set_signature(&mut self, signature: impl Into<Vec<u8>>) -> &mut Self {
        self.signature = Some(signature.into());
        self
    }

    pub async fn finish(&mut self) -> Result<Vec<u8>, Error> {
        let token = self
            .token
            .as_deref()
            .ok_or(Error::MissingParameter("token"))?;

        let response: CadesCompleteResponseRestDTO =
            complete(&self.client, API_PATH, token, self.signature.as_deref()).await?;

        self.certificate = Some(response.certificate);
        from_base64(&response.cms)
    }

    /// Certificate used by the signer; only available after `finish`.
    pub fn certificate(&self) -> Result<&PKCertificate, Error> {
        self.certificate
            .as_ref()
            .ok_or(Error::NotCompleted("the signer certificate"))
    }
}
