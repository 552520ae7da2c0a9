//! XAdES/XmlDSig signatures: signing the whole document or one element
//! identified by its ID.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use uuid::Uuid;

use crate::client::RestPkiClient;
use crate::error::Error;
use crate::models::PKCertificate;
use crate::signature::dto::{XmlCompleteResponseRestDTO, XmlSignatureStartRequestRestDTO};
use crate::signature::{SignatureStartResult, complete, start_for_params, start_for_token};
use crate::util::{from_base64, to_base64};

const API_PATH: &str = "Api/XmlSignatures";

/// Where to insert the signature node relative to the element matched by
/// the XPath expression.
#[derive(Copy, Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum XmlInsertionOption {
    AppendChild,
    PrependChild,
    AppendSibling,
    PrependSibling,
}

#[skip_serializing_none]
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct XmlSignatureElementLocationRestDTO {
    #[serde(rename = "xPath")]
    pub x_path: String,
    pub insertion_option: XmlInsertionOption,
    pub namespaces: Option<Vec<NamespaceRestDTO>>,
}

#[derive(Clone, Debug, Serialize)]
pub(crate) struct NamespaceRestDTO {
    pub prefix: String,
    pub uri: String,
}

/// Signs the whole XML document (enveloped signature). The signature node
/// is appended to the root element unless a location is given.
pub struct FullXmlSignatureStarter {
    client: RestPkiClient,
    xml: Option<Vec<u8>>,
    element_location: Option<XmlSignatureElementLocationRestDTO>,
    signature_policy_id: Option<Uuid>,
    security_context_id: Option<Uuid>,
    signer_certificate: Option<Vec<u8>>,
    callback_argument: Option<String>,
}

impl FullXmlSignatureStarter {
    pub fn new(client: RestPkiClient) -> Self {
        Self {
            client,
            xml: None,
            element_location: None,
            signature_policy_id: None,
            security_context_id: None,
            signer_certificate: None,
            callback_argument: None,
        }
    }

    pub fn set_xml(&mut self, xml: impl Into<Vec<u8>>) -> &mut Self {
        self.xml = Some(xml.into());
        self
    }

    pub fn set_xml_from_file(&mut self, path: impl AsRef<Path>) -> std::io::Result<&mut Self> {
        self.xml = Some(std::fs::read(path)?);
        Ok(self)
    }

    /// Element (XPath) next to which the signature node is inserted, with
    /// the namespace prefixes the expression uses.
    pub fn set_signature_element_location(
        &mut self,
        xpath: impl Into<String>,
        insertion_option: XmlInsertionOption,
        namespaces: HashMap<String, String>,
    ) -> &mut Self {
        let namespaces = if namespaces.is_empty() {
            None
        } else {
            Some(
                namespaces
                    .into_iter()
                    .map(|(prefix, uri)| NamespaceRestDTO { prefix, uri })
                    .collect(),
            )
        };

        self.element_location = Some(XmlSignatureElementLocationRestDTO {
            x_path: xpath.into(),
            insertion_option,
            namespaces,
        });
        self
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

    pub fn set_callback_argument(&mut self, argument: impl Into<String>) -> &mut Self {
        self.callback_argument = Some(argument.into());
        self
    }

    pub async fn start_with_web_pki(&self) -> Result<String, Error> {
        let request = self.request(None)?;
        start_for_token(&self.client, &format!("{API_PATH}/FullXmlSignature"), &request).await
    }

    pub async fn start(&self) -> Result<SignatureStartResult, Error> {
        let certificate = self
            .signer_certificate
            .as_deref()
            .ok_or(Error::MissingParameter("signer certificate"))?;

        let request = self.request(Some(to_base64(certificate)?))?;
        start_for_params(&self.client, &format!("{API_PATH}/FullXmlSignature"), &request).await
    }

    fn request(
        &self,
        certificate: Option<String>,
    ) -> Result<XmlSignatureStartRequestRestDTO, Error> {
        let xml = self.xml.as_deref().ok_or(Error::MissingParameter("XML"))?;
        let signature_policy_id = self
            .signature_policy_id
            .ok_or(Error::MissingParameter("signature policy"))?;

        Ok(XmlSignatureStartRequestRestDTO {
            xml: to_base64(xml)?,
            element_to_sign_id: None,
            signature_element_location: self.element_location.clone(),
            signature_policy_id,
            security_context_id: self.security_context_id,
            certificate,
            callback_argument: self.callback_argument.clone(),
        })
    }
}

/// Signs one element of the XML document, identified by its `Id`
/// attribute (the NFe model, among others).
pub struct XmlElementSignatureStarter {
    client: RestPkiClient,
    xml: Option<Vec<u8>>,
    element_to_sign_id: Option<String>,
    signature_policy_id: Option<Uuid>,
    security_context_id: Option<Uuid>,
    signer_certificate: Option<Vec<u8>>,
    callback_argument: Option<String>,
}

impl XmlElementSignatureStarter {
    pub fn new(client: RestPkiClient) -> Self {
        Self {
            client,
            xml: None,
            element_to_sign_id: None,
            signature_policy_id: None,
            security_context_id: None,
            signer_certificate: None,
            callback_argument: None,
        }
    }

    pub fn set_xml(&mut self, xml: impl Into<Vec<u8>>) -> &mut Self {
        self.xml = Some(xml.into());
        self
    }

    pub fn set_xml_from_file(&mut self, path: impl AsRef<Path>) -> std::io::Result<&mut Self> {
        self.xml = Some(std::fs::read(path)?);
        Ok(self)
    }

    pub fn set_element_to_sign(&mut self, element_id: impl Into<String>) -> &mut Self {
        self.element_to_sign_id = Some(element_id.into());
        self
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

    pub fn set_callback_argument(&mut self, argument: impl Into<String>) -> &mut Self {
        self.callback_argument = Some(argument.into());
        self
    }

    pub async fn start_with_web_pki(&self) -> Result<String, Error> {
        let request = self.request(None)?;
        start_for_token(
            &self.client,
            &format!("{API_PATH}/XmlElementSignature"),
            &request,
        )
        .await
    }

    pub async fn start(&self) -> Result<SignatureStartResult, Error> {
        let certificate = self
            .signer_certificate
            .as_deref()
            .ok_or(Error::MissingParameter("signer certificate"))?;

        let request = self.request(Some(to_base64(certificate)?))?;
        start_for_params(
            &self.client,
            &format!("{API_PATH}/XmlElementSignature"),
            &request,
        )
        .await
    }

    fn request(
        &self,
        certificate: Option<String>,
    ) -> Result<XmlSignatureStartRequestRestDTO, Error> {
        let xml = self.xml.as_deref().ok_or(Error::MissingParameter("XML"))?;
        let element_to_sign_id = self
            .element_to_sign_id
            .clone()
            .ok_or(Error::MissingParameter("element to sign"))?;
        let signature_policy_id = self
            .signature_policy_id
            .ok_or(Error::MissingParameter("signature policy"))?;

        Ok(XmlSignatureStartRequestRestDTO {
            xml: to_base64(xml)?,
            element_to_sign_id: Some(element_to_sign_id),
            signature_element_location: None,
            signature_policy_id,
            security_context_id: self.security_context_id,
            certificate,
            callback_argument: self.callback_argument.clone(),
        })
    }
}

/// Completes either XML signature flavor and returns the signed XML.
pub struct XmlSignatureFinisher {
    client: RestPkiClient,
    token: Option<String>,
    signature: Option<Vec<u8>>,
    certificate: Option<PKCertificate>,
}

impl XmlSignatureFinisher {
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

        let response: XmlCompleteResponseRestDTO =
            complete(&self.client, API_PATH, token, self.signature.as_deref()).await?;

        self.certificate = Some(response.certificate);
        from_base64(&response.signed_xml)
    }

    /// Certificate used by the signer; only available after `finish`.
    pub fn certificate(&self) -> Result<&PKCertificate, Error> {
        self.certificate
            .as_ref()
            .ok_or(Error::NotCompleted("the signer certificate"))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::standards::{StandardSecurityContexts, StandardSignaturePolicies};

    const SAMPLE_XML: &[u8] = b"<?xml version=\"1.0\"?><invoice/>";

    async fn client(mock_server: &MockServer) -> RestPkiClient {
        RestPkiClient::new(&mock_server.uri(), "access-token").unwrap()
    }

    #[tokio::test]
    async fn full_signature_posts_element_location() {
        // given
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/Api/XmlSignatures/FullXmlSignature"))
            .and(body_partial_json(json!({
                "xml": to_base64(SAMPLE_XML).unwrap(),
                "signatureElementLocation": {
                    "xPath": "//ls:signaturePlaceholder",
                    "insertionOption": "appendChild",
                    "namespaces": [
                        { "prefix": "ls", "uri": "http://www.lacunasoftware.com/sample" }
                    ]
                }
            })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "token": "xml-token" })),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let mut starter = FullXmlSignatureStarter::new(client(&mock_server).await);
        starter
            .set_xml(SAMPLE_XML)
            .set_signature_element_location(
                "//ls:signaturePlaceholder",
                XmlInsertionOption::AppendChild,
                HashMap::from([(
                    "ls".to_string(),
                    "http://www.lacunasoftware.com/sample".to_string(),
                )]),
            )
            .set_signature_policy(StandardSignaturePolicies::XADES_BES)
            .set_security_context(StandardSecurityContexts::PKI_BRAZIL);

        // when
        let token = starter.start_with_web_pki().await.unwrap();

        // then
        assert_eq!(token, "xml-token");
    }

    #[tokio::test]
    async fn element_signature_requires_the_element_id() {
        let mock_server = MockServer::start().await;
        let mut starter = XmlElementSignatureStarter::new(client(&mock_server).await);
        starter
            .set_xml(SAMPLE_XML)
            .set_signature_policy(StandardSignaturePolicies::PKI_BRAZIL_NFE_PADRAO_NACIONAL);

        let result = starter.start_with_web_pki().await;

        assert!(matches!(
            result.unwrap_err(),
            Error::MissingParameter("element to sign")
        ));
    }

    #[tokio::test]
    async fn element_signature_posts_element_id() {
        // given
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/Api/XmlSignatures/XmlElementSignature"))
            .and(body_partial_json(json!({
                "elementToSignId": "NFe35141214314050000662550010001084271182362300",
            })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "token": "nfe-token" })),
            )
            .mount(&mock_server)
            .await;

        let mut starter = XmlElementSignatureStarter::new(client(&mock_server).await);
        starter
            .set_xml(SAMPLE_XML)
            .set_element_to_sign("NFe35141214314050000662550010001084271182362300")
            .set_signature_policy(StandardSignaturePolicies::PKI_BRAZIL_NFE_PADRAO_NACIONAL);

        // when
        let token = starter.start_with_web_pki().await.unwrap();

        // then
        assert_eq!(token, "nfe-token");
    }

    #[tokio::test]
    async fn finish_returns_signed_xml() {
        // given
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/Api/XmlSignatures/xml-token/Finalize"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "signedXml": to_base64(b"<signed/>").unwrap(),
                "certificate": {
                    "subjectName": { "commonName": "Pierre de Fermat" },
                    "issuerName": { "commonName": "Lacuna Test CA" },
                    "validityStart": "2024-01-01T00:00:00Z",
                    "validityEnd": "2026-01-01T00:00:00Z"
                }
            })))
            .mount(&mock_server)
            .await;

        let mut finisher = XmlSignatureFinisher::new(client(&mock_server).await);
        finisher.set_token("xml-token");

        // when
        let signed_xml = finisher.finish().await.unwrap();

        // then
        assert_eq!(signed_xml, b"<signed/>");
        assert_eq!(
            finisher.certificate().unwrap().display_name(),
            "Pierre de Fermat"
        );
    }
}
