//! Certificate-based authentication: the service issues a nonce-bearing
//! token, the Web PKI browser component signs it with the user's
//! certificate, and the finalize call verifies the signature and validates
//! the certificate against the chosen security context.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::client::RestPkiClient;
use crate::error::Error;
use crate::models::PKCertificate;
use crate::validation::ValidationResults;

pub struct Authentication {
    client: RestPkiClient,
    certificate: Option<PKCertificate>,
}

impl Authentication {
    pub(crate) fn new(client: RestPkiClient) -> Self {
        Self {
            client,
            certificate: None,
        }
    }

    /// Starts the authentication, yielding the token to pass to the Web
    /// PKI component. Each token is valid for a single attempt.
    pub async fn start_with_web_pki(&self, security_context_id: Uuid) -> Result<String, Error> {
        let request = StartAuthenticationRequestRestDTO {
            security_context_id,
        };
        let response: StartAuthenticationResponseRestDTO =
            self.client.post_json("Api/Authentications", &request).await?;

        Ok(response.token)
    }

    /// Completes the authentication. The returned validation results state
    /// whether the certificate is valid under the chosen security context;
    /// the certificate itself becomes available on success.
    pub async fn complete_with_web_pki(
        &mut self,
        token: &str,
    ) -> Result<ValidationResults, Error> {
        let response: CompleteAuthenticationResponseRestDTO = self
            .client
            .post_empty(&format!("Api/Authentications/{token}/Finalize"))
            .await?;

        self.certificate = Some(response.certificate);
        Ok(response.validation_results)
    }

    /// Certificate of the authenticated user; only available after
    /// `complete_with_web_pki`.
    pub fn certificate(&self) -> Result<&PKCertificate, Error> {
        self.certificate
            .as_ref()
            .ok_or(Error::NotCompleted("the user certificate"))
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StartAuthenticationRequestRestDTO {
    security_context_id: Uuid,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StartAuthenticationResponseRestDTO {
    token: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CompleteAuthenticationResponseRestDTO {
    certificate: PKCertificate,
    validation_results: ValidationResults,
}
