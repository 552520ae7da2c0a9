use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::authentication::Authentication;
use crate::error::Error;
use crate::http;
use crate::http::reqwest_client::ReqwestClient;
use crate::http::{HttpClient, Method, Response};
use crate::validation::ValidationResults;

/// Entry point of the SDK. Holds the service endpoint and the API access
/// token and performs the authenticated JSON calls on behalf of the
/// starters and finishers.
///
/// The API access token identifies your application towards the service;
/// it must not be confused with the per-operation tokens returned by the
/// start calls.
#[derive(Clone)]
pub struct RestPkiClient {
    endpoint: Url,
    access_token: String,
    http_client: Arc<dyn HttpClient>,
}

impl RestPkiClient {
    pub fn new(endpoint: &str, access_token: impl Into<String>) -> Result<Self, Error> {
        Self::with_http_client(endpoint, access_token, Arc::new(ReqwestClient::default()))
    }

    pub fn with_http_client(
        endpoint: &str,
        access_token: impl Into<String>,
        http_client: Arc<dyn HttpClient>,
    ) -> Result<Self, Error> {
        // relative joins drop the last path segment unless the base ends
        // with a slash
        let endpoint = if endpoint.ends_with('/') {
            Url::parse(endpoint)?
        } else {
            Url::parse(&format!("{endpoint}/"))?
        };

        Ok(Self {
            endpoint,
            access_token: access_token.into(),
            http_client,
        })
    }

    pub fn authentication(&self) -> Authentication {
        Authentication::new(self.clone())
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let url = self.api_url(path)?;
        let response = self
            .http_client
            .get(&url)
            .bearer_auth(&self.access_token)
            .send()
            .await
            .map_err(|error| unreachable_error(Method::Get, &url, error))?;

        Ok(self.check_response(response)?.json()?)
    }

    pub(crate) async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let url = self.api_url(path)?;
        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&self.access_token)
            .json(body)?
            .send()
            .await
            .map_err(|error| unreachable_error(Method::Post, &url, error))?;

        Ok(self.check_response(response)?.json()?)
    }

    /// POST without a request body, used by the `Finalize` calls.
    pub(crate) async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let url = self.api_url(path)?;
        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&self.access_token)
            .send()
            .await
            .map_err(|error| unreachable_error(Method::Post, &url, error))?;

        Ok(self.check_response(response)?.json()?)
    }

    fn api_url(&self, path: &str) -> Result<String, Error> {
        Ok(self.endpoint.join(path)?.to_string())
    }

    /// Maps non-2xx responses onto the error surface: HTTP 422 carries a
    /// service error object, where the code `ValidationError` additionally
    /// carries a validation-results tree; anything else is a plain HTTP
    /// failure.
    fn check_response(&self, response: Response) -> Result<Response, Error> {
        if response.status.is_success() {
            return Ok(response);
        }

        let model: ErrorResponseRestDTO =
            serde_json::from_slice(&response.body).unwrap_or_default();

        if response.status.0 == 422
            && let Some(code) = model.code.filter(|code| !code.is_empty())
        {
            if code == "ValidationError"
                && let Some(results) = model.validation_results
            {
                return Err(Error::Validation(results));
            }

            return Err(Error::Api {
                verb: response.method,
                url: response.url,
                code,
                detail: model.detail,
            });
        }

        Err(Error::Http {
            verb: response.method,
            url: response.url,
            status: response.status,
            message: model.message,
        })
    }
}

fn unreachable_error(verb: Method, url: &str, error: http::Error) -> Error {
    match error {
        http::Error::Transport(cause) => Error::Unreachable {
            verb,
            url: url.to_string(),
            cause,
        },
        other => Error::Transport(other),
    }
}

/// Error body shape shared by all endpoints.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorResponseRestDTO {
    code: Option<String>,
    detail: Option<String>,
    message: Option<String>,
    validation_results: Option<ValidationResults>,
}
