use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use rest_pki::ValidationResults;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use thiserror::Error;

#[skip_serializing_none]
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponseRestDTO {
    pub message: String,
    pub code: Option<String>,
    pub validation_results: Option<ValidationResults>,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    RestPki(#[from] rest_pki::Error),
    #[error("invalid request: {0}")]
    BadRequest(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            // the certificate failed the upstream checks, not our fault nor
            // the service's; report the full tree to the caller
            ApiError::RestPki(rest_pki::Error::Validation(results)) => error_response(
                StatusCode::BAD_REQUEST,
                results.summary(0),
                Some("ValidationError".to_string()),
                Some(results),
            ),
            ApiError::RestPki(error) => {
                let code = match &error {
                    rest_pki::Error::Api { code, .. } => Some(code.to_owned()),
                    _ => None,
                };
                tracing::error!("REST PKI call failed: {error}");
                error_response(StatusCode::BAD_GATEWAY, error.to_string(), code, None)
            }
            ApiError::BadRequest(message) => {
                error_response(StatusCode::BAD_REQUEST, message, None, None)
            }
            ApiError::Io(error) => {
                tracing::error!("Request failed: {error}");
                error_response(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    error.to_string(),
                    None,
                    None,
                )
            }
        }
    }
}

fn error_response(
    status: StatusCode,
    message: String,
    code: Option<String>,
    validation_results: Option<ValidationResults>,
) -> Response {
    (
        status,
        Json(ErrorResponseRestDTO {
            message,
            code,
            validation_results,
        }),
    )
        .into_response()
}
