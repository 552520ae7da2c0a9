use axum::Json;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use ct_codecs::{Base64, Decoder};
use rest_pki::PKCertificate;
use serde::{Deserialize, Serialize};

use crate::dto::error::ApiError;

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponseRestDTO {
    pub token: String,
}

/// A signed document stored for download plus the certificate that
/// produced it.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedDocumentResponseRestDTO {
    pub filename: String,
    pub certificate: PKCertificate,
}

/// Tokens are single-use; the response must never be served from a cache.
pub(crate) fn token_response(token: String) -> Response {
    (
        [(header::CACHE_CONTROL, "no-store")],
        Json(TokenResponseRestDTO { token }),
    )
        .into_response()
}

pub(crate) fn decode_upload(content: Option<String>) -> Result<Option<Vec<u8>>, ApiError> {
    content
        .map(|content| {
            Base64::decode_to_vec(content.trim(), None).map_err(|_| {
                ApiError::BadRequest("the uploaded file is not valid base64".to_string())
            })
        })
        .transpose()
}
