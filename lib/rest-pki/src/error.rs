use thiserror::Error;

use crate::http;
use crate::http::{Method, StatusCode};
use crate::validation::ValidationResults;

/// Failures reported by the REST PKI service or raised locally before a
/// request is made.
#[derive(Debug, Error)]
pub enum Error {
    #[error("REST action {verb} {url} unreachable: {cause}")]
    Unreachable {
        verb: Method,
        url: String,
        cause: String,
    },

    #[error("REST action {verb} {url} returned HTTP error {status}{}", format_optional(.message))]
    Http {
        verb: Method,
        url: String,
        status: StatusCode,
        message: Option<String>,
    },

    #[error("REST PKI action {verb} {url} error: {code}{}", format_parenthesized(.detail))]
    Api {
        verb: Method,
        url: String,
        code: String,
        detail: Option<String>,
    },

    #[error("{0}")]
    Validation(ValidationResults),

    #[error(transparent)]
    Transport(#[from] http::Error),

    #[error("Base64 error: `{0}`")]
    Base64(ct_codecs::Error),

    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("unknown digest algorithm OID: {0}")]
    UnknownDigestAlgorithmOid(String),

    #[error("service response is missing the `{0}` field")]
    MissingResponseField(&'static str),

    #[error("required parameter not set: {0}")]
    MissingParameter(&'static str),

    #[error("{0} is only available after the operation has completed")]
    NotCompleted(&'static str),
}

fn format_optional(message: &Option<String>) -> String {
    match message {
        Some(message) if !message.is_empty() => format!(": {message}"),
        _ => String::new(),
    }
}

fn format_parenthesized(detail: &Option<String>) -> String {
    match detail {
        Some(detail) if !detail.is_empty() => format!(" ({detail})"),
        _ => String::new(),
    }
}

impl Error {
    /// The validation results attached to a `Validation` error, if any.
    pub fn validation_results(&self) -> Option<&ValidationResults> {
        match self {
            Self::Validation(results) => Some(results),
            _ => None,
        }
    }
}
