//! The four signature flavors (PAdES, CAdES, full XML, XML element) share
//! one lifecycle: a starter accumulates the signature intent and POSTs it,
//! yielding a per-operation token; a finisher holds that token, optionally
//! together with locally produced signature bytes, and POSTs the
//! completion call that returns the finished artifact.

pub mod cades;
pub mod pades;
pub mod xml;

pub(crate) mod dto;

use serde::Serialize;
use serde::de::DeserializeOwned;
use strum::Display;

use crate::client::RestPkiClient;
use crate::error::Error;
use crate::models::PKCertificate;
use crate::signature::dto::{SignatureStartResponseRestDTO, SignedBytesRequestRestDTO};
use crate::util::{from_base64, to_base64};

/// Digest algorithm the service picked for the operation, identified on
/// the wire by its OID.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Display)]
pub enum DigestAlgorithm {
    #[strum(serialize = "MD5")]
    Md5,
    #[strum(serialize = "SHA-1")]
    Sha1,
    #[strum(serialize = "SHA-256")]
    Sha256,
    #[strum(serialize = "SHA-384")]
    Sha384,
    #[strum(serialize = "SHA-512")]
    Sha512,
}

impl DigestAlgorithm {
    pub fn from_oid(oid: &str) -> Result<Self, Error> {
        match oid {
            "1.2.840.113549.2.5" => Ok(Self::Md5),
            "1.3.14.3.2.26" => Ok(Self::Sha1),
            "2.16.840.1.101.3.4.2.1" => Ok(Self::Sha256),
            "2.16.840.1.101.3.4.2.2" => Ok(Self::Sha384),
            "2.16.840.1.101.3.4.2.3" => Ok(Self::Sha512),
            other => Err(Error::UnknownDigestAlgorithmOid(other.to_string())),
        }
    }

    pub fn oid(&self) -> &'static str {
        match self {
            Self::Md5 => "1.2.840.113549.2.5",
            Self::Sha1 => "1.3.14.3.2.26",
            Self::Sha256 => "2.16.840.1.101.3.4.2.1",
            Self::Sha384 => "2.16.840.1.101.3.4.2.2",
            Self::Sha512 => "2.16.840.1.101.3.4.2.3",
        }
    }

    /// Name of the RSA signature algorithm to feed into the local signing
    /// step when holding the private key yourself.
    pub fn signature_algorithm(&self) -> &'static str {
        match self {
            Self::Md5 => "RSA-MD5",
            Self::Sha1 => "RSA-SHA1",
            Self::Sha256 => "RSA-SHA256",
            Self::Sha384 => "RSA-SHA384",
            Self::Sha512 => "RSA-SHA512",
        }
    }
}

/// Parameters returned by a start call made with a known signer
/// certificate. `to_sign_data` (or its pre-computed `to_sign_hash`) is
/// what the caller must sign locally before handing the bytes to the
/// flavor's finisher.
#[derive(Clone, Debug)]
pub struct SignatureStartResult {
    pub token: String,
    pub to_sign_data: Vec<u8>,
    pub to_sign_hash: Vec<u8>,
    pub digest_algorithm: DigestAlgorithm,
    pub digest_algorithm_oid: String,
    pub certificate: Option<PKCertificate>,
}

impl SignatureStartResult {
    pub fn signature_algorithm(&self) -> &'static str {
        self.digest_algorithm.signature_algorithm()
    }
}

/// POSTs the start DTO and keeps only the token (Web PKI flow; the
/// browser component performs the signature).
pub(crate) async fn start_for_token<B: Serialize>(
    client: &RestPkiClient,
    path: &str,
    request: &B,
) -> Result<String, Error> {
    let response: SignatureStartResponseRestDTO = client.post_json(path, request).await?;
    Ok(response.token)
}

/// POSTs the start DTO of an operation whose signer certificate is already
/// known and decodes the signature parameters for the local signing step.
pub(crate) async fn start_for_params<B: Serialize>(
    client: &RestPkiClient,
    path: &str,
    request: &B,
) -> Result<SignatureStartResult, Error> {
    let response: SignatureStartResponseRestDTO = client.post_json(path, request).await?;

    let to_sign_data = response
        .to_sign_data
        .ok_or(Error::MissingResponseField("toSignData"))?;
    let to_sign_hash = response
        .to_sign_hash
        .ok_or(Error::MissingResponseField("toSignHash"))?;
    let digest_algorithm_oid = response
        .digest_algorithm_oid
        .ok_or(Error::MissingResponseField("digestAlgorithmOid"))?;

    Ok(SignatureStartResult {
        token: response.token,
        to_sign_data: from_base64(&to_sign_data)?,
        to_sign_hash: from_base64(&to_sign_hash)?,
        digest_algorithm: DigestAlgorithm::from_oid(&digest_algorithm_oid)?,
        digest_algorithm_oid,
        certificate: response.certificate,
    })
}

/// Completion call shared by the finishers: `SignedBytes` when signature
/// bytes were produced locally, `Finalize` otherwise.
pub(crate) async fn complete<T: DeserializeOwned>(
    client: &RestPkiClient,
    base_path: &str,
    token: &str,
    signature: Option<&[u8]>,
) -> Result<T, Error> {
    match signature {
        Some(signature) => {
            let request = SignedBytesRequestRestDTO {
                signature: to_base64(signature)?,
            };
            client
                .post_json(&format!("{base_path}/{token}/SignedBytes"), &request)
                .await
        }
        None => client.post_empty(&format!("{base_path}/{token}/Finalize")).await,
    }
}
