//! Client SDK for the REST PKI remote digital-signature service.
//!
//! The service performs the heavy lifting (certificate validation and
//! PAdES/CAdES/XAdES construction) remotely; this crate marshals the
//! signature intent into the service's JSON API, drives the
//! start/complete lifecycle and decodes the finished artifacts.

pub mod authentication;
pub mod client;
pub mod error;
pub mod http;
pub mod models;
pub mod signature;
pub mod standards;
pub mod validation;

pub(crate) mod util;

pub use client::RestPkiClient;
pub use error::Error;
pub use models::PKCertificate;
pub use validation::{ValidationItem, ValidationResults};
