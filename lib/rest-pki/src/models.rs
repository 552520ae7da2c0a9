//! Certificate information returned by the service after an authentication
//! or signature completes. Decoding and validating the certificate happens
//! remotely; these are plain mirrors of the JSON the service sends back.

use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use time::OffsetDateTime;

#[skip_serializing_none]
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PKCertificate {
    pub subject_name: Name,
    pub issuer_name: Name,
    pub email_address: Option<String>,
    pub serial_number: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub validity_start: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub validity_end: OffsetDateTime,
    /// ICP-Brasil specific fields, present when the certificate was issued
    /// under the Brazilian national PKI.
    pub pki_brazil: Option<PkiBrazilCertificateFields>,
}

#[skip_serializing_none]
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Name {
    pub common_name: Option<String>,
    pub organization: Option<String>,
    pub organization_unit: Option<String>,
    pub country: Option<String>,
    pub email_address: Option<String>,
}

#[skip_serializing_none]
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PkiBrazilCertificateFields {
    pub cpf: Option<String>,
    pub cnpj: Option<String>,
    pub responsavel: Option<String>,
    pub company_name: Option<String>,
}

impl PKCertificate {
    /// Display name of the holder, preferring the subject common name.
    pub fn display_name(&self) -> &str {
        self.subject_name
            .common_name
            .as_deref()
            .or(self.email_address.as_deref())
            .unwrap_or("(unknown)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_certificate_with_pki_brazil_fields() {
        let certificate: PKCertificate = serde_json::from_value(serde_json::json!({
            "subjectName": { "commonName": "Pierre de Fermat", "country": "BR" },
            "issuerName": { "commonName": "Lacuna Test CA" },
            "emailAddress": "fermat@example.com",
            "serialNumber": "0A1B2C",
            "validityStart": "2024-01-01T00:00:00Z",
            "validityEnd": "2026-01-01T00:00:00Z",
            "pkiBrazil": { "cpf": "111.111.111-11" }
        }))
        .unwrap();

        assert_eq!(certificate.display_name(), "Pierre de Fermat");
        assert_eq!(
            certificate.pki_brazil.unwrap().cpf.as_deref(),
            Some("111.111.111-11")
        );
    }

    #[test]
    fn display_name_falls_back_to_email() {
        let certificate: PKCertificate = serde_json::from_value(serde_json::json!({
            "subjectName": {},
            "issuerName": {},
            "emailAddress": "holder@example.com",
            "validityStart": "2024-01-01T00:00:00Z",
            "validityEnd": "2026-01-01T00:00:00Z"
        }))
        .unwrap();

        assert_eq!(certificate.display_name(), "holder@example.com");
    }
}
