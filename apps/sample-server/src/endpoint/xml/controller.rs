use axum::Json;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use rest_pki::signature::xml::{
    FullXmlSignatureStarter, XmlElementSignatureStarter, XmlSignatureFinisher,
};
use rest_pki::standards::{StandardSecurityContexts, StandardSignaturePolicies};

use crate::dto::common::{SignedDocumentResponseRestDTO, decode_upload, token_response};
use crate::dto::error::ApiError;
use crate::endpoint::xml::dto::{
    StartFullXmlSignatureRequestRestDTO, StartXmlElementSignatureRequestRestDTO,
};
use crate::router::AppState;
use crate::samples::{SAMPLE_NFE, SAMPLE_NFE_ELEMENT_ID, SAMPLE_XML};
use crate::storage;

pub(crate) async fn start_full_xml_signature(
    state: State<AppState>,
    request: Option<Json<StartFullXmlSignatureRequestRestDTO>>,
) -> Result<Response, ApiError> {
    let request = request.map(|Json(request)| request).unwrap_or_default();

    let xml = decode_upload(request.file_to_sign)?.unwrap_or_else(|| SAMPLE_XML.to_vec());

    let mut starter = FullXmlSignatureStarter::new(state.client.clone());
    starter
        .set_xml(xml)
        .set_signature_policy(
            request
                .signature_policy_id
                .unwrap_or(StandardSignaturePolicies::XADES_BES),
        )
        .set_security_context(
            request
                .security_context_id
                .unwrap_or(StandardSecurityContexts::LACUNA_TEST),
        );

    let token = starter.start_with_web_pki().await?;

    Ok(token_response(token))
}

pub(crate) async fn start_xml_element_signature(
    state: State<AppState>,
    request: Option<Json<StartXmlElementSignatureRequestRestDTO>>,
) -> Result<Response, ApiError> {
    let request = request.map(|Json(request)| request).unwrap_or_default();

    let xml = decode_upload(request.file_to_sign)?.unwrap_or_else(|| SAMPLE_NFE.to_vec());
    let element_id = request
        .element_to_sign_id
        .unwrap_or_else(|| SAMPLE_NFE_ELEMENT_ID.to_string());

    let mut starter = XmlElementSignatureStarter::new(state.client.clone());
    starter
        .set_xml(xml)
        .set_element_to_sign(element_id)
        .set_signature_policy(
            request
                .signature_policy_id
                .unwrap_or(StandardSignaturePolicies::PKI_BRAZIL_NFE_PADRAO_NACIONAL),
        )
        .set_security_context(
            request
                .security_context_id
                .unwrap_or(StandardSecurityContexts::PKI_BRAZIL),
        );

    let token = starter.start_with_web_pki().await?;

    Ok(token_response(token))
}

pub(crate) async fn complete_xml_signature(
    state: State<AppState>,
    Path(token): Path<String>,
) -> Result<Response, ApiError> {
    let mut finisher = XmlSignatureFinisher::new(state.client.clone());
    finisher.set_token(token);

    let signed_xml = finisher.finish().await?;
    let certificate = finisher.certificate()?.clone();

    let filename = storage::store(&state.config.app_data_dir, "xml", &signed_xml).await?;

    Ok(Json(SignedDocumentResponseRestDTO {
        filename,
        certificate,
    })
    .into_response())
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use tower::ServiceExt;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::test_utilities::{empty_post, response_json, test_app};

    #[tokio::test]
    async fn full_signature_signs_bundled_invoice() {
        // given
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/Api/XmlSignatures/FullXmlSignature"))
            .and(body_partial_json(json!({
                "signaturePolicyId": "1beba282-d1b6-4458-8e46-bd8ad6800b54"
            })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "token": "xml-token" })),
            )
            .expect(1)
            .mount(&mock_server)
            .await;
        let (app, _app_data) = test_app(&mock_server);

        // when
        let response = app
            .oneshot(empty_post("/api/signature/xml-full/v1"))
            .await
            .unwrap();

        // then
        assert_eq!(response.status(), 200);
        let body = response_json(response).await;
        assert_eq!(body["token"], "xml-token");
    }

    #[tokio::test]
    async fn element_signature_targets_the_nfe_element() {
        // given
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/Api/XmlSignatures/XmlElementSignature"))
            .and(body_partial_json(json!({
                "elementToSignId": "NFe35141214314050000662550010001084271182362300",
                "signaturePolicyId": "a3c24251-d43a-4ba4-b25d-ee8e2ab24f06"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token": "t" })))
            .expect(1)
            .mount(&mock_server)
            .await;
        let (app, _app_data) = test_app(&mock_server);

        // when
        let response = app
            .oneshot(empty_post("/api/signature/xml-element/v1"))
            .await
            .unwrap();

        // then
        assert_eq!(response.status(), 200);
    }

    #[tokio::test]
    async fn complete_stores_signed_xml_for_download() {
        // given
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/Api/XmlSignatures/xml-token/Finalize"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "signedXml": "PHNpZ25lZC8+",
                "certificate": {
                    "subjectName": { "commonName": "Pierre de Fermat" },
                    "issuerName": { "commonName": "Lacuna Test CA" },
                    "validityStart": "2024-01-01T00:00:00Z",
                    "validityEnd": "2026-01-01T00:00:00Z"
                }
            })))
            .expect(1)
            .mount(&mock_server)
            .await;
        let (app, app_data) = test_app(&mock_server);

        // when
        let response = app
            .oneshot(empty_post("/api/signature/xml/v1/xml-token/complete"))
            .await
            .unwrap();

        // then
        assert_eq!(response.status(), 200);
        let body = response_json(response).await;
        let filename = body["filename"].as_str().unwrap();
        assert!(filename.ends_with(".xml"));
        assert_eq!(
            std::fs::read(app_data.path().join(filename)).unwrap(),
            b"<signed/>"
        );
    }
}
