use axum::Json;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use rest_pki::signature::cades::{CadesSignatureFinisher, CadesSignatureStarter};
use rest_pki::standards::{StandardSecurityContexts, StandardSignaturePolicies};

use crate::dto::common::{SignedDocumentResponseRestDTO, decode_upload, token_response};
use crate::dto::error::ApiError;
use crate::endpoint::cades::dto::StartCadesSignatureRequestRestDTO;
use crate::router::AppState;
use crate::samples::SAMPLE_PDF;
use crate::storage;

pub(crate) async fn start_cades_signature(
    state: State<AppState>,
    request: Option<Json<StartCadesSignatureRequestRestDTO>>,
) -> Result<Response, ApiError> {
    let request = request.map(|Json(request)| request).unwrap_or_default();

    let mut starter = CadesSignatureStarter::new(state.client.clone());
    starter
        .set_signature_policy(
            request
                .signature_policy_id
                .unwrap_or(StandardSignaturePolicies::CADES_BES),
        )
        .set_security_context(
            request
                .security_context_id
                .unwrap_or(StandardSecurityContexts::LACUNA_TEST),
        );

    match decode_upload(request.cms_to_co_sign)? {
        Some(cms) => {
            starter.set_cms_to_co_sign(cms);
        }
        None => {
            let content =
                decode_upload(request.file_to_sign)?.unwrap_or_else(|| SAMPLE_PDF.to_vec());
            starter.set_content_to_sign(content);
        }
    }

    if let Some(encapsulate) = request.encapsulate_content {
        starter.set_encapsulate_content(encapsulate);
    }

    let token = starter.start_with_web_pki().await?;

    Ok(token_response(token))
}

pub(crate) async fn complete_cades_signature(
    state: State<AppState>,
    Path(token): Path<String>,
) -> Result<Response, ApiError> {
    let mut finisher = CadesSignatureFinisher::new(state.client.clone());
    finisher.set_token(token);

    let cms = finisher.finish().await?;
    let certificate = finisher.certificate()?.clone();

    let filename = storage::store(&state.config.app_data_dir, "p7s", &cms).await?;

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

    use crate::test_utilities::{empty_post, json_request, response_json, test_app};

    #[tokio::test]
    async fn start_signs_bundled_sample_by_default() {
        // given
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/Api/CadesSignatures"))
            .and(body_partial_json(json!({
                "signaturePolicyId": "a4522485-c9e5-46c3-950b-0d6e951e17d1"
            })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "token": "cades-token" })),
            )
            .expect(1)
            .mount(&mock_server)
            .await;
        let (app, _app_data) = test_app(&mock_server);

        // when
        let response = app
            .oneshot(empty_post("/api/signature/cades/v1"))
            .await
            .unwrap();

        // then
        assert_eq!(response.status(), 200);
        let body = response_json(response).await;
        assert_eq!(body["token"], "cades-token");
    }

    #[tokio::test]
    async fn co_signing_a_cms_needs_no_content() {
        // given
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/Api/CadesSignatures"))
            .and(body_partial_json(json!({ "cmsToCoSign": "Y21zLWJ5dGVz" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token": "t" })))
            .expect(1)
            .mount(&mock_server)
            .await;
        let (app, _app_data) = test_app(&mock_server);

        // when
        let response = app
            .oneshot(json_request(
                "/api/signature/cades/v1",
                json!({ "cmsToCoSign": "Y21zLWJ5dGVz" }),
            ))
            .await
            .unwrap();

        // then
        assert_eq!(response.status(), 200);
    }

    #[tokio::test]
    async fn complete_stores_cms_for_download() {
        // given
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/Api/CadesSignatures/cades-token/Finalize"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "cms": "Y21zLWJ5dGVz",
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
            .oneshot(empty_post("/api/signature/cades/v1/cades-token/complete"))
            .await
            .unwrap();

        // then
        assert_eq!(response.status(), 200);
        let body = response_json(response).await;
        let filename = body["filename"].as_str().unwrap();
        assert!(filename.ends_with(".p7s"));
        assert_eq!(
            std::fs::read(app_data.path().join(filename)).unwrap(),
            b"cms-bytes"
        );
    }
}
