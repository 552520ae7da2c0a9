use axum::Json;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use rest_pki::standards::StandardSecurityContexts;

use crate::dto::common::token_response;
use crate::dto::error::ApiError;
use crate::endpoint::authentication::dto::{
    CompleteAuthenticationResponseRestDTO, StartAuthenticationRequestRestDTO,
};
use crate::router::AppState;

pub(crate) async fn start_authentication(
    state: State<AppState>,
    request: Option<Json<StartAuthenticationRequestRestDTO>>,
) -> Result<Response, ApiError> {
    let security_context_id = request
        .and_then(|Json(request)| request.security_context_id)
        .unwrap_or(StandardSecurityContexts::LACUNA_TEST);

    let token = state
        .client
        .authentication()
        .start_with_web_pki(security_context_id)
        .await?;

    Ok(token_response(token))
}

pub(crate) async fn complete_authentication(
    state: State<AppState>,
    Path(token): Path<String>,
) -> Result<Response, ApiError> {
    let mut authentication = state.client.authentication();

    let validation_results = authentication.complete_with_web_pki(&token).await?;
    let certificate = authentication.certificate()?.clone();

    Ok(Json(CompleteAuthenticationResponseRestDTO {
        is_valid: validation_results.is_valid(),
        certificate,
        validation_results_text: validation_results.to_string(),
        validation_results,
    })
    .into_response())
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use tower::ServiceExt;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::test_utilities::{empty_post, json_request, response_json, test_app};

    #[tokio::test]
    async fn start_returns_uncacheable_token() {
        // given
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/Api/Authentications"))
            .and(header("Authorization", "Bearer access-token"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "token": "auth-token" })),
            )
            .expect(1)
            .mount(&mock_server)
            .await;
        let (app, _app_data) = test_app(&mock_server);

        // when
        let response = app
            .oneshot(empty_post("/api/authentication/v1"))
            .await
            .unwrap();

        // then
        assert_eq!(response.status(), 200);
        assert_eq!(
            response.headers().get("cache-control").unwrap(),
            "no-store"
        );
        let body = response_json(response).await;
        assert_eq!(body["token"], "auth-token");
    }

    #[tokio::test]
    async fn start_forwards_requested_security_context() {
        // given
        let mock_server = MockServer::start().await;
        let context = "201856ce-273c-4058-a872-8937bd547d36";
        Mock::given(method("POST"))
            .and(path("/Api/Authentications"))
            .and(body_json(json!({ "securityContextId": context })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token": "t" })))
            .expect(1)
            .mount(&mock_server)
            .await;
        let (app, _app_data) = test_app(&mock_server);

        // when
        let response = app
            .oneshot(json_request(
                "/api/authentication/v1",
                json!({ "securityContextId": context }),
            ))
            .await
            .unwrap();

        // then
        assert_eq!(response.status(), 200);
    }

    #[tokio::test]
    async fn complete_reports_validity_and_certificate() {
        // given
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/Api/Authentications/auth-token/Finalize"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "certificate": {
                    "subjectName": { "commonName": "Pierre de Fermat" },
                    "issuerName": { "commonName": "Lacuna Test CA" },
                    "validityStart": "2024-01-01T00:00:00Z",
                    "validityEnd": "2026-01-01T00:00:00Z"
                },
                "validationResults": {
                    "errors": [],
                    "warnings": [],
                    "passedChecks": [
                        { "type": "Signature", "message": "The signature is valid" }
                    ]
                }
            })))
            .expect(1)
            .mount(&mock_server)
            .await;
        let (app, _app_data) = test_app(&mock_server);

        // when
        let response = app
            .oneshot(empty_post("/api/authentication/v1/auth-token/complete"))
            .await
            .unwrap();

        // then
        assert_eq!(response.status(), 200);
        let body = response_json(response).await;
        assert_eq!(body["isValid"], true);
        assert_eq!(body["certificate"]["subjectName"]["commonName"], "Pierre de Fermat");
        assert_eq!(body["validationResults"]["passedChecks"][0]["type"], "Signature");
        assert!(
            body["validationResultsText"]
                .as_str()
                .unwrap()
                .contains("all passed")
        );
    }

    #[tokio::test]
    async fn upstream_validation_failure_maps_to_bad_request() {
        // given
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/Api/Authentications/bad-token/Finalize"))
            .respond_with(ResponseTemplate::new(422).set_body_json(json!({
                "code": "ValidationError",
                "validationResults": {
                    "errors": [
                        { "type": "TrustChain", "message": "The certificate is not trusted" }
                    ],
                    "warnings": [],
                    "passedChecks": []
                }
            })))
            .expect(1)
            .mount(&mock_server)
            .await;
        let (app, _app_data) = test_app(&mock_server);

        // when
        let response = app
            .oneshot(empty_post("/api/authentication/v1/bad-token/complete"))
            .await
            .unwrap();

        // then
        assert_eq!(response.status(), 400);
        let body = response_json(response).await;
        assert_eq!(body["code"], "ValidationError");
        assert_eq!(
            body["validationResults"]["errors"][0]["message"],
            "The certificate is not trusted"
        );
    }
}
