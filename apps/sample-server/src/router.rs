use std::net::TcpListener;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::http::{Request, Response};
use axum::routing::{get, post};
use rest_pki::RestPkiClient;
use tower_http::trace::TraceLayer;
use tracing::{Span, info, info_span};

use crate::ServerConfig;
use crate::endpoint::{authentication, batch, cades, document, misc, pades, xml};

pub(crate) struct InternalAppState {
    pub client: RestPkiClient,
    pub config: Arc<ServerConfig>,
}

pub(crate) type AppState = Arc<InternalAppState>;

pub async fn start_server(listener: TcpListener, config: ServerConfig) {
    listener.set_nonblocking(true).unwrap();

    let client = RestPkiClient::new(&config.rest_pki_url, config.access_token.to_owned())
        .expect("Invalid REST PKI endpoint URL");

    std::fs::create_dir_all(&config.app_data_dir).expect("Failed creating app-data directory");

    let state: AppState = Arc::new(InternalAppState {
        client,
        config: Arc::new(config),
    });

    let addr = listener.local_addr().expect("Invalid TCP listener");
    info!("Starting server at http://{addr}");

    let router = router(state);

    axum::serve(
        tokio::net::TcpListener::from_std(listener)
            .expect("failed to convert to tokio TcpListener"),
        router.into_make_service(),
    )
    .await
    .expect("Failed to start axum server");
}

pub(crate) fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/authentication/v1",
            post(authentication::controller::start_authentication),
        )
        .route(
            "/api/authentication/v1/{token}/complete",
            post(authentication::controller::complete_authentication),
        )
        .route(
            "/api/signature/pades/v1",
            post(pades::controller::start_pades_signature),
        )
        .route(
            "/api/signature/pades/v1/{token}/complete",
            post(pades::controller::complete_pades_signature),
        )
        .route(
            "/api/signature/cades/v1",
            post(cades::controller::start_cades_signature),
        )
        .route(
            "/api/signature/cades/v1/{token}/complete",
            post(cades::controller::complete_cades_signature),
        )
        .route(
            "/api/signature/xml-full/v1",
            post(xml::controller::start_full_xml_signature),
        )
        .route(
            "/api/signature/xml-element/v1",
            post(xml::controller::start_xml_element_signature),
        )
        .route(
            "/api/signature/xml/v1/{token}/complete",
            post(xml::controller::complete_xml_signature),
        )
        .route(
            "/api/signature/batch/v1/start",
            post(batch::controller::start_batch_element),
        )
        .route(
            "/api/signature/batch/v1/complete",
            post(batch::controller::complete_batch_element),
        )
        .route(
            "/api/documents/v1/{filename}",
            get(document::controller::get_document),
        )
        .route("/health", get(misc::health_check))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<_>| {
                    info_span!(
                        "http_request",
                        method = %request.method(),
                        path = request.uri().path(),
                        service = "sample-server",
                    )
                })
                .on_request(|request: &Request<_>, _span: &Span| {
                    tracing::debug!(
                        "SERVICE CALL START {} {}",
                        request.method(),
                        request.uri().path()
                    )
                })
                .on_response(|response: &Response<_>, _: Duration, _span: &Span| {
                    tracing::debug!("SERVICE CALL END {}", response.status())
                }),
        )
        .with_state(state)
}
