use axum::Json;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use rest_pki::signature::pades::{PadesSignatureFinisher, PadesSignatureStarter};
use rest_pki::standards::{StandardSecurityContexts, StandardSignaturePolicies};

use crate::dto::common::{SignedDocumentResponseRestDTO, token_response};
use crate::dto::error::ApiError;
use crate::endpoint::batch::dto::{
    CompleteBatchElementRequestRestDTO, StartBatchElementRequestRestDTO,
};
use crate::endpoint::pades::controller::visual_representation;
use crate::router::AppState;
use crate::samples::SAMPLE_PDF;
use crate::storage;

pub(crate) async fn start_batch_element(
    state: State<AppState>,
    Json(request): Json<StartBatchElementRequestRestDTO>,
) -> Result<Response, ApiError> {
    let mut starter = PadesSignatureStarter::new(state.client.clone());
    starter
        .set_pdf_to_sign(SAMPLE_PDF)
        .set_signature_policy(StandardSignaturePolicies::PADES_BASIC)
        .set_security_context(StandardSecurityContexts::LACUNA_TEST)
        .set_callback_argument(request.document_id.to_string())
        .set_visual_representation(visual_representation(&state.client).await?);

    let token = starter.start_with_web_pki().await?;

    Ok(token_response(token))
}

pub(crate) async fn complete_batch_element(
    state: State<AppState>,
    Json(request): Json<CompleteBatchElementRequestRestDTO>,
) -> Result<Response, ApiError> {
    let mut finisher = PadesSignatureFinisher::new(state.client.clone());
    finisher.set_token(request.token);

    let signed_pdf = finisher.finish().await?;
    let certificate = finisher.certificate()?.clone();

    let filename = storage::store(&state.config.app_data_dir, "pdf", &signed_pdf).await?;

    Ok(Json(SignedDocumentResponseRestDTO {
        filename,
        certificate,
    })
    .into_response())
}
