use axum::Json;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use rest_pki::RestPkiClient;
use rest_pki::signature::pades::{
    PadesHorizontalAlign, PadesSignatureFinisher, PadesSignatureStarter,
    PadesVisualPositioningPresets, PadesVisualRepresentation, PadesVisualText,
};
use rest_pki::standards::{StandardSecurityContexts, StandardSignaturePolicies};

use crate::dto::common::{SignedDocumentResponseRestDTO, decode_upload, token_response};
use crate::dto::error::ApiError;
use crate::endpoint::pades::dto::StartPadesSignatureRequestRestDTO;
use crate::router::AppState;
use crate::samples::SAMPLE_PDF;
use crate::storage;

pub(crate) async fn start_pades_signature(
    state: State<AppState>,
    request: Option<Json<StartPadesSignatureRequestRestDTO>>,
) -> Result<Response, ApiError> {
    let request = request.map(|Json(request)| request).unwrap_or_default();

    let pdf = decode_upload(request.file_to_sign)?.unwrap_or_else(|| SAMPLE_PDF.to_vec());

    let mut starter = PadesSignatureStarter::new(state.client.clone());
    starter
        .set_pdf_to_sign(pdf)
        .set_signature_policy(
            request
                .signature_policy_id
                .unwrap_or(StandardSignaturePolicies::PADES_BASIC),
        )
        .set_security_context(
            request
                .security_context_id
                .unwrap_or(StandardSecurityContexts::LACUNA_TEST),
        )
        .set_visual_representation(visual_representation(&state.client).await?);

    let token = starter.start_with_web_pki().await?;

    Ok(token_response(token))
}

pub(crate) async fn complete_pades_signature(
    state: State<AppState>,
    Path(token): Path<String>,
) -> Result<Response, ApiError> {
    let mut finisher = PadesSignatureFinisher::new(state.client.clone());
    finisher.set_token(token);

    let signed_pdf = finisher.finish().await?;
    let certificate = finisher.certificate()?.clone();

    let filename = storage::store(&state.config.app_data_dir, "pdf", &signed_pdf).await?;

    Ok(Json(SignedDocumentResponseRestDTO {
        filename,
        certificate,
    })
    .into_response())
}

/// Signer name and national id stamped as a footnote of the last page,
/// laid out by the service-computed preset.
pub(crate) async fn visual_representation(
    client: &RestPkiClient,
) -> Result<PadesVisualRepresentation, rest_pki::Error> {
    let position = PadesVisualPositioningPresets::footnote(client).await?;

    Ok(PadesVisualRepresentation {
        text: Some(PadesVisualText {
            text: Some("Signed by {{signerName}} ({{signerNationalId}})".to_string()),
            include_signing_time: Some(true),
            horizontal_align: Some(PadesHorizontalAlign::Left),
            container: None,
        }),
        image: None,
        position: Some(position),
    })
}
