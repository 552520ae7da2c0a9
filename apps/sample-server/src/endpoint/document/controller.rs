use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};

use crate::dto::error::ApiError;
use crate::router::AppState;
use crate::storage;

pub(crate) async fn get_document(
    state: State<AppState>,
    Path(filename): Path<String>,
) -> Result<Response, ApiError> {
    let Some(path) = storage::resolve(&state.config.app_data_dir, &filename) else {
        return Ok(StatusCode::NOT_FOUND.into_response());
    };

    let content = match tokio::fs::read(&path).await {
        Ok(content) => content,
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
            return Ok(StatusCode::NOT_FOUND.into_response());
        }
        Err(error) => return Err(error.into()),
    };

    Ok((
        [(header::CONTENT_TYPE, storage::content_type(&filename))],
        content,
    )
        .into_response())
}
