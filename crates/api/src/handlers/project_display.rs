//! Handlers serving approved project images by numeric id.

use axum::body::Body;
use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::Response;
use serde::Deserialize;
use sjaplus_core::display::{parse_display_id, DisplayKind};
use tokio_util::io::ReaderStream;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct DisplayQuery {
    pub id: Option<String>,
}

/// GET /project/avatar?id=<id>
pub async fn avatar(
    State(state): State<AppState>,
    Query(params): Query<DisplayQuery>,
) -> AppResult<Response> {
    serve_image(&state, DisplayKind::Avatar, params).await
}

/// GET /project/poster?id=<id>
pub async fn poster(
    State(state): State<AppState>,
    Query(params): Query<DisplayQuery>,
) -> AppResult<Response> {
    serve_image(&state, DisplayKind::Poster, params).await
}

async fn serve_image(
    state: &AppState,
    kind: DisplayKind,
    params: DisplayQuery,
) -> AppResult<Response> {
    let id = parse_display_id(params.id.as_deref())?;
    let path = state.display.locate(kind, &id).await?;

    let file = tokio::fs::File::open(&path)
        .await
        .map_err(|e| AppError::InternalError(e.to_string()))?;
    let file_size = file
        .metadata()
        .await
        .map_err(|e| AppError::InternalError(e.to_string()))?
        .len();
    let stream = ReaderStream::new(file);

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "image/png")
        .header(header::CONTENT_LENGTH, file_size.to_string())
        .body(Body::from_stream(stream))
        .map_err(|e| AppError::InternalError(e.to_string()))
}
