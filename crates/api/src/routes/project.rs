use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{project_apply, project_display};
use crate::state::AppState;

/// Routes mounted at `/project`.
///
/// The body limit only applies to the submission route; it is the decode-time
/// ceiling for the whole multipart body.
pub fn router(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .route(
            "/apply",
            post(project_apply::submit).layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
        .route("/avatar", get(project_display::avatar))
        .route("/poster", get(project_display::poster))
}
