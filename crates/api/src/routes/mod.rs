pub mod health;
pub mod project;

use axum::Router;

use crate::config::ServerConfig;
use crate::state::AppState;

/// Build the application route tree.
///
/// Route hierarchy:
///
/// ```text
/// /project/apply                 POST   submit an application (multipart)
/// /project/avatar?id=<n>         GET    approved avatar image
/// /project/poster?id=<n>         GET    approved poster image
/// ```
pub fn app_routes(config: &ServerConfig) -> Router<AppState> {
    Router::new().nest("/project", project::router(config.max_upload_bytes))
}
