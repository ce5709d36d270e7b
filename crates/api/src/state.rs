use std::sync::Arc;

use sjaplus_core::display::DisplayStore;
use sjaplus_core::storage::ApplicationStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; everything sits behind an `Arc`. Handlers share no
/// mutable state, only the filesystem namespace behind the stores.
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Writer for accepted submissions.
    pub applications: Arc<ApplicationStore>,
    /// Approved avatar/poster images.
    pub display: Arc<DisplayStore>,
}

impl AppState {
    /// Build state whose stores point at the configured directories.
    pub fn from_config(config: ServerConfig) -> Self {
        let applications = ApplicationStore::new(&config.apply_dir);
        let display = DisplayStore::new(&config.display_dir);
        Self {
            config: Arc::new(config),
            applications: Arc::new(applications),
            display: Arc::new(display),
        }
    }
}
