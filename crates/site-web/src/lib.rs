//! Web server for the NACTAX site.
//!
//! Server-rendered pages with askama, per-visitor sessions keyed by a cookie,
//! and the support chat and admin panel from `site-core`.

pub mod config;
pub mod error;
pub mod routes;
pub mod session;
pub mod state;
pub mod templates;
pub mod watcher;

use std::path::Path;

use axum::Router;
use tower_cookies::CookieManagerLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

pub use crate::config::{Config, ConfigError};
pub use crate::error::WebError;
pub use crate::state::AppState;

/// The full application: routes, static files, cookies and request tracing.
pub fn app(state: AppState, static_dir: impl AsRef<Path>) -> Router {
    routes::router()
        .nest_service("/static", ServeDir::new(static_dir.as_ref()))
        .layer(CookieManagerLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
