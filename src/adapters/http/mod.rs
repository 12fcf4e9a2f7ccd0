//! HTTP adapters - REST API implementations.
//!
//! The chat endpoints live in [`chat`]; [`build_router`] assembles them with
//! the middleware stack and optional static asset serving.

pub mod chat;
pub mod client_info;

pub use chat::{chat_routes, ChatHandlers};

use std::path::Path;
use std::time::Duration;

use axum::http::HeaderValue;
use axum::Router;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;

/// Builds the application router from the chat handlers and server settings.
pub fn build_router(handlers: ChatHandlers, server: &ServerConfig) -> Router {
    let mut router = chat_routes(handlers);

    if let Some(dir) = server.static_dir.as_deref() {
        router = with_static_assets(router, Path::new(dir));
    }

    router
        .layer(cors_layer(&server.cors_origins_list()))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(
            server.request_timeout_secs,
        )))
}

fn with_static_assets(router: Router, dir: &Path) -> Router {
    router
        .nest_service("/static", ServeDir::new(dir))
        .route_service("/", ServeFile::new(dir.join("index.html")))
}

/// Permissive when no origins are configured.
fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::permissive();
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods(Any)
        .allow_headers(Any)
}
