//! HTTP routes for chat endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{connect, disconnect, health, poll, send_message, ChatHandlers};

/// Creates the chat router with all endpoints.
pub fn chat_routes(handlers: ChatHandlers) -> Router {
    Router::new()
        .route("/connect/:id", post(connect))
        .route("/message/:id", post(send_message))
        .route("/poll/:id", get(poll))
        .route("/disconnect/:id", post(disconnect))
        .route("/health", get(health))
        .with_state(handlers)
}
