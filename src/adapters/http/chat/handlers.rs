//! HTTP handlers for chat endpoints.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{ConnectInfo, Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::client_info::client_metadata;
use crate::application::{ConnectCommand, MatchmakingCoordinator, SendMessageCommand};
use crate::domain::foundation::{ErrorCode, UserId, ValidationError};
use crate::domain::matchmaking::MatchmakingError;

use super::dto::{
    ConnectRequest, ConnectResponse, ErrorResponse, HealthResponse, MessageRequest, PollResponse,
    StatusResponse,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct ChatHandlers {
    coordinator: Arc<MatchmakingCoordinator>,
    max_message_length: Option<usize>,
}

impl ChatHandlers {
    pub fn new(coordinator: Arc<MatchmakingCoordinator>) -> Self {
        Self {
            coordinator,
            max_message_length: None,
        }
    }

    /// Rejects messages longer than `max` characters.
    pub fn with_max_message_length(mut self, max: Option<usize>) -> Self {
        self.max_message_length = max;
        self
    }

    fn validate_message(&self, message: &str) -> Result<(), ValidationError> {
        if let Some(max) = self.max_message_length {
            let actual = message.chars().count();
            if actual > max {
                return Err(ValidationError::too_long("message", max, actual));
            }
        }
        Ok(())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /connect/:id - Join the chat and look for a partner
pub async fn connect(
    State(handlers): State<ChatHandlers>,
    Path(user_id): Path<u64>,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    headers: HeaderMap,
    Json(req): Json<ConnectRequest>,
) -> Response {
    let cmd = ConnectCommand {
        user_id: UserId::new(user_id),
        tags: req.tags,
        client: client_metadata(&headers, connect_info.as_ref()),
    };

    let outcome = handlers.coordinator.connect(cmd).await;
    (StatusCode::OK, Json(ConnectResponse::from(outcome))).into_response()
}

/// POST /message/:id - Send a message to the current partner
pub async fn send_message(
    State(handlers): State<ChatHandlers>,
    Path(user_id): Path<u64>,
    Json(req): Json<MessageRequest>,
) -> Response {
    if let Err(e) = handlers.validate_message(&req.message) {
        return handle_validation_error(e);
    }

    let cmd = SendMessageCommand {
        sender: UserId::new(user_id),
        message: req.message,
    };

    match handlers.coordinator.send_message(cmd).await {
        Ok(_) => (StatusCode::OK, Json(StatusResponse::message_sent())).into_response(),
        Err(e) => handle_matchmaking_error(e),
    }
}

/// GET /poll/:id - Fetch pending messages and current status
///
/// Returned messages are removed from the queue.
pub async fn poll(State(handlers): State<ChatHandlers>, Path(user_id): Path<u64>) -> Response {
    match handlers.coordinator.poll(UserId::new(user_id)).await {
        Ok(snapshot) => (StatusCode::OK, Json(PollResponse::from(snapshot))).into_response(),
        Err(e) => handle_matchmaking_error(e),
    }
}

/// POST /disconnect/:id - Leave the chat
pub async fn disconnect(
    State(handlers): State<ChatHandlers>,
    Path(user_id): Path<u64>,
) -> Response {
    let outcome = handlers.coordinator.disconnect(UserId::new(user_id)).await;
    (StatusCode::OK, Json(StatusResponse::from(outcome))).into_response()
}

/// GET /health - Liveness and current population
pub async fn health(State(handlers): State<ChatHandlers>) -> Response {
    let response = HealthResponse {
        status: "ok".to_string(),
        online_count: handlers.coordinator.online_count().await,
    };
    (StatusCode::OK, Json(response)).into_response()
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

fn handle_matchmaking_error(error: MatchmakingError) -> Response {
    let code = error.code();
    match error {
        MatchmakingError::NotConnected(_) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new(code, "User not connected")),
        )
            .into_response(),
        MatchmakingError::NoPartner(_) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new(code, "No partner connected")),
        )
            .into_response(),
        MatchmakingError::AlreadyConnected(_) | MatchmakingError::InvalidPairing(..) => (
            StatusCode::CONFLICT,
            Json(ErrorResponse::new(code, error.to_string())),
        )
            .into_response(),
    }
}

fn handle_validation_error(error: ValidationError) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse::new(ErrorCode::ValidationFailed, error.to_string())),
    )
        .into_response()
}
