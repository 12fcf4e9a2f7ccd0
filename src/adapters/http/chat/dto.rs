//! HTTP DTOs for chat endpoints.
//!
//! These types decouple the HTTP API from domain types, allowing independent evolution.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::UserId;
use crate::domain::matchmaking::{ConnectOutcome, DisconnectOutcome, Envelope, PollSnapshot};

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Request to join the chat.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConnectRequest {
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Request to send a message to the current partner.
#[derive(Debug, Clone, Deserialize)]
pub struct MessageRequest {
    pub message: String,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Response to a connect call.
#[derive(Debug, Clone, Serialize)]
pub struct ConnectResponse {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partner_id: Option<UserId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl From<ConnectOutcome> for ConnectResponse {
    fn from(outcome: ConnectOutcome) -> Self {
        let status = outcome.status().to_string();
        match outcome {
            ConnectOutcome::Connected {
                partner_id,
                common_tags,
            } => Self {
                status,
                partner_id: Some(partner_id),
                tags: Some(common_tags.into_sorted_vec()),
            },
            ConnectOutcome::AlreadyConnected | ConnectOutcome::Waiting => Self {
                status,
                partner_id: None,
                tags: None,
            },
        }
    }
}

/// Bare status response used by send and disconnect.
#[derive(Debug, Clone, Serialize)]
pub struct StatusResponse {
    pub status: String,
}

impl StatusResponse {
    pub fn message_sent() -> Self {
        Self {
            status: "message_sent".to_string(),
        }
    }
}

impl From<DisconnectOutcome> for StatusResponse {
    fn from(outcome: DisconnectOutcome) -> Self {
        Self {
            status: outcome.status().to_string(),
        }
    }
}

/// One entry of a poll's message list.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum MessageDto {
    Text {
        from: UserId,
        message: String,
    },
    Notice {
        #[serde(rename = "type")]
        kind: String,
        message: String,
    },
}

impl From<Envelope> for MessageDto {
    fn from(envelope: Envelope) -> Self {
        match envelope {
            Envelope::Text { from, message } => MessageDto::Text { from, message },
            Envelope::Notice { kind, message } => MessageDto::Notice {
                kind: kind.as_str().to_string(),
                message,
            },
        }
    }
}

/// Response to a poll call. `partner_id` is `null` when unpaired.
#[derive(Debug, Clone, Serialize)]
pub struct PollResponse {
    pub online_count: usize,
    pub messages: Vec<MessageDto>,
    pub status: String,
    pub partner_id: Option<UserId>,
}

impl From<PollSnapshot> for PollResponse {
    fn from(snapshot: PollSnapshot) -> Self {
        Self {
            online_count: snapshot.online_count,
            messages: snapshot.messages.into_iter().map(MessageDto::from).collect(),
            status: snapshot.status.as_str().to_string(),
            partner_id: snapshot.partner_id,
        }
    }
}

/// Liveness response.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub online_count: usize,
}

/// Standard error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: impl ToString, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
        }
    }
}
