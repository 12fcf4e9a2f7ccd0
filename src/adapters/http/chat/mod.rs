//! HTTP adapter for chat endpoints.
//!
//! - `POST /connect/:id` - Join and look for a partner
//! - `POST /message/:id` - Relay text to the partner
//! - `GET /poll/:id` - Drain pending messages and read status
//! - `POST /disconnect/:id` - Leave
//! - `GET /health` - Liveness

mod dto;
mod handlers;
mod routes;

pub use dto::{
    ConnectRequest, ConnectResponse, ErrorResponse, HealthResponse, MessageDto, MessageRequest,
    PollResponse, StatusResponse,
};
pub use handlers::ChatHandlers;
pub use routes::chat_routes;
