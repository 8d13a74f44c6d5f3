//! Route handlers for the HTTP API.

use serde::Serialize;

pub mod health;
pub mod images;
pub mod predictions;
pub mod uploads;

/// Plain acknowledgement returned by the save endpoints.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
