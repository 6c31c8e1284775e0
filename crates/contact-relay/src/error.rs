use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// Every way a contact submission can fail. The display text is the `error`
/// field of the JSON response.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("Method not allowed")]
    MethodNotAllowed,
    #[error("Email service not configured")]
    NotConfigured,
    #[error("Missing required fields")]
    MissingFields,
    #[error("Resend request failed")]
    Upstream { status: u16, detail: String },
    #[error("Unable to send message")]
    Transport(#[source] reqwest::Error),
}

impl RelayError {
    pub fn status(&self) -> StatusCode {
        match self {
            RelayError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            RelayError::NotConfigured | RelayError::Transport(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            RelayError::MissingFields => StatusCode::BAD_REQUEST,
            RelayError::Upstream { .. } => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            RelayError::Upstream { status: upstream, detail } => {
                log::warn!("[relay] provider answered {}: {}", upstream, detail);
                json!({ "error": self.to_string(), "detail": detail })
            }
            RelayError::Transport(e) => {
                log::error!("[relay] provider unreachable: {}", e);
                json!({ "error": self.to_string() })
            }
            RelayError::NotConfigured => {
                log::error!("[relay] no API key configured; rejecting submission");
                json!({ "error": self.to_string() })
            }
            _ => {
                log::info!("[relay] rejected: {}", self);
                json!({ "error": self.to_string() })
            }
        };
        (status, Json(body)).into_response()
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("PORT must be a number between 0 and 65535, got {0:?}")]
    InvalidPort(String),
}
