//! Contact-form relay and static site server.
//!
//! `POST /api/contact` validates a JSON submission and forwards it to the
//! Resend API as an email; every other path is served from the site root,
//! with unknown paths falling back to `index.html` for client-side routing.

use std::path::Path;
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};
use tower_http::services::{ServeDir, ServeFile};

pub mod config;
pub mod email;
pub mod error;
pub mod resend;

pub use config::{ContactConfig, ServerConfig};
pub use email::{escape_html, ContactForm, OutboundEmail};
pub use error::{ConfigError, RelayError};
pub use resend::ResendClient;

pub const CONTACT_PATH: &str = "/api/contact";
/// Same handler under the path the Netlify function used to live at.
pub const NETLIFY_CONTACT_PATH: &str = "/.netlify/functions/send-contact";

#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Arc<ContactConfig>,
    pub resend: ResendClient,
}

impl AppState {
    pub fn new(config: ContactConfig) -> Result<Self, RelayError> {
        let resend = ResendClient::new(config.endpoint.clone())?;
        Ok(Self {
            config: Arc::new(config),
            resend,
        })
    }
}

pub fn router(state: AppState, site_root: &Path) -> Router {
    let contact = post(send_contact).fallback(method_not_allowed);
    let site = ServeDir::new(site_root).fallback(ServeFile::new(site_root.join("index.html")));
    Router::new()
        .route(CONTACT_PATH, contact.clone())
        .route(NETLIFY_CONTACT_PATH, contact)
        .fallback_service(site)
        .with_state(state)
}

async fn method_not_allowed() -> RelayError {
    RelayError::MethodNotAllowed
}

async fn send_contact(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Value>, RelayError> {
    let api_key = state
        .config
        .api_key
        .as_deref()
        .ok_or(RelayError::NotConfigured)?;
    let form = ContactForm::from_json(&body)?;
    let email = OutboundEmail::compose(&form, &state.config);
    state.resend.send(api_key, &email).await?;
    log::info!("[relay] forwarded \"{}\" to {}", email.subject, state.config.contact_to);
    Ok(Json(json!({ "ok": true })))
}
