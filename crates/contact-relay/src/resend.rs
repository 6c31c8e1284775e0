use std::time::Duration;

use crate::email::OutboundEmail;
use crate::error::RelayError;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Thin client for the Resend send-email endpoint.
#[derive(Debug, Clone)]
pub struct ResendClient {
    http: reqwest::Client,
    endpoint: String,
}

impl ResendClient {
    pub fn new(endpoint: impl Into<String>) -> Result<Self, RelayError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(RelayError::Transport)?;
        Ok(Self {
            http,
            endpoint: endpoint.into(),
        })
    }

    #[inline]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// POST one email. A non-2xx answer becomes [`RelayError::Upstream`]
    /// carrying the provider's response text.
    pub async fn send(&self, api_key: &str, email: &OutboundEmail) -> Result<(), RelayError> {
        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(email)
            .send()
            .await
            .map_err(RelayError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            let detail = match response.text().await {
                Ok(text) => text,
                Err(e) => {
                    log::warn!(
                        "[relay] provider answered {} but its body was unreadable: {}",
                        status,
                        e
                    );
                    String::new()
                }
            };
            return Err(RelayError::Upstream {
                status: status.as_u16(),
                detail,
            });
        }
        Ok(())
    }
}
