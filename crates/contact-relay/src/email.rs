use serde::Serialize;
use serde_json::Value;

use crate::config::ContactConfig;
use crate::error::RelayError;

/// A validated contact submission. All fields are trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub interest: Option<String>,
    pub message: String,
}

fn text_field(obj: &serde_json::Map<String, Value>, key: &str) -> Option<String> {
    obj.get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

impl ContactForm {
    /// Parse a raw request body. Anything that is not a JSON object with
    /// non-blank `name`, `email` and `message` strings is rejected.
    pub fn from_json(body: &[u8]) -> Result<Self, RelayError> {
        let value: Value = serde_json::from_slice(body).unwrap_or(Value::Null);
        let obj = value.as_object().ok_or(RelayError::MissingFields)?;
        match (
            text_field(obj, "name"),
            text_field(obj, "email"),
            text_field(obj, "message"),
        ) {
            (Some(name), Some(email), Some(message)) => Ok(Self {
                name,
                email,
                interest: text_field(obj, "interest"),
                message,
            }),
            _ => Err(RelayError::MissingFields),
        }
    }

    #[inline]
    pub fn topic(&self) -> &str {
        self.interest.as_deref().unwrap_or("General")
    }
}

/// Request body for the provider's send-email endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutboundEmail {
    pub from: String,
    pub to: Vec<String>,
    pub reply_to: String,
    pub subject: String,
    pub text: String,
    pub html: String,
}

impl OutboundEmail {
    pub fn compose(form: &ContactForm, config: &ContactConfig) -> Self {
        let topic = form.topic();
        let text = format!(
            "New inquiry from {}\nEmail: {}\nTopic: {}\n\nMessage:\n{}",
            form.name, form.email, topic, form.message
        );
        let email = escape_html(&form.email);
        let html = format!(
            "<p>New inquiry from <strong>{}</strong></p>\n\
             <p>Email: <a href=\"mailto:{email}\">{email}</a></p>\n\
             <p>Topic: {}</p>\n\
             <p><strong>Message</strong><br>{}</p>",
            escape_html(&form.name),
            escape_html(topic),
            escape_html(&form.message).replace('\n', "<br>"),
        );
        Self {
            from: config.contact_from.clone(),
            to: vec![config.contact_to.clone()],
            reply_to: form.email.clone(),
            subject: format!("Qori Labs contact: {topic}"),
            text,
            html,
        }
    }
}

pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
