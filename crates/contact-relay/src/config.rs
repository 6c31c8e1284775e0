//! Startup configuration, resolved from ordered lists of environment names.
//!
//! Every resolver takes a lookup function instead of reading the process
//! environment directly, so tests can feed a plain map.

use std::fmt;
use std::path::PathBuf;

use crate::error::ConfigError;

pub const API_KEY_VARS: &[&str] = &[
    "RESEND_API_KEY",
    "RESEND_KEY",
    "VERCEL_RESEND_API_KEY",
    "QORI_RESEND_API_KEY",
];
pub const CONTACT_TO_VARS: &[&str] = &["CONTACT_TO", "QORI_CONTACT_TO"];
pub const CONTACT_FROM_VARS: &[&str] = &["CONTACT_FROM", "QORI_CONTACT_FROM"];

pub const DEFAULT_CONTACT_TO: &str = "contact@qorilabs.example";
pub const DEFAULT_CONTACT_FROM: &str = "Qori Labs Contact <onboarding@resend.dev>";
pub const DEFAULT_RESEND_ENDPOINT: &str = "https://api.resend.com/emails";
pub const DEFAULT_PORT: u16 = 3000;

/// First non-blank value among `names`, trimmed.
pub fn resolve<F>(names: &[&str], lookup: &F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    names
        .iter()
        .filter_map(|name| lookup(name))
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty())
}

#[derive(Clone)]
pub struct ContactConfig {
    /// `None` means the relay answers every submission with 500.
    pub api_key: Option<String>,
    pub contact_to: String,
    pub contact_from: String,
    pub endpoint: String,
}

impl ContactConfig {
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            api_key: resolve(API_KEY_VARS, &lookup),
            contact_to: resolve(CONTACT_TO_VARS, &lookup)
                .unwrap_or_else(|| DEFAULT_CONTACT_TO.to_string()),
            contact_from: resolve(CONTACT_FROM_VARS, &lookup)
                .unwrap_or_else(|| DEFAULT_CONTACT_FROM.to_string()),
            endpoint: resolve(&["RESEND_ENDPOINT"], &lookup)
                .unwrap_or_else(|| DEFAULT_RESEND_ENDPOINT.to_string()),
        }
    }

    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }
}

// Never print the key itself.
impl fmt::Debug for ContactConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContactConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("contact_to", &self.contact_to)
            .field("contact_from", &self.contact_from)
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    pub site_root: PathBuf,
}

impl ServerConfig {
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match resolve(&["PORT"], &lookup) {
            Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidPort(raw))?,
            None => DEFAULT_PORT,
        };
        let site_root = resolve(&["SITE_ROOT"], &lookup).unwrap_or_else(|| ".".to_string());
        Ok(Self {
            port,
            site_root: PathBuf::from(site_root),
        })
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }
}
