//! Outbound email provider configuration.

use serde::{Deserialize, Serialize};

/// Settings for the transactional email provider.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EmailConfig {
    /// Provider selector: `"brevo"` or `"mock"`
    pub provider: String,

    /// Provider API key
    pub api_key: String,

    /// Sender address shown to recipients
    pub from_email: String,

    /// Sender display name
    pub from_name: String,

    /// Request timeout in seconds
    pub request_timeout_secs: u64,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            provider: String::from("mock"),
            api_key: String::new(),
            from_email: String::from("no-reply@joblane.example"),
            from_name: String::from("JobLane"),
            request_timeout_secs: 5,
        }
    }
}

impl EmailConfig {
    /// Build from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            provider: std::env::var("EMAIL_PROVIDER").unwrap_or(defaults.provider),
            api_key: std::env::var("BREVO_API_KEY").unwrap_or(defaults.api_key),
            from_email: std::env::var("DEFAULT_FROM_EMAIL").unwrap_or(defaults.from_email),
            from_name: std::env::var("DEFAULT_FROM_NAME").unwrap_or(defaults.from_name),
            request_timeout_secs: std::env::var("EMAIL_REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.request_timeout_secs),
        }
    }
}
