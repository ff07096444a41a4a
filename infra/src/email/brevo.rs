//! Brevo transactional email client.

use std::time::Duration;

use serde::Serialize;

use jl_shared::config::EmailConfig;
use jl_shared::utils::validation::mask_email;

use crate::InfraError;

const BREVO_SEND_URL: &str = "https://api.brevo.com/v3/smtp/email";

#[derive(Debug, Serialize)]
struct Party<'a> {
    name: &'a str,
    email: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SendRequest<'a> {
    sender: Party<'a>,
    to: Vec<Party<'a>>,
    subject: &'a str,
    text_content: &'a str,
    html_content: &'a str,
}

pub struct BrevoMailer {
    client: reqwest::Client,
    api_key: String,
    from_email: String,
    from_name: String,
}

impl BrevoMailer {
    pub fn new(config: &EmailConfig) -> Result<Self, InfraError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| InfraError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            from_email: config.from_email.clone(),
            from_name: config.from_name.clone(),
        })
    }

    pub async fn send(
        &self,
        recipient_address: &str,
        recipient_name: &str,
        subject: &str,
        text_body: &str,
        html_body: &str,
    ) -> bool {
        let request = SendRequest {
            sender: Party {
                name: &self.from_name,
                email: &self.from_email,
            },
            to: vec![Party {
                name: recipient_name,
                email: recipient_address,
            }],
            subject,
            text_content: text_body,
            html_content: html_body,
        };

        let response = self
            .client
            .post(BREVO_SEND_URL)
            .header("api-key", &self.api_key)
            .header("accept", "application/json")
            .json(&request)
            .send()
            .await;

        match response {
            Ok(response) if response.status().is_success() => true,
            Ok(response) => {
                let status = response.status();
                let body = response.text().await.unwrap_or_default();
                tracing::error!(
                    recipient = %mask_email(recipient_address),
                    %status,
                    body = %body,
                    "Brevo rejected the send"
                );
                false
            }
            Err(e) => {
                tracing::error!(
                    recipient = %mask_email(recipient_address),
                    error = %e,
                    "Brevo request failed"
                );
                false
            }
        }
    }
}
