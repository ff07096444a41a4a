//! Outbound transactional email.

mod brevo;
mod mock;

pub use brevo::BrevoMailer;
pub use mock::MockMailer;

use async_trait::async_trait;

use jl_core::services::otp::MailerTrait;
use jl_shared::config::EmailConfig;

use crate::InfraError;

/// Provider chosen at startup from configuration. An enum keeps the
/// services generic over one concrete mailer type.
pub enum Mailer {
    Brevo(BrevoMailer),
    Mock(MockMailer),
}

#[async_trait]
impl MailerTrait for Mailer {
    async fn send(
        &self,
        recipient_address: &str,
        recipient_name: &str,
        subject: &str,
        text_body: &str,
        html_body: &str,
    ) -> bool {
        match self {
            Mailer::Brevo(mailer) => {
                mailer
                    .send(recipient_address, recipient_name, subject, text_body, html_body)
                    .await
            }
            Mailer::Mock(mailer) => {
                mailer
                    .send(recipient_address, recipient_name, subject, text_body, html_body)
                    .await
            }
        }
    }
}

/// Build the mailer named by `config.provider`.
pub fn create_mailer(config: &EmailConfig) -> Result<Mailer, InfraError> {
    match config.provider.as_str() {
        "brevo" => {
            if config.api_key.is_empty() {
                return Err(InfraError::Config(
                    "BREVO_API_KEY is required for the brevo provider".to_string(),
                ));
            }
            Ok(Mailer::Brevo(BrevoMailer::new(config)?))
        }
        "mock" => Ok(Mailer::Mock(MockMailer::new())),
        other => Err(InfraError::Config(format!(
            "unknown email provider: {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_mailer_rejects_unknown_provider() {
        let config = EmailConfig {
            provider: "sendgrid".to_string(),
            ..EmailConfig::default()
        };
        assert!(matches!(
            create_mailer(&config),
            Err(InfraError::Config(_))
        ));
    }

    #[test]
    fn test_create_mailer_requires_api_key_for_brevo() {
        let config = EmailConfig {
            provider: "brevo".to_string(),
            api_key: String::new(),
            ..EmailConfig::default()
        };
        assert!(matches!(
            create_mailer(&config),
            Err(InfraError::Config(_))
        ));
    }

    #[test]
    fn test_create_mailer_defaults_to_mock() {
        let mailer = create_mailer(&EmailConfig::default()).unwrap();
        assert!(matches!(mailer, Mailer::Mock(_)));
    }
}
