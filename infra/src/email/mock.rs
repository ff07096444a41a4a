//! Development mailer that logs instead of sending.

use std::sync::Mutex;

/// Logged stand-in for a real provider. Keeps every message so local
/// tooling and tests can inspect what would have gone out.
#[derive(Default)]
pub struct MockMailer {
    sent: Mutex<Vec<MockMail>>,
}

#[derive(Debug, Clone)]
pub struct MockMail {
    pub to: String,
    pub subject: String,
    pub text_body: String,
}

impl MockMailer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<MockMail> {
        self.sent.lock().unwrap().clone()
    }

    pub async fn send(
        &self,
        recipient_address: &str,
        _recipient_name: &str,
        subject: &str,
        text_body: &str,
        _html_body: &str,
    ) -> bool {
        tracing::info!(
            to = recipient_address,
            subject,
            body = text_body,
            "mock email (not sent)"
        );
        self.sent.lock().unwrap().push(MockMail {
            to: recipient_address.to_string(),
            subject: subject.to_string(),
            text_body: text_body.to_string(),
        });
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_mailer_records_messages() {
        let mailer = MockMailer::new();
        assert!(
            mailer
                .send("alice@example.com", "Alice", "Hi", "body", "<p>body</p>")
                .await
        );

        let sent = mailer.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "alice@example.com");
    }
}
