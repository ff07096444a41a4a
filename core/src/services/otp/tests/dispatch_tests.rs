//! Dispatch tests: message shape and failure swallowing.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::services::otp::{dispatch_code, MailerTrait, OtpPurpose};

#[derive(Debug, Clone)]
struct SentMail {
    to: String,
    subject: String,
    text_body: String,
}

struct RecordingMailer {
    sent: Mutex<Vec<SentMail>>,
    succeed: bool,
}

impl RecordingMailer {
    fn new(succeed: bool) -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            succeed,
        }
    }
}

#[async_trait]
impl MailerTrait for RecordingMailer {
    async fn send(
        &self,
        recipient_address: &str,
        _recipient_name: &str,
        subject: &str,
        text_body: &str,
        _html_body: &str,
    ) -> bool {
        self.sent.lock().unwrap().push(SentMail {
            to: recipient_address.to_string(),
            subject: subject.to_string(),
            text_body: text_body.to_string(),
        });
        self.succeed
    }
}

#[tokio::test]
async fn test_dispatch_sends_code_and_purpose() {
    let mailer = Arc::new(RecordingMailer::new(true));

    let handle = dispatch_code(
        Arc::clone(&mailer),
        "seeker@example.com".to_string(),
        "Alice".to_string(),
        "482913".to_string(),
        OtpPurpose::AccountVerification,
        5,
    );
    handle.await.unwrap();

    let sent = mailer.sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "seeker@example.com");
    assert!(sent[0].subject.contains("account verification"));
    assert!(sent[0].text_body.contains("482913"));
    assert!(sent[0].text_body.contains("5 minutes"));
}

#[tokio::test]
async fn test_dispatch_failure_is_swallowed() {
    let mailer = Arc::new(RecordingMailer::new(false));

    // A failing provider must not panic the task or surface an error
    let handle = dispatch_code(
        Arc::clone(&mailer),
        "seeker@example.com".to_string(),
        "Alice".to_string(),
        "000000".to_string(),
        OtpPurpose::PasswordReset,
        5,
    );
    handle.await.unwrap();

    assert_eq!(mailer.sent.lock().unwrap().len(), 1);
}
