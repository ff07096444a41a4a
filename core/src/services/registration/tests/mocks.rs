//! Fixtures for registration service tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};

use jl_shared::config::{AuthConfig, OtpConfig};

use crate::domain::clock::Clock;
use crate::repositories::{MockAccountRepository, MockPendingRegistrationRepository};
use crate::services::otp::MailerTrait;
use crate::services::registration::{NewRegistration, RegistrationService};
use crate::services::token::AuthTokenService;

/// Manually advanced clock.
pub struct TestClock {
    now: Mutex<DateTime<Utc>>,
}

impl TestClock {
    pub fn new() -> Self {
        Self {
            now: Mutex::new(Utc.with_ymd_and_hms(2025, 3, 10, 12, 0, 0).unwrap()),
        }
    }

    pub fn advance_seconds(&self, seconds: i64) {
        let mut now = self.now.lock().unwrap();
        *now += chrono::Duration::seconds(seconds);
    }

    pub fn advance_minutes(&self, minutes: i64) {
        self.advance_seconds(minutes * 60);
    }
}

impl Clock for TestClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}

#[derive(Debug, Clone)]
pub struct SentMail {
    pub to: String,
    pub subject: String,
    pub text_body: String,
}

#[derive(Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<SentMail>>,
}

impl RecordingMailer {
    pub fn sent(&self) -> Vec<SentMail> {
        self.sent.lock().unwrap().clone()
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
        true
    }
}

/// Dispatch runs on a spawned task; poll until the mail lands.
pub async fn wait_for_sends(mailer: &RecordingMailer, count: usize) -> Vec<SentMail> {
    for _ in 0..100 {
        let sent = mailer.sent();
        if sent.len() >= count {
            return sent;
        }
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    }
    panic!("mailer never received {count} send(s)");
}

/// Pull the 6-digit code out of a dispatched message body.
pub fn extract_code(text_body: &str) -> String {
    let start = text_body.find("is: ").expect("code marker") + 4;
    text_body[start..start + 6].to_string()
}

pub struct Harness {
    pub pending: Arc<MockPendingRegistrationRepository>,
    pub accounts: Arc<MockAccountRepository>,
    pub mailer: Arc<RecordingMailer>,
    pub clock: Arc<TestClock>,
    pub service:
        RegistrationService<MockPendingRegistrationRepository, MockAccountRepository, RecordingMailer>,
}

pub fn harness() -> Harness {
    let pending = Arc::new(MockPendingRegistrationRepository::new());
    let accounts = Arc::new(MockAccountRepository::new());
    let mailer = Arc::new(RecordingMailer::default());
    let clock = Arc::new(TestClock::new());
    let tokens = Arc::new(AuthTokenService::new(
        &AuthConfig::new("test-secret"),
        Arc::clone(&clock) as Arc<dyn Clock>,
    ));

    let service = RegistrationService::new(
        Arc::clone(&pending),
        Arc::clone(&accounts),
        Arc::clone(&mailer),
        tokens,
        Arc::clone(&clock) as Arc<dyn Clock>,
        OtpConfig::default(),
    );

    Harness {
        pending,
        accounts,
        mailer,
        clock,
        service,
    }
}

pub fn submission(email: &str, username: &str) -> NewRegistration {
    NewRegistration {
        email: email.to_string(),
        username: username.to_string(),
        name: "Alice Example".to_string(),
        role: crate::domain::entities::Role::JobSeeker,
        password: "correct-horse-battery".to_string(),
    }
}
