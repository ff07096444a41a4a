//! Password reset service behavior tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};

use jl_shared::config::OtpConfig;

use crate::domain::clock::Clock;
use crate::domain::entities::{Account, AccountProfile, Role};
use crate::errors::{AuthError, DomainError, OtpError, TokenError};
use crate::repositories::{AccountRepository, MockAccountRepository};
use crate::services::auth::password::{hash_password, verify_password};
use crate::services::otp::MailerTrait;
use crate::services::password_reset::PasswordResetService;
use crate::services::reset_token::ResetTokenCodec;

pub struct TestClock {
    now: Mutex<DateTime<Utc>>,
}

impl TestClock {
    fn new() -> Self {
        Self {
            now: Mutex::new(Utc.with_ymd_and_hms(2025, 3, 10, 12, 0, 0).unwrap()),
        }
    }

    fn advance_seconds(&self, seconds: i64) {
        let mut now = self.now.lock().unwrap();
        *now += chrono::Duration::seconds(seconds);
    }

    fn advance_minutes(&self, minutes: i64) {
        self.advance_seconds(minutes * 60);
    }
}

impl Clock for TestClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}

#[derive(Default)]
struct RecordingMailer {
    sent: Mutex<Vec<(String, String)>>,
}

impl RecordingMailer {
    fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl MailerTrait for RecordingMailer {
    async fn send(
        &self,
        recipient_address: &str,
        _recipient_name: &str,
        _subject: &str,
        text_body: &str,
        _html_body: &str,
    ) -> bool {
        self.sent
            .lock()
            .unwrap()
            .push((recipient_address.to_string(), text_body.to_string()));
        true
    }
}

async fn wait_for_sends(mailer: &RecordingMailer, count: usize) -> Vec<(String, String)> {
    for _ in 0..100 {
        let sent = mailer.sent();
        if sent.len() >= count {
            return sent;
        }
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    }
    panic!("mailer never received {count} send(s)");
}

fn extract_code(text_body: &str) -> String {
    let start = text_body.find("is: ").expect("code marker") + 4;
    text_body[start..start + 6].to_string()
}

struct Harness {
    accounts: Arc<MockAccountRepository>,
    mailer: Arc<RecordingMailer>,
    clock: Arc<TestClock>,
    service: PasswordResetService<MockAccountRepository, RecordingMailer>,
}

async fn harness() -> Harness {
    let accounts = Arc::new(MockAccountRepository::new());
    let account = Account::new(
        "alice".to_string(),
        "alice@example.com".to_string(),
        hash_password("old-password-1").unwrap(),
    );
    let profile = AccountProfile::new(
        account.id,
        account.email.clone(),
        "Alice Example".to_string(),
        Role::JobSeeker,
    );
    accounts.insert(account, profile).await;

    let mailer = Arc::new(RecordingMailer::default());
    let clock = Arc::new(TestClock::new());
    let config = OtpConfig::default();
    let codec = ResetTokenCodec::new("test-secret", config.reset_token_max_age_seconds);

    let service = PasswordResetService::new(
        Arc::clone(&accounts),
        Arc::clone(&mailer),
        codec,
        Arc::clone(&clock) as Arc<dyn Clock>,
        config,
    );

    Harness {
        accounts,
        mailer,
        clock,
        service,
    }
}

#[tokio::test]
async fn test_forgot_password_unknown_email_succeeds_without_sending() {
    let h = harness().await;
    h.service.forgot_password("nobody@example.com").await.unwrap();

    tokio::time::sleep(std::time::Duration::from_millis(20)).await;
    assert!(h.mailer.sent().is_empty());
}

#[tokio::test]
async fn test_forgot_password_sends_code_to_known_email() {
    let h = harness().await;
    h.service.forgot_password("alice@example.com").await.unwrap();

    let sent = wait_for_sends(&h.mailer, 1).await;
    assert_eq!(sent[0].0, "alice@example.com");

    let profile = h
        .accounts
        .find_profile_by_email("alice@example.com")
        .await
        .unwrap()
        .unwrap();
    assert!(profile.challenge.has_active_code());
    assert_eq!(profile.challenge.resend_count, 1);
}

#[tokio::test]
async fn test_forgot_password_within_cooldown_is_rejected() {
    let h = harness().await;
    h.service.forgot_password("alice@example.com").await.unwrap();

    h.clock.advance_seconds(5);
    let result = h.service.forgot_password("alice@example.com").await;
    assert!(matches!(
        result,
        Err(DomainError::Otp(OtpError::CooldownActive {
            retry_after_seconds: 25
        }))
    ));
}

#[tokio::test]
async fn test_full_reset_flow_changes_credential() {
    let h = harness().await;
    h.service.forgot_password("alice@example.com").await.unwrap();
    let sent = wait_for_sends(&h.mailer, 1).await;
    let code = extract_code(&sent[0].1);

    h.clock.advance_minutes(1);
    let token = h
        .service
        .verify_otp("alice@example.com", &code)
        .await
        .unwrap();

    h.clock.advance_minutes(2);
    h.service
        .reset_password(&token, "new-password-1", "new-password-1")
        .await
        .unwrap();

    let account = h
        .accounts
        .find_by_email("alice@example.com")
        .await
        .unwrap()
        .unwrap();
    assert!(verify_password("new-password-1", &account.password_hash).unwrap());
    assert!(!verify_password("old-password-1", &account.password_hash).unwrap());

    // Challenge fields are wiped, so the used code is dead
    let profile = h
        .accounts
        .find_profile_by_email("alice@example.com")
        .await
        .unwrap()
        .unwrap();
    assert!(!profile.challenge.has_active_code());
    assert_eq!(profile.challenge.resend_count, 0);
}

#[tokio::test]
async fn test_verify_unknown_email_reads_as_not_requested() {
    let h = harness().await;
    let result = h.service.verify_otp("nobody@example.com", "123456").await;
    assert!(matches!(
        result,
        Err(DomainError::Otp(OtpError::NotRequested))
    ));
}

#[tokio::test]
async fn test_verify_without_request_is_rejected() {
    let h = harness().await;
    let result = h.service.verify_otp("alice@example.com", "123456").await;
    assert!(matches!(
        result,
        Err(DomainError::Otp(OtpError::NotRequested))
    ));
}

#[tokio::test]
async fn test_attempt_cap_locks_out_verification() {
    let h = harness().await;
    h.service.forgot_password("alice@example.com").await.unwrap();
    let sent = wait_for_sends(&h.mailer, 1).await;
    let code = extract_code(&sent[0].1);
    let wrong = if code == "000000" { "000001" } else { "000000" };

    for _ in 0..5 {
        let result = h.service.verify_otp("alice@example.com", wrong).await;
        assert!(matches!(
            result,
            Err(DomainError::Otp(OtpError::InvalidCode))
        ));
    }

    // Even the correct code is refused now
    let result = h.service.verify_otp("alice@example.com", &code).await;
    assert!(matches!(
        result,
        Err(DomainError::Otp(OtpError::TooManyAttempts))
    ));
}

#[tokio::test]
async fn test_reset_password_mismatched_confirmation() {
    let h = harness().await;
    let result = h
        .service
        .reset_password("any-token", "new-password-1", "different-1")
        .await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::PasswordMismatch))
    ));
}

#[tokio::test]
async fn test_reset_password_with_garbage_token() {
    let h = harness().await;
    let result = h
        .service
        .reset_password("garbage", "new-password-1", "new-password-1")
        .await;
    assert!(matches!(result, Err(DomainError::Token(TokenError::Invalid))));
}

#[tokio::test]
async fn test_reset_token_expires_after_window() {
    let h = harness().await;
    h.service.forgot_password("alice@example.com").await.unwrap();
    let sent = wait_for_sends(&h.mailer, 1).await;
    let code = extract_code(&sent[0].1);

    let token = h
        .service
        .verify_otp("alice@example.com", &code)
        .await
        .unwrap();

    h.clock.advance_minutes(16);
    let result = h
        .service
        .reset_password(&token, "new-password-1", "new-password-1")
        .await;
    assert!(matches!(result, Err(DomainError::Token(TokenError::Expired))));

    // The old credential still works
    let account = h
        .accounts
        .find_by_email("alice@example.com")
        .await
        .unwrap()
        .unwrap();
    assert!(verify_password("old-password-1", &account.password_hash).unwrap());
}
