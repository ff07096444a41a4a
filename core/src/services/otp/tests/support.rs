//! Shared fixtures for OTP tests.

use chrono::{DateTime, TimeZone, Utc};
use jl_shared::config::OtpConfig;

use crate::domain::entities::{OtpChallenge, VerificationSubject};

/// Minimal verification subject for exercising the guard and verifier.
#[derive(Debug, Default)]
pub struct TestSubject {
    pub challenge: OtpChallenge,
}

impl VerificationSubject for TestSubject {
    fn challenge(&self) -> &OtpChallenge {
        &self.challenge
    }

    fn challenge_mut(&mut self) -> &mut OtpChallenge {
        &mut self.challenge
    }

    fn recipient_email(&self) -> &str {
        "subject@example.com"
    }

    fn recipient_name(&self) -> &str {
        "Test Subject"
    }
}

pub fn config() -> OtpConfig {
    OtpConfig::default()
}

/// A fixed mid-day instant so cooldown arithmetic never crosses a
/// calendar-day boundary by accident.
pub fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 10, 12, 0, 0).unwrap()
}
