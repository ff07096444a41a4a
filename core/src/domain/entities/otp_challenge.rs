//! In-flight OTP challenge state shared by pending registrations and
//! account profiles.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Persisted state of one OTP challenge.
///
/// Invariants: `otp_digest` is set if and only if `otp_issued_at` is set,
/// and `otp_attempts` is reset whenever the digest is cleared or
/// replaced. All mutation goes through the methods below so the two
/// fields can never drift apart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtpChallenge {
    /// SHA-256 hex digest of the active code, if any
    pub otp_digest: Option<String>,

    /// When the active code was generated
    pub otp_issued_at: Option<DateTime<Utc>>,

    /// Failed verification attempts against the active code
    pub otp_attempts: i32,

    /// When the most recent code was dispatched (drives cooldown)
    pub last_sent_at: Option<DateTime<Utc>>,

    /// Codes issued in the current calendar-day window
    pub resend_count: i32,
}

impl OtpChallenge {
    /// Whether a code is currently outstanding.
    pub fn has_active_code(&self) -> bool {
        self.otp_digest.is_some()
    }

    /// Install a freshly issued code digest, replacing any previous one.
    pub fn record_issuance(&mut self, digest: String, now: DateTime<Utc>) {
        self.otp_digest = Some(digest);
        self.otp_issued_at = Some(now);
        self.last_sent_at = Some(now);
        self.resend_count += 1;
        self.otp_attempts = 0;
    }

    /// Record one failed verification attempt.
    pub fn record_failed_attempt(&mut self) {
        self.otp_attempts += 1;
    }

    /// Consume the active code after a successful verification.
    pub fn consume(&mut self) {
        self.otp_digest = None;
        self.otp_issued_at = None;
        self.otp_attempts = 0;
    }

    /// Clear every challenge field, including the resend window.
    pub fn clear_all(&mut self) {
        *self = OtpChallenge::default();
    }
}

/// Capability implemented by any entity that can hold one in-flight OTP
/// challenge. The issuance guard and verifier are written against this
/// trait so the rate-limiting logic is never duplicated per entity kind.
pub trait VerificationSubject {
    fn challenge(&self) -> &OtpChallenge;
    fn challenge_mut(&mut self) -> &mut OtpChallenge;

    /// Address the code is dispatched to.
    fn recipient_email(&self) -> &str;

    /// Display name used in the outbound message.
    fn recipient_name(&self) -> &str;
}
