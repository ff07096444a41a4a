//! Provisional registration record awaiting OTP verification.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::otp_challenge::{OtpChallenge, VerificationSubject};
use super::profile::Role;

/// Candidate identity submitted at registration, keyed by email. Becomes
/// a durable [`super::account::Account`] on successful OTP verification;
/// re-submitting for the same email overwrites handle, name, role and
/// password (last write wins).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingRegistration {
    /// Unique candidate email
    pub email: String,

    /// Requested login handle
    pub username: String,

    /// Display name
    pub name: String,

    /// Declared role
    pub role: Role,

    /// bcrypt digest of the requested password
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// In-flight registration challenge, if any
    #[serde(flatten)]
    pub challenge: OtpChallenge,

    /// Timestamp when the record was first created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the record was last overwritten
    pub updated_at: DateTime<Utc>,
}

impl PendingRegistration {
    /// Creates a new pending registration with no active challenge.
    pub fn new(
        email: String,
        username: String,
        name: String,
        role: Role,
        password_hash: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            email,
            username,
            name,
            role,
            password_hash,
            challenge: OtpChallenge::default(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrite the candidate identity on re-submission, keeping the
    /// existing challenge state so rate limits carry over.
    pub fn overwrite_identity(
        &mut self,
        username: String,
        name: String,
        role: Role,
        password_hash: String,
    ) {
        self.username = username;
        self.name = name;
        self.role = role;
        self.password_hash = password_hash;
        self.updated_at = Utc::now();
    }
}

impl VerificationSubject for PendingRegistration {
    fn challenge(&self) -> &OtpChallenge {
        &self.challenge
    }

    fn challenge_mut(&mut self) -> &mut OtpChallenge {
        &mut self.challenge
    }

    fn recipient_email(&self) -> &str {
        &self.email
    }

    fn recipient_name(&self) -> &str {
        &self.name
    }
}
