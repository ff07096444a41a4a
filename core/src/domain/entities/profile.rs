//! Account profile entity with the forgot-password OTP challenge.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::otp_challenge::{OtpChallenge, VerificationSubject};

/// Declared role of an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// A candidate browsing and applying to jobs
    JobSeeker,
    /// An employer posting jobs and reviewing applications
    Recruiter,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::JobSeeker => "jobseeker",
            Role::Recruiter => "recruiter",
        }
    }
}

/// Extended attributes of a verified account, one-to-one with
/// [`super::account::Account`]. Also the verification subject for the
/// forgot-password flow: the OTP challenge fields live here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountProfile {
    /// Owning account id
    pub account_id: Uuid,

    /// Display name
    pub name: String,

    /// Declared role
    pub role: Role,

    /// Contact phone (optional free-form)
    pub phone: Option<String>,

    /// Location (optional free-form)
    pub location: Option<String>,

    /// Whether the owning email address has been verified
    pub is_verified: bool,

    /// In-flight forgot-password challenge, if any
    #[serde(flatten)]
    pub challenge: OtpChallenge,

    /// Recipient address for OTP dispatch, denormalized from the account
    #[serde(skip)]
    pub email: String,

    /// Timestamp when the profile was last updated
    pub updated_at: DateTime<Utc>,
}

impl AccountProfile {
    /// Creates a verified profile for a freshly promoted account.
    pub fn new(account_id: Uuid, email: String, name: String, role: Role) -> Self {
        Self {
            account_id,
            name,
            role,
            phone: None,
            location: None,
            is_verified: true,
            challenge: OtpChallenge::default(),
            email,
            updated_at: Utc::now(),
        }
    }
}

impl VerificationSubject for AccountProfile {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_profile_is_verified_with_empty_challenge() {
        let profile = AccountProfile::new(
            Uuid::new_v4(),
            "seeker@example.com".to_string(),
            "Alice".to_string(),
            Role::JobSeeker,
        );
        assert!(profile.is_verified);
        assert!(!profile.challenge.has_active_code());
        assert_eq!(profile.recipient_email(), "seeker@example.com");
        assert_eq!(profile.recipient_name(), "Alice");
    }

    #[test]
    fn test_role_serialization() {
        assert_eq!(
            serde_json::to_string(&Role::JobSeeker).unwrap(),
            "\"jobseeker\""
        );
        assert_eq!(
            serde_json::to_string(&Role::Recruiter).unwrap(),
            "\"recruiter\""
        );
    }
}
