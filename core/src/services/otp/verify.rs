//! OTP verification against a subject's active challenge.

use chrono::{DateTime, Duration, Utc};
use constant_time_eq::constant_time_eq;
use jl_shared::config::OtpConfig;

use crate::domain::entities::VerificationSubject;
use crate::errors::OtpError;

use super::generator;

/// Verify `submitted` against the subject's active challenge.
///
/// Must be executed under the same exclusive-lock discipline as
/// [`super::issue_challenge`]. Check order: attempt cap, challenge
/// existence, expiry, then a constant-time digest comparison. A mismatch
/// increments the attempt counter; a match consumes the challenge so the
/// same code can never verify twice.
pub fn verify_challenge<S: VerificationSubject>(
    subject: &mut S,
    submitted: &str,
    now: DateTime<Utc>,
    config: &OtpConfig,
) -> Result<(), OtpError> {
    let challenge = subject.challenge_mut();

    if challenge.otp_attempts >= config.max_attempts {
        return Err(OtpError::TooManyAttempts);
    }

    let (stored_digest, issued_at) = match (&challenge.otp_digest, challenge.otp_issued_at) {
        (Some(digest), Some(issued_at)) => (digest.clone(), issued_at),
        _ => return Err(OtpError::NotRequested),
    };

    if now - issued_at > Duration::minutes(config.otp_expiry_minutes) {
        return Err(OtpError::Expired);
    }

    let submitted_digest = generator::digest(submitted);
    if !constant_time_eq(submitted_digest.as_bytes(), stored_digest.as_bytes()) {
        challenge.record_failed_attempt();
        return Err(OtpError::InvalidCode);
    }

    challenge.consume();
    Ok(())
}
