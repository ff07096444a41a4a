//! Rate-limited OTP issuance guard.

use chrono::{DateTime, Utc};
use jl_shared::config::OtpConfig;

use crate::domain::entities::VerificationSubject;
use crate::errors::OtpError;

use super::generator;

/// Issue a new code for `subject`, enforcing cooldown and the daily
/// resend cap.
///
/// Must be executed while the subject row is exclusively locked: the
/// check-then-set sequence below is only race-free when no concurrent
/// issuance can read the same counters. The caller persists the mutated
/// subject and dispatches the returned raw code after releasing the
/// lock; the raw code is never stored.
///
/// Rejections leave the subject untouched.
pub fn issue_challenge<S: VerificationSubject>(
    subject: &mut S,
    now: DateTime<Utc>,
    config: &OtpConfig,
) -> Result<String, OtpError> {
    let challenge = subject.challenge_mut();

    if let Some(last_sent) = challenge.last_sent_at {
        let elapsed = (now - last_sent).num_seconds();
        if elapsed < config.cooldown_seconds {
            return Err(OtpError::CooldownActive {
                retry_after_seconds: config.cooldown_seconds - elapsed,
            });
        }
    }

    if challenge.resend_count >= config.daily_resend_limit {
        match challenge.last_sent_at {
            // The window is a calendar day: any send on a prior day
            // resets the counter.
            Some(last_sent) if last_sent.date_naive() < now.date_naive() => {
                challenge.resend_count = 0;
            }
            _ => return Err(OtpError::DailyLimitExceeded),
        }
    }

    let code = generator::generate_code(config.otp_length);
    challenge.record_issuance(generator::digest(&code), now);
    Ok(code)
}
