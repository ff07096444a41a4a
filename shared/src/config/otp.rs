//! OTP issuance and verification settings.

use serde::{Deserialize, Serialize};

/// Settings governing the OTP verification subsystem.
///
/// One instance is injected into every service that issues or verifies
/// codes; nothing in the core reads these limits from globals.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OtpConfig {
    /// Minimum seconds between two code issuances for the same subject
    pub cooldown_seconds: i64,

    /// Maximum codes issued per subject per calendar day
    pub daily_resend_limit: i32,

    /// Failed verification attempts allowed before a code is burned
    pub max_attempts: i32,

    /// Number of digits in a generated code
    pub otp_length: usize,

    /// Minutes before an issued code expires
    pub otp_expiry_minutes: i64,

    /// Maximum age of a signed password-reset token in seconds
    pub reset_token_max_age_seconds: i64,
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self {
            cooldown_seconds: 30,
            daily_resend_limit: 10,
            max_attempts: 5,
            otp_length: 6,
            otp_expiry_minutes: 5,
            reset_token_max_age_seconds: 15 * 60,
        }
    }
}

impl OtpConfig {
    /// Build from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        fn parse<T: std::str::FromStr>(key: &str, fallback: T) -> T {
            std::env::var(key)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(fallback)
        }

        Self {
            cooldown_seconds: parse("OTP_COOLDOWN_SECONDS", defaults.cooldown_seconds),
            daily_resend_limit: parse("OTP_DAILY_RESEND_LIMIT", defaults.daily_resend_limit),
            max_attempts: parse("OTP_MAX_ATTEMPTS", defaults.max_attempts),
            otp_length: parse("OTP_LENGTH", defaults.otp_length),
            otp_expiry_minutes: parse("OTP_EXPIRY_MINUTES", defaults.otp_expiry_minutes),
            reset_token_max_age_seconds: parse(
                "RESET_TOKEN_MAX_AGE_SECONDS",
                defaults.reset_token_max_age_seconds,
            ),
        }
    }
}
