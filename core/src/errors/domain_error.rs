//! Error taxonomy for the verification, token and account subsystems.
//!
//! Every variant except `AuthError::UsernameTaken`/`EmailTaken` is
//! recoverable by retrying the relevant step; the conflict variants
//! require the caller to choose a different handle.

use jl_shared::types::response::ErrorResponse;
use thiserror::Error;

/// Rejections produced by OTP issuance and verification.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OtpError {
    #[error("A code was sent recently. Please wait {retry_after_seconds} seconds before requesting again")]
    CooldownActive { retry_after_seconds: i64 },

    #[error("Daily OTP limit reached. Try again tomorrow")]
    DailyLimitExceeded,

    #[error("Too many invalid OTP attempts. Please request a new OTP")]
    TooManyAttempts,

    #[error("No OTP requested")]
    NotRequested,

    #[error("OTP expired")]
    Expired,

    #[error("Invalid OTP")]
    InvalidCode,
}

/// Rejections produced by the signed reset-token codec and the auth
/// token service.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Reset token expired")]
    Expired,

    #[error("Invalid reset token")]
    Invalid,

    #[error("Token generation failed")]
    GenerationFailed,
}

/// Account and credential errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Username already taken")]
    UsernameTaken,

    #[error("Email already registered. Please login")]
    EmailTaken,

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("User not found")]
    UserNotFound,
}

impl OtpError {
    /// Stable error code for API responses.
    pub fn code(&self) -> &'static str {
        match self {
            OtpError::CooldownActive { .. } => "COOLDOWN_ACTIVE",
            OtpError::DailyLimitExceeded => "DAILY_LIMIT_EXCEEDED",
            OtpError::TooManyAttempts => "TOO_MANY_ATTEMPTS",
            OtpError::NotRequested => "OTP_NOT_REQUESTED",
            OtpError::Expired => "OTP_EXPIRED",
            OtpError::InvalidCode => "INVALID_CODE",
        }
    }
}

impl TokenError {
    /// Stable error code for API responses.
    pub fn code(&self) -> &'static str {
        match self {
            TokenError::Expired => "TOKEN_EXPIRED",
            TokenError::Invalid => "TOKEN_INVALID",
            TokenError::GenerationFailed => "TOKEN_GENERATION_FAILED",
        }
    }
}

impl AuthError {
    /// Stable error code for API responses.
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::UsernameTaken => "USERNAME_TAKEN",
            AuthError::EmailTaken => "EMAIL_TAKEN",
            AuthError::PasswordMismatch => "PASSWORD_MISMATCH",
            AuthError::InvalidCredentials => "INVALID_CREDENTIALS",
            AuthError::UserNotFound => "USER_NOT_FOUND",
        }
    }
}

impl From<OtpError> for ErrorResponse {
    fn from(err: OtpError) -> Self {
        ErrorResponse::new(err.code(), err.to_string())
    }
}

impl From<TokenError> for ErrorResponse {
    fn from(err: TokenError) -> Self {
        ErrorResponse::new(err.code(), err.to_string())
    }
}

impl From<AuthError> for ErrorResponse {
    fn from(err: AuthError) -> Self {
        ErrorResponse::new(err.code(), err.to_string())
    }
}
