//! Auth endpoint payloads.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use jl_core::domain::entities::Role;
use jl_core::services::auth::LoginOutcome;
use jl_core::services::registration::RegistrationVerified;
use jl_core::services::token::AuthTokens;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email)]
    pub email: String,

    /// Login handle: 3-30 characters, letters, digits, underscore
    #[validate(length(min = 3, max = 30))]
    pub username: String,

    #[validate(length(min = 1, max = 255))]
    pub name: String,

    /// "jobseeker" or "recruiter"
    pub role: Role,

    #[validate(length(min = 8))]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SendOtpRequest {
    #[validate(email)]
    pub email: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct VerifyOtpRequest {
    #[validate(email)]
    pub email: String,

    /// Numeric verification code; length is arbitrated by the verifier
    /// so operators can change the configured code length
    #[validate(custom = "code_is_numeric")]
    pub code: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    /// Username or email
    #[validate(length(min = 1))]
    pub identifier: String,

    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RefreshRequest {
    #[validate(length(min = 1))]
    pub refresh_token: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ForgotPasswordRequest {
    #[validate(email)]
    pub email: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct VerifyForgotOtpRequest {
    #[validate(email)]
    pub email: String,

    #[validate(custom = "code_is_numeric")]
    pub code: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ResetPasswordRequest {
    #[validate(length(min = 1))]
    pub reset_token: String,

    #[validate(length(min = 8))]
    pub new_password: String,

    #[validate(length(min = 1))]
    pub confirm_password: String,
}

fn code_is_numeric(code: &str) -> Result<(), ValidationError> {
    if code.is_empty() || code.len() > 10 || !code.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::new("code must be numeric"));
    }
    Ok(())
}

#[derive(Debug, Clone, Serialize)]
pub struct AccountSummary {
    pub id: String,
    pub username: String,
    pub email: String,
    pub role: Role,
}

#[derive(Debug, Clone, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub account: AccountSummary,
}

impl AuthResponse {
    fn build(tokens: &AuthTokens, summary: AccountSummary) -> Self {
        Self {
            access_token: tokens.access_token.clone(),
            refresh_token: tokens.refresh_token.clone(),
            token_type: tokens.token_type.clone(),
            expires_in: tokens.expires_in,
            account: summary,
        }
    }
}

impl From<&RegistrationVerified> for AuthResponse {
    fn from(verified: &RegistrationVerified) -> Self {
        Self::build(
            &verified.tokens,
            AccountSummary {
                id: verified.account.id.to_string(),
                username: verified.account.username.clone(),
                email: verified.account.email.clone(),
                role: verified.role,
            },
        )
    }
}

impl From<&LoginOutcome> for AuthResponse {
    fn from(outcome: &LoginOutcome) -> Self {
        Self::build(
            &outcome.tokens,
            AccountSummary {
                id: outcome.account.id.to_string(),
                username: outcome.account.username.clone(),
                email: outcome.account.email.clone(),
                role: outcome.role,
            },
        )
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TokenPairResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

impl From<&AuthTokens> for TokenPairResponse {
    fn from(tokens: &AuthTokens) -> Self {
        Self {
            access_token: tokens.access_token.clone(),
            refresh_token: tokens.refresh_token.clone(),
            token_type: tokens.token_type.clone(),
            expires_in: tokens.expires_in,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ResetTokenResponse {
    pub reset_token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn verify_request(code: &str) -> VerifyOtpRequest {
        VerifyOtpRequest {
            email: "alice@example.com".to_string(),
            code: code.to_string(),
        }
    }

    #[test]
    fn test_code_accepts_any_numeric_length() {
        assert!(verify_request("482913").validate().is_ok());
        assert!(verify_request("48291375").validate().is_ok());
    }

    #[test]
    fn test_code_rejects_non_numeric_shapes() {
        assert!(verify_request("").validate().is_err());
        assert!(verify_request("48a913").validate().is_err());
        assert!(verify_request("4829 13").validate().is_err());
    }
}
