//! DomainError to HTTP response mapping.

use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use validator::ValidationErrors;

use jl_core::errors::{AuthError, DomainError, ErrorResponse, OtpError, TokenError};

/// Render a domain error with its stable code and the matching status.
pub fn domain_error_response(err: &DomainError) -> HttpResponse {
    let (status, body) = match err {
        DomainError::Validation { message } => (
            StatusCode::BAD_REQUEST,
            ErrorResponse::new("VALIDATION_ERROR", message),
        ),
        DomainError::NotFound { resource } => (
            StatusCode::NOT_FOUND,
            ErrorResponse::new("NOT_FOUND", format!("{resource} not found")),
        ),
        DomainError::Otp(otp) => (otp_status(otp), otp.clone().into()),
        DomainError::Token(token) => (token_status(token), token.clone().into()),
        DomainError::Auth(auth) => (auth_status(auth), auth.clone().into()),
        DomainError::Database { .. } | DomainError::Internal { .. } => {
            tracing::error!(error = %err, "internal error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse::new("INTERNAL_ERROR", "An internal error occurred"),
            )
        }
    };

    HttpResponse::build(status).json(body)
}

fn otp_status(err: &OtpError) -> StatusCode {
    match err {
        OtpError::CooldownActive { .. }
        | OtpError::DailyLimitExceeded
        | OtpError::TooManyAttempts => StatusCode::TOO_MANY_REQUESTS,
        OtpError::NotRequested | OtpError::Expired | OtpError::InvalidCode => {
            StatusCode::BAD_REQUEST
        }
    }
}

fn token_status(err: &TokenError) -> StatusCode {
    match err {
        TokenError::Expired | TokenError::Invalid => StatusCode::BAD_REQUEST,
        TokenError::GenerationFailed => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn auth_status(err: &AuthError) -> StatusCode {
    match err {
        AuthError::UsernameTaken | AuthError::EmailTaken => StatusCode::CONFLICT,
        AuthError::PasswordMismatch => StatusCode::BAD_REQUEST,
        AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
        AuthError::UserNotFound => StatusCode::NOT_FOUND,
    }
}

/// Render validator failures as a 400 with the offending fields.
pub fn validation_error_response(errors: &ValidationErrors) -> HttpResponse {
    let fields: Vec<&str> = errors.field_errors().keys().copied().collect();
    HttpResponse::BadRequest().json(ErrorResponse::new(
        "VALIDATION_ERROR",
        format!("invalid fields: {}", fields.join(", ")),
    ))
}
