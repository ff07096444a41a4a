//! Handler for POST /api/v1/auth/verify-forgot-otp.

use actix_web::{web, HttpResponse};
use validator::Validate;

use jl_core::repositories::{AccountRepository, PendingRegistrationRepository};
use jl_core::services::otp::MailerTrait;

use crate::dto::auth::{ResetTokenResponse, VerifyForgotOtpRequest};
use crate::handlers::error::{domain_error_response, validation_error_response};
use crate::state::AppState;

/// Verify the reset code and hand back a short-lived reset token.
pub async fn verify_forgot_otp<P, A, M>(
    state: web::Data<AppState<P, A, M>>,
    request: web::Json<VerifyForgotOtpRequest>,
) -> HttpResponse
where
    P: PendingRegistrationRepository + 'static,
    A: AccountRepository + 'static,
    M: MailerTrait + 'static,
{
    if let Err(errors) = request.validate() {
        return validation_error_response(&errors);
    }

    match state
        .password_reset
        .verify_otp(&request.email, &request.code)
        .await
    {
        Ok(reset_token) => HttpResponse::Ok().json(ResetTokenResponse { reset_token }),
        Err(err) => domain_error_response(&err),
    }
}
