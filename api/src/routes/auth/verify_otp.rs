//! Handler for POST /api/v1/auth/verify-otp.

use actix_web::{web, HttpResponse};
use validator::Validate;

use jl_core::repositories::{AccountRepository, PendingRegistrationRepository};
use jl_core::services::otp::MailerTrait;

use crate::dto::auth::{AuthResponse, VerifyOtpRequest};
use crate::handlers::error::{domain_error_response, validation_error_response};
use crate::state::AppState;

/// Verify the registration code; on success the account is created and
/// signed in.
pub async fn verify_otp<P, A, M>(
    state: web::Data<AppState<P, A, M>>,
    request: web::Json<VerifyOtpRequest>,
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
        .registration
        .verify_otp(&request.email, &request.code)
        .await
    {
        Ok(verified) => HttpResponse::Created().json(AuthResponse::from(&verified)),
        Err(err) => domain_error_response(&err),
    }
}
