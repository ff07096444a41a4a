//! Handler for POST /api/v1/auth/send-otp.

use actix_web::{web, HttpResponse};
use validator::Validate;

use jl_core::repositories::{AccountRepository, PendingRegistrationRepository};
use jl_core::services::otp::MailerTrait;
use jl_shared::types::response::ApiResponse;

use crate::dto::auth::SendOtpRequest;
use crate::handlers::error::{domain_error_response, validation_error_response};
use crate::state::AppState;

/// Re-send a verification code for a pending registration.
pub async fn send_otp<P, A, M>(
    state: web::Data<AppState<P, A, M>>,
    request: web::Json<SendOtpRequest>,
) -> HttpResponse
where
    P: PendingRegistrationRepository + 'static,
    A: AccountRepository + 'static,
    M: MailerTrait + 'static,
{
    if let Err(errors) = request.validate() {
        return validation_error_response(&errors);
    }

    match state.registration.resend_otp(&request.email).await {
        Ok(()) => HttpResponse::Ok().json(ApiResponse::<()>::message(
            "Verification code sent to your email",
        )),
        Err(err) => domain_error_response(&err),
    }
}
