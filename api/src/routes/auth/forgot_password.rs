//! Handler for POST /api/v1/auth/forgot-password.

use actix_web::{web, HttpResponse};
use validator::Validate;

use jl_core::repositories::{AccountRepository, PendingRegistrationRepository};
use jl_core::services::otp::MailerTrait;
use jl_shared::types::response::ApiResponse;

use crate::dto::auth::ForgotPasswordRequest;
use crate::handlers::error::{domain_error_response, validation_error_response};
use crate::state::AppState;

/// Start credential recovery. The response is identical whether or not
/// the email is registered.
pub async fn forgot_password<P, A, M>(
    state: web::Data<AppState<P, A, M>>,
    request: web::Json<ForgotPasswordRequest>,
) -> HttpResponse
where
    P: PendingRegistrationRepository + 'static,
    A: AccountRepository + 'static,
    M: MailerTrait + 'static,
{
    if let Err(errors) = request.validate() {
        return validation_error_response(&errors);
    }

    match state.password_reset.forgot_password(&request.email).await {
        Ok(()) => HttpResponse::Ok().json(ApiResponse::<()>::message(
            "If that email is registered, a reset code has been sent",
        )),
        Err(err) => domain_error_response(&err),
    }
}
