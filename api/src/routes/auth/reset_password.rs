//! Handler for POST /api/v1/auth/reset-password.

use actix_web::{web, HttpResponse};
use validator::Validate;

use jl_core::repositories::{AccountRepository, PendingRegistrationRepository};
use jl_core::services::otp::MailerTrait;
use jl_shared::types::response::ApiResponse;

use crate::dto::auth::ResetPasswordRequest;
use crate::handlers::error::{domain_error_response, validation_error_response};
use crate::state::AppState;

/// Redeem the reset token and overwrite the password.
pub async fn reset_password<P, A, M>(
    state: web::Data<AppState<P, A, M>>,
    request: web::Json<ResetPasswordRequest>,
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
        .reset_password(
            &request.reset_token,
            &request.new_password,
            &request.confirm_password,
        )
        .await
    {
        Ok(()) => HttpResponse::Ok().json(ApiResponse::<()>::message(
            "Password has been reset, you can now log in",
        )),
        Err(err) => domain_error_response(&err),
    }
}
