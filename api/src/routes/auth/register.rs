//! Handler for POST /api/v1/auth/register.

use actix_web::{web, HttpResponse};
use validator::Validate;

use jl_core::repositories::{AccountRepository, PendingRegistrationRepository};
use jl_core::services::otp::MailerTrait;
use jl_core::services::registration::NewRegistration;
use jl_shared::types::response::ApiResponse;

use crate::dto::auth::RegisterRequest;
use crate::handlers::error::{domain_error_response, validation_error_response};
use crate::state::AppState;

/// Record a registration and send the first verification code. The
/// account does not exist until the code is verified.
pub async fn register<P, A, M>(
    state: web::Data<AppState<P, A, M>>,
    request: web::Json<RegisterRequest>,
) -> HttpResponse
where
    P: PendingRegistrationRepository + 'static,
    A: AccountRepository + 'static,
    M: MailerTrait + 'static,
{
    if let Err(errors) = request.validate() {
        return validation_error_response(&errors);
    }
    let request = request.into_inner();

    let submission = NewRegistration {
        email: request.email,
        username: request.username,
        name: request.name,
        role: request.role,
        password: request.password,
    };

    match state.registration.register(submission).await {
        Ok(()) => HttpResponse::Ok().json(ApiResponse::<()>::message(
            "Verification code sent to your email",
        )),
        Err(err) => domain_error_response(&err),
    }
}
