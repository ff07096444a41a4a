//! Handler for POST /api/v1/auth/login.

use actix_web::{web, HttpResponse};
use validator::Validate;

use jl_core::repositories::{AccountRepository, PendingRegistrationRepository};
use jl_core::services::otp::MailerTrait;

use crate::dto::auth::{AuthResponse, LoginRequest};
use crate::handlers::error::{domain_error_response, validation_error_response};
use crate::state::AppState;

/// Authenticate with username or email plus password.
pub async fn login<P, A, M>(
    state: web::Data<AppState<P, A, M>>,
    request: web::Json<LoginRequest>,
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
        .auth
        .login(&request.identifier, &request.password)
        .await
    {
        Ok(outcome) => HttpResponse::Ok().json(AuthResponse::from(&outcome)),
        Err(err) => domain_error_response(&err),
    }
}
