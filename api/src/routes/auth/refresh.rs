//! Handler for POST /api/v1/auth/refresh.

use actix_web::{web, HttpResponse};
use validator::Validate;

use jl_core::errors::ErrorResponse;
use jl_core::repositories::{AccountRepository, PendingRegistrationRepository};
use jl_core::services::otp::MailerTrait;

use crate::dto::auth::{RefreshRequest, TokenPairResponse};
use crate::handlers::error::validation_error_response;
use crate::state::AppState;

/// Exchange a refresh token for a fresh pair.
pub async fn refresh<P, A, M>(
    state: web::Data<AppState<P, A, M>>,
    request: web::Json<RefreshRequest>,
) -> HttpResponse
where
    P: PendingRegistrationRepository + 'static,
    A: AccountRepository + 'static,
    M: MailerTrait + 'static,
{
    if let Err(errors) = request.validate() {
        return validation_error_response(&errors);
    }

    match state.tokens.refresh_pair(&request.refresh_token) {
        Ok(tokens) => HttpResponse::Ok().json(TokenPairResponse::from(&tokens)),
        // A stale or foreign refresh token is an authentication failure,
        // not a bad request.
        Err(err) => {
            HttpResponse::Unauthorized().json(ErrorResponse::new(err.code(), err.to_string()))
        }
    }
}
