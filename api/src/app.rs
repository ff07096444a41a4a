//! Route registration shared by the binary and the integration tests.

use actix_web::{web, HttpResponse};

use jl_core::repositories::{AccountRepository, PendingRegistrationRepository};
use jl_core::services::otp::MailerTrait;
use jl_shared::types::response::ApiResponse;

use crate::routes;

/// Register every endpoint. The caller supplies the `AppState` via
/// `app_data`.
pub fn configure<P, A, M>(cfg: &mut web::ServiceConfig)
where
    P: PendingRegistrationRepository + 'static,
    A: AccountRepository + 'static,
    M: MailerTrait + 'static,
{
    routes::auth::configure::<P, A, M>(cfg);
    cfg.route("/health", web::get().to(health));
}

async fn health() -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::<()>::message("ok"))
}
