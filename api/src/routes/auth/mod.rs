//! Auth endpoints under `/api/v1/auth`.

mod forgot_password;
mod login;
mod refresh;
mod register;
mod reset_password;
mod send_otp;
mod verify_forgot_otp;
mod verify_otp;

use actix_web::web;

use jl_core::repositories::{AccountRepository, PendingRegistrationRepository};
use jl_core::services::otp::MailerTrait;

pub use forgot_password::forgot_password;
pub use login::login;
pub use refresh::refresh;
pub use register::register;
pub use reset_password::reset_password;
pub use send_otp::send_otp;
pub use verify_forgot_otp::verify_forgot_otp;
pub use verify_otp::verify_otp;

pub fn configure<P, A, M>(cfg: &mut web::ServiceConfig)
where
    P: PendingRegistrationRepository + 'static,
    A: AccountRepository + 'static,
    M: MailerTrait + 'static,
{
    cfg.service(
        web::scope("/api/v1/auth")
            .route("/register", web::post().to(register::<P, A, M>))
            .route("/send-otp", web::post().to(send_otp::<P, A, M>))
            .route("/verify-otp", web::post().to(verify_otp::<P, A, M>))
            .route("/login", web::post().to(login::<P, A, M>))
            .route("/refresh", web::post().to(refresh::<P, A, M>))
            .route("/forgot-password", web::post().to(forgot_password::<P, A, M>))
            .route(
                "/verify-forgot-otp",
                web::post().to(verify_forgot_otp::<P, A, M>),
            )
            .route("/reset-password", web::post().to(reset_password::<P, A, M>)),
    );
}
