//! Shared application state.

use std::sync::Arc;

use jl_core::repositories::{AccountRepository, PendingRegistrationRepository};
use jl_core::services::auth::AuthService;
use jl_core::services::otp::MailerTrait;
use jl_core::services::password_reset::PasswordResetService;
use jl_core::services::registration::RegistrationService;
use jl_core::services::token::AuthTokenService;

/// Services shared across handlers. Generic over the persistence and
/// mailer implementations so tests can run against the in-memory mocks.
pub struct AppState<P, A, M>
where
    P: PendingRegistrationRepository,
    A: AccountRepository,
    M: MailerTrait + 'static,
{
    pub registration: Arc<RegistrationService<P, A, M>>,
    pub password_reset: Arc<PasswordResetService<A, M>>,
    pub auth: Arc<AuthService<A>>,
    pub tokens: Arc<AuthTokenService>,
}
